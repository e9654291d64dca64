//! Condition string parser
//!
//! ```text
//! expr      := all ('|' all)*
//! all       := atom ('&' atom)*
//! atom      := '(' expr ')' | predicate
//! predicate := PROPERTY OP VALUE
//! ```
//!
//! Property names and their values are checked here; a condition naming a
//! property the game does not have is rejected.

use crate::condition::ast::{Comparison, Expr, Membership, NumberProperty, Predicate, Property};
use crate::config::MoveType;
use crate::dialogue::RelationshipStatus;
use crate::error::{AetherisError, Result};

/// Parse a condition string into a typed expression
pub fn parse(condition: &str) -> Result<Expr> {
    let tokens = tokenize(condition);
    if tokens.is_empty() {
        return Err(invalid("Empty condition"));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(invalid(format!(
            "Unexpected {:?} in {:?}",
            token, condition
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Predicate(&'a str),
    And,
    Or,
    Open,
    Close,
}

/// Split on `& | ( )`; whatever lies between them is one predicate
fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in input.char_indices() {
        let symbol = match c {
            '&' => Token::And,
            '|' => Token::Or,
            '(' => Token::Open,
            ')' => Token::Close,
            _ => continue,
        };
        push_predicate(&mut tokens, &input[start..i]);
        tokens.push(symbol);
        start = i + c.len_utf8();
    }
    push_predicate(&mut tokens, &input[start..]);

    tokens
}

fn push_predicate<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(Token::Predicate(text));
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut left = self.all()?;
        while self.peek() == Some(Token::Or) {
            self.pos += 1;
            let right = self.all()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn all(&mut self) -> Result<Expr> {
        let mut left = self.atom()?;
        while self.peek() == Some(Token::And) {
            self.pos += 1;
            let right = self.atom()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn atom(&mut self) -> Result<Expr> {
        match self.bump() {
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(invalid("Unbalanced parentheses")),
                }
            }
            Some(Token::Predicate(text)) => parse_predicate(text).map(Expr::Test),
            Some(token) => Err(invalid(format!("Expected a predicate, found {:?}", token))),
            None => Err(invalid("Condition ends after an operator")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Compare(Comparison),
    Includes,
    Excludes,
}

// Two-character operators first so `>=` is not read as `>`
const OPERATORS: [(&str, Op); 8] = [
    (">=", Op::Compare(Comparison::GreaterEqual)),
    ("<=", Op::Compare(Comparison::LessEqual)),
    ("!=", Op::Compare(Comparison::NotEqual)),
    (">", Op::Compare(Comparison::Greater)),
    ("<", Op::Compare(Comparison::Less)),
    ("=", Op::Compare(Comparison::Equal)),
    ("?", Op::Includes),
    ("!", Op::Excludes),
];

fn parse_predicate(text: &str) -> Result<Predicate> {
    let at = text
        .find(&['<', '>', '=', '!', '?'][..])
        .ok_or_else(|| invalid(format!("No operator in {:?}", text)))?;
    let name = text[..at].trim();
    let rest = &text[at..];

    let (symbol, op) = OPERATORS
        .iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .copied()
        .ok_or_else(|| invalid(format!("No operator in {:?}", text)))?;
    let value = rest[symbol.len()..].trim();
    if value.is_empty() {
        return Err(invalid(format!("Missing value in {:?}", text)));
    }

    let property = Property::from_name(name)
        .ok_or_else(|| invalid(format!("Unknown property {:?}", name)))?;

    match property {
        Property::Number(property) => number_predicate(property, op, value),
        Property::Dominant => {
            let (test, ids) = membership(op, value)?;
            let values = ids
                .into_iter()
                .map(|id| id.parse::<MoveType>())
                .collect::<Result<Vec<_>>>()
                .map_err(|_| invalid(format!("Not a move type in {:?}", text)))?;
            Ok(Predicate::Dominant { test, values })
        }
        Property::Status(npc) => {
            let (test, ids) = membership(op, value)?;
            let values = ids
                .iter()
                .map(|id| {
                    RelationshipStatus::from_name(id)
                        .ok_or_else(|| invalid(format!("Unknown relationship status {:?}", id)))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Predicate::Status { npc, test, values })
        }
        Property::Collection(property) => {
            let (test, values) = membership(op, value)?;
            Ok(Predicate::Collection {
                property,
                test,
                values,
            })
        }
    }
}

fn number_predicate(property: NumberProperty, op: Op, value: &str) -> Result<Predicate> {
    let comparison = match op {
        Op::Compare(comparison) => comparison,
        _ => {
            return Err(invalid(format!(
                "{:?} is numeric and takes no id list",
                property
            )))
        }
    };
    let value = value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(format!("Expected a number, found {:?}", value)))?;

    Ok(Predicate::Number {
        property,
        comparison,
        value,
    })
}

/// `=x`, `!=x`, `?[a,b]` or `![a,b]` as a set test over ids
fn membership(op: Op, value: &str) -> Result<(Membership, Vec<String>)> {
    match op {
        Op::Compare(Comparison::Equal) => Ok((Membership::AnyOf, vec![bare_id(value)?])),
        Op::Compare(Comparison::NotEqual) => Ok((Membership::NoneOf, vec![bare_id(value)?])),
        Op::Includes => Ok((Membership::AnyOf, id_list(value)?)),
        Op::Excludes => Ok((Membership::NoneOf, id_list(value)?)),
        Op::Compare(comparison) => Err(invalid(format!(
            "{} needs a numeric property",
            comparison
        ))),
    }
}

fn bare_id(value: &str) -> Result<String> {
    if value.starts_with('[') {
        return Err(invalid(format!("Use ? or ! with a list: {:?}", value)));
    }
    Ok(value.to_string())
}

fn id_list(value: &str) -> Result<Vec<String>> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| invalid(format!("Expected [a,b,..], found {:?}", value)))?;

    let ids: Vec<String> = inner
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(invalid(format!("Empty list: {:?}", value)));
    }
    Ok(ids)
}

fn invalid(message: impl Into<String>) -> AetherisError {
    AetherisError::InvalidCondition(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ast::CollectionProperty;

    fn single(condition: &str) -> Predicate {
        match parse(condition).unwrap() {
            Expr::Test(predicate) => predicate,
            other => panic!("Expected a single predicate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_alignment_threshold() {
        assert_eq!(
            single("ROCK>50"),
            Predicate::Number {
                property: NumberProperty::Alignment(MoveType::Rock),
                comparison: Comparison::Greater,
                value: 50.0,
            }
        );
    }

    #[test]
    fn test_parse_keyed_properties() {
        assert_eq!(
            single("REL.elder>=20"),
            Predicate::Number {
                property: NumberProperty::Relationship("elder".to_string()),
                comparison: Comparison::GreaterEqual,
                value: 20.0,
            }
        );
        assert_eq!(
            single("FLAG.met_elder=1"),
            Predicate::Number {
                property: NumberProperty::Flag("met_elder".to_string()),
                comparison: Comparison::Equal,
                value: 1.0,
            }
        );
        assert_eq!(
            single("STATUS.elder?[friendly,trusted]"),
            Predicate::Status {
                npc: "elder".to_string(),
                test: Membership::AnyOf,
                values: vec![RelationshipStatus::Friendly, RelationshipStatus::Trusted],
            }
        );
    }

    #[test]
    fn test_parse_collections() {
        assert_eq!(
            single("ITEMS?[iron_key, rope]"),
            Predicate::Collection {
                property: CollectionProperty::Items,
                test: Membership::AnyOf,
                values: vec!["iron_key".to_string(), "rope".to_string()],
            }
        );
        assert_eq!(
            single("DEFEATED!=ironclad_golem"),
            Predicate::Collection {
                property: CollectionProperty::Defeated,
                test: Membership::NoneOf,
                values: vec!["ironclad_golem".to_string()],
            }
        );
        assert_eq!(
            single("DOMINANT=Paper"),
            Predicate::Dominant {
                test: Membership::AnyOf,
                values: vec![MoveType::Paper],
            }
        );
    }

    #[test]
    fn test_spaces_around_operator() {
        assert_eq!(single("LEVEL >= 3"), single("LEVEL>=3"));
    }

    #[test]
    fn test_precedence_and_grouping() {
        // A | B & C parses as A | (B & C)
        match parse("ROCK>5 | PAPER>5 & SCISSORS>5").unwrap() {
            Expr::Or(_, right) => assert!(matches!(*right, Expr::And(_, _))),
            other => panic!("Expected OR, got {:?}", other),
        }
        match parse("(FLAG.a=1 | REL.elder>0) & LEVEL>=5").unwrap() {
            Expr::And(left, _) => assert!(matches!(*left, Expr::Or(_, _))),
            other => panic!("Expected AND, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_property_rejected() {
        for condition in ["MANA=0", "ROCKS>=50", "QUEST.main=1", "FLAG.=1", "rock>5"] {
            match parse(condition) {
                Err(AetherisError::InvalidCondition(message)) => {
                    assert!(message.contains("Unknown property"), "{}: {}", condition, message)
                }
                other => panic!("{} parsed as {:?}", condition, other),
            }
        }
        assert!(parse("LEVEL>=1 & BATLES_WON>=1").is_err());
    }

    #[test]
    fn test_value_type_mismatches() {
        assert!(parse("ITEMS>3").is_err());
        assert!(parse("ROCK=high").is_err());
        assert!(parse("ROCK?[1,2]").is_err());
        assert!(parse("DOMINANT=lizard").is_err());
        assert!(parse("STATUS.elder=besties").is_err());
        assert!(parse("ITEMS=[rope]").is_err());
        assert!(parse("ITEMS?rope").is_err());
        assert!(parse("LEVEL>inf").is_err());
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("(ROCK>5").is_err());
        assert!(parse("ROCK>5)").is_err());
        assert!(parse("ROCK").is_err());
        assert!(parse("ROCK>").is_err());
        assert!(parse("ITEMS?[]").is_err());
        assert!(parse("ROCK>5 &").is_err());
        assert!(parse("& ROCK>5").is_err());
        assert!(parse("()").is_err());
    }
}
