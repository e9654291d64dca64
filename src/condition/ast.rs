//! Typed condition expressions
//!
//! Property names are resolved when a condition is parsed, so evaluation
//! never looks anything up by string.

use std::fmt;

use crate::config::MoveType;
use crate::dialogue::RelationshipStatus;

/// Parsed condition expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Test(Predicate),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// One comparison, typed by the kind of property it reads
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `LEVEL>=3`, `REL.elder<0`, `FLAG.met_elder=1`
    Number {
        property: NumberProperty,
        comparison: Comparison,
        value: f64,
    },
    /// `DOMINANT=rock`
    Dominant { test: Membership, values: Vec<MoveType> },
    /// `STATUS.elder?[friendly,trusted]`
    Status {
        npc: String,
        test: Membership,
        values: Vec<RelationshipStatus>,
    },
    /// `ITEMS?[iron_key]`, `DEFEATED=ironclad_golem`
    Collection {
        property: CollectionProperty,
        test: Membership,
        values: Vec<String>,
    },
}

/// Numeric game-state properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberProperty {
    Alignment(MoveType),
    Level,
    Xp,
    Gold,
    Hp,
    BattlesWon,
    BattlesLost,
    SymbolBreaks,
    Rounds,
    /// 1 when the story flag is set, else 0
    Flag(String),
    Relationship(String),
}

/// Id-list properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionProperty {
    Items,
    Flags,
    Defeated,
}

/// Numeric comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
}

impl Comparison {
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Comparison::Greater => left > right,
            Comparison::Less => left < right,
            Comparison::GreaterEqual => left >= right,
            Comparison::LessEqual => left <= right,
            Comparison::Equal => left == right,
            Comparison::NotEqual => left != right,
        }
    }
}

/// Set test against a list of ids
///
/// `=x` and `?[..]` both read as `AnyOf`; `!=x` and `![..]` as `NoneOf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    AnyOf,
    NoneOf,
}

impl Membership {
    pub fn holds(self, any_present: bool) -> bool {
        match self {
            Membership::AnyOf => any_present,
            Membership::NoneOf => !any_present,
        }
    }
}

/// Property named on the left-hand side of a predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Number(NumberProperty),
    Dominant,
    Status(String),
    Collection(CollectionProperty),
}

impl Property {
    /// Resolve a property name, `None` when the game has no such property
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some((prefix, key)) = name.split_once('.') {
            if key.is_empty() {
                return None;
            }
            let key = key.to_string();
            return match prefix {
                "FLAG" => Some(Property::Number(NumberProperty::Flag(key))),
                "REL" => Some(Property::Number(NumberProperty::Relationship(key))),
                "STATUS" => Some(Property::Status(key)),
                _ => None,
            };
        }

        let property = match name {
            "ROCK" => Property::Number(NumberProperty::Alignment(MoveType::Rock)),
            "PAPER" => Property::Number(NumberProperty::Alignment(MoveType::Paper)),
            "SCISSORS" => Property::Number(NumberProperty::Alignment(MoveType::Scissors)),
            "DOMINANT" => Property::Dominant,
            "LEVEL" => Property::Number(NumberProperty::Level),
            "XP" => Property::Number(NumberProperty::Xp),
            "GOLD" => Property::Number(NumberProperty::Gold),
            "HP" => Property::Number(NumberProperty::Hp),
            "BATTLES_WON" => Property::Number(NumberProperty::BattlesWon),
            "BATTLES_LOST" => Property::Number(NumberProperty::BattlesLost),
            "SYMBOL_BREAKS" => Property::Number(NumberProperty::SymbolBreaks),
            "ROUNDS" => Property::Number(NumberProperty::Rounds),
            "ITEMS" => Property::Collection(CollectionProperty::Items),
            "FLAGS" => Property::Collection(CollectionProperty::Flags),
            "DEFEATED" => Property::Collection(CollectionProperty::Defeated),
            _ => return None,
        };
        Some(property)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::GreaterEqual => ">=",
            Comparison::LessEqual => "<=",
            Comparison::Equal => "=",
            Comparison::NotEqual => "!=",
        })
    }
}
