//! Operator precedence levels.

use serde::{Deserialize, Serialize};

/// Binding strength, loosest first.
///
/// Only the levels from `NullishCoalescing` to `Exponentiation` are driven by
/// the binary table; the others are fixed by the shape of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma = 1,
    Assignment = 2,
    Conditional = 3,
    NullishCoalescing = 4,
    LogicalOr = 5,
    LogicalAnd = 6,
    BitwiseOr = 7,
    BitwiseXor = 8,
    BitwiseAnd = 9,
    Equality = 10,
    Relational = 11,
    Shift = 12,
    Additive = 13,
    Multiplicative = 14,
    Exponentiation = 15,
    Unary = 16,
    Member = 17,
    Primary = 18,
}

impl OperatorPrecedence {
    /// Whether binary operators may be assigned this level.
    pub fn is_binary_level(self) -> bool {
        (OperatorPrecedence::NullishCoalescing..=OperatorPrecedence::Exponentiation).contains(&self)
    }

    /// The next tighter level. `Primary` is the tightest.
    pub fn tighter(self) -> OperatorPrecedence {
        use OperatorPrecedence::*;
        match self {
            Comma => Assignment,
            Assignment => Conditional,
            Conditional => NullishCoalescing,
            NullishCoalescing => LogicalOr,
            LogicalOr => LogicalAnd,
            LogicalAnd => BitwiseOr,
            BitwiseOr => BitwiseXor,
            BitwiseXor => BitwiseAnd,
            BitwiseAnd => Equality,
            Equality => Relational,
            Relational => Shift,
            Shift => Additive,
            Additive => Multiplicative,
            Multiplicative => Exponentiation,
            Exponentiation => Unary,
            Unary => Member,
            Member | Primary => Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Associativity {
    #[default]
    Left,
    Right,
}

/// How tightly a binary operator binds and in which direction it groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinaryBinding {
    pub level: OperatorPrecedence,
    #[serde(default)]
    pub associativity: Associativity,
}

impl BinaryBinding {
    pub const fn left(level: OperatorPrecedence) -> Self {
        Self {
            level,
            associativity: Associativity::Left,
        }
    }

    pub const fn right(level: OperatorPrecedence) -> Self {
        Self {
            level,
            associativity: Associativity::Right,
        }
    }

    /// The loosest level allowed in the right operand. A left-associative
    /// operator stops at its own level so `a - b - c` groups to the left.
    pub fn operand_level(self) -> OperatorPrecedence {
        match self.associativity {
            Associativity::Left => self.level.tighter(),
            Associativity::Right => self.level,
        }
    }
}
