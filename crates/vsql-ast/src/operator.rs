//! vSQL operators with precedence information

use serde::{Deserialize, Serialize};

/// Binary operators in vSQL with their precedence
///
/// The conditional expression `A if C else B` binds loosest of all and is not
/// represented here; `not` sits between `and` and the comparison group and is
/// a [`UnaryOp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Precedence 1 (lowest)
    /// Logical or (short-circuiting, returns an operand)
    Or,

    // Precedence 2
    /// Logical and (short-circuiting, returns an operand)
    And,

    // Precedence 4 (3 is `not`)
    /// Equality
    Eq,
    /// Inequality
    Ne,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Null test (x is None)
    Is,
    /// Negated null test (x is not None)
    IsNot,
    /// Membership test
    In,
    /// Negated membership test
    NotIn,

    // Precedence 5
    /// Bitwise or / set union
    BitOr,

    // Precedence 6
    /// Bitwise xor / symmetric set difference
    BitXor,

    // Precedence 7
    /// Bitwise and / set intersection
    BitAnd,

    // Precedence 8
    /// Shift left
    Shl,
    /// Shift right (arithmetic)
    Shr,

    // Precedence 9
    /// Addition / concatenation
    Add,
    /// Subtraction
    Sub,

    // Precedence 10 (highest for binary)
    /// Multiplication / repetition
    Mul,
    /// True division (always Number)
    Div,
    /// Floor division
    FloorDiv,
    /// Modulo (sign follows the right operand) / color compositing
    Mod,
}

impl BinaryOp {
    /// Get the precedence level (1-10, higher binds tighter)
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq
            | Self::Ne
            | Self::Lt
            | Self::Le
            | Self::Gt
            | Self::Ge
            | Self::Is
            | Self::IsNot
            | Self::In
            | Self::NotIn => 4,
            Self::BitOr => 5,
            Self::BitXor => 6,
            Self::BitAnd => 7,
            Self::Shl | Self::Shr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::FloorDiv | Self::Mod => 10,
        }
    }

    /// Check if this is a comparison operator
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::Ne
                | Self::Lt
                | Self::Le
                | Self::Gt
                | Self::Ge
                | Self::Is
                | Self::IsNot
                | Self::In
                | Self::NotIn
        )
    }

    /// Check if this is a short-circuiting logical operator
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Check if this is an arithmetic operator
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::FloorDiv | Self::Mod
        )
    }

    /// Check if this is a bitwise/set operator
    pub const fn is_bitwise(&self) -> bool {
        matches!(
            self,
            Self::BitOr | Self::BitXor | Self::BitAnd | Self::Shl | Self::Shr
        )
    }

    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
        }
    }
}

/// Unary operators in vSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical not (always Bool, does not propagate Null)
    Not,
    /// Arithmetic negation
    Neg,
    /// Bitwise complement
    BitNot,
}

impl UnaryOp {
    /// Get the precedence level
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Not => 3,
            Self::Neg | Self::BitNot => 11,
        }
    }

    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Neg => "-",
            Self::BitNot => "~",
        }
    }
}
