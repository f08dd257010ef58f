//! Operator implementations
//!
//! Each module holds free functions over already-evaluated values; the
//! engine evaluates operands (handling short-circuiting where the language
//! requires it) and dispatches here.

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod container;
pub mod logical;

pub use arithmetic::{add, divide, floor_divide, modulo, multiply, negate, subtract};
pub use bitwise::{bit_and, bit_not, bit_or, bit_xor, shift_left, shift_right};
pub use comparison::{compare_values, values_equal};
pub use container::{contains, dedup_set, index, slice};
pub use logical::logical_not;
