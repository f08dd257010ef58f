//! Bitwise and set operator tests

use super::{assert_range_error, assert_true, assert_type_error, eval, int};
use vsql_eval::VsqlValue;

// ============================================================================
// Integer bitwise
// ============================================================================

#[test]
fn test_bitwise_and_or_xor() {
    assert_eq!(eval("1777 & 313"), int(49));
    assert_eq!(eval("1777 | 313"), int(2041));
    assert_eq!(eval("1777 ^ 313"), int(1992));
}

#[test]
fn test_bitwise_negative_operands() {
    // Two's complement semantics
    assert_eq!(eval("-1777 & 313"), int(265));
    assert_eq!(eval("-1777 | 313"), int(-1729));
    assert_eq!(eval("-1777 ^ 313"), int(-1994));
}

#[test]
fn test_bitwise_on_bools_yields_int() {
    assert_eq!(eval("False & True"), int(0));
    assert_eq!(eval("True | False"), int(1));
    assert_eq!(eval("True ^ True"), int(0));
}

#[test]
fn test_bit_not() {
    assert_eq!(eval("~42"), int(-43));
    assert_eq!(eval("~~42"), int(42));
    assert_eq!(eval("~True"), int(-2));
    assert_eq!(eval("~False"), int(-1));
    assert_eq!(eval("~None"), VsqlValue::Null);
    assert_type_error("~'gurk'");
}

// ============================================================================
// Shifts
// ============================================================================

#[test]
fn test_shifts() {
    assert_eq!(eval("1777 << 2"), int(7108));
    assert_eq!(eval("1777 >> 2"), int(444));
    assert_eq!(eval("-1777 << 2"), int(-7108));
    assert_eq!(eval("-1777 >> 2"), int(-445));
    assert_eq!(eval("1 << 62"), int(1 << 62));
}

#[test]
fn test_right_shift_saturates() {
    assert_eq!(eval("1777 >> 100"), int(0));
    assert_eq!(eval("-1777 >> 100"), int(-1));
}

#[test]
fn test_left_shift_overflow() {
    assert_range_error("1 << 63");
    assert_range_error("1777 << 60");
    assert_range_error("1 << 100");
    assert_eq!(eval("0 << 100"), int(0));
}

#[test]
fn test_negative_shift_count() {
    assert_range_error("1 << -1");
    assert_range_error("1 >> -1");
}

#[test]
fn test_shift_null_propagation() {
    assert_eq!(eval("None << 2"), VsqlValue::Null);
    assert_eq!(eval("2 >> None"), VsqlValue::Null);
}

// ============================================================================
// Set algebra
// ============================================================================

#[test]
fn test_set_intersection() {
    assert_true("({1, 2, 3} & {2, 3, 4}) == {2, 3}");
    assert_true("({1, 2} & {3, 4}) == {/}");
    assert_true("({'a', 'b'} & {'b'}) == {'b'}");
}

#[test]
fn test_set_union() {
    assert_true("({1} | {2}) == {2, 1}");
    assert_true("({1, 2} | {2, 3}) == {1, 2, 3}");
    assert_true("({/} | {1}) == {1}");
}

#[test]
fn test_set_symmetric_difference() {
    assert_true("({1, 2, 3} ^ {2, 3, 4}) == {1, 4}");
    assert_true("({1} ^ {1}) == {/}");
}

#[test]
fn test_set_membership_uses_promotion() {
    assert_true("({1, 2} & {2.0, 3.0}) == {2}");
    assert_true("({True} | {1}) == {True}");
}

#[test]
fn test_set_difference_not_supported() {
    assert_type_error("{1, 2} - {1}");
}

#[test]
fn test_mixed_set_int_fails() {
    assert_type_error("{1} & 1");
    assert_type_error("1 | {1}");
}
