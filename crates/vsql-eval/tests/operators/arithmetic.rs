//! Arithmetic operator tests

use super::{assert_range_error, assert_true, assert_type_error, eval, int, num, text};
use vsql_eval::VsqlValue;

// ============================================================================
// Numeric promotion
// ============================================================================

#[test]
fn test_int_arithmetic() {
    assert_eq!(eval("1 + 2"), int(3));
    assert_eq!(eval("10 - 4"), int(6));
    assert_eq!(eval("6 * 7"), int(42));
    assert_eq!(eval("2 + 3 * 4"), int(14));
}

#[test]
fn test_bool_promotes_to_int() {
    assert_eq!(eval("True + True"), int(2));
    assert_eq!(eval("True + 1"), int(2));
    assert_eq!(eval("False * 42"), int(0));
    assert_eq!(eval("-True"), int(-1));
}

#[test]
fn test_number_contaminates() {
    assert_eq!(eval("1 + 2.5"), num(3.5));
    assert_eq!(eval("2.5 - 0.5"), num(2.0));
    assert_eq!(eval("True + 0.5"), num(1.5));
    assert_eq!(eval("2 * 3.5"), num(7.0));
}

#[test]
fn test_true_division_always_number() {
    assert_eq!(eval("1 / 2"), num(0.5));
    assert_eq!(eval("4 / 2"), num(2.0));
    assert_eq!(eval("5.0 / 2"), num(2.5));
}

#[test]
fn test_unary_minus() {
    assert_eq!(eval("-42"), int(-42));
    assert_eq!(eval("-(-42)"), int(42));
    assert_eq!(eval("-42.5"), num(-42.5));
    assert_eq!(eval("-None"), VsqlValue::Null);
    assert_type_error("-'gurk'");
}

#[test]
fn test_integer_overflow() {
    assert_range_error("9223372036854775807 + 1");
    assert_range_error("-9223372036854775807 - 2");
    assert_range_error("9223372036854775807 * 2");
}

// ============================================================================
// Floor division and modulo
// ============================================================================

#[test]
fn test_floor_division_rounds_down() {
    assert_eq!(eval("7 // 2"), int(3));
    assert_eq!(eval("-7 // 2"), int(-4));
    assert_eq!(eval("7 // -2"), int(-4));
    assert_eq!(eval("-7 // -2"), int(3));
}

#[test]
fn test_floor_division_numbers() {
    assert_eq!(eval("42.5 // 3.5"), num(12.0));
    assert_eq!(eval("-42.5 // 3.5"), num(-13.0));
    assert_eq!(eval("7 // 2.0"), num(3.0));
}

#[test]
fn test_modulo_takes_divisor_sign() {
    assert_eq!(eval("7 % 3"), int(1));
    assert_eq!(eval("-7 % 3"), int(2));
    assert_eq!(eval("7 % -3"), int(-2));
    assert_eq!(eval("-7 % -3"), int(-1));
}

#[test]
fn test_modulo_numbers() {
    assert_eq!(eval("42.5 % 3.5"), num(0.5));
    assert_eq!(eval("-42.5 % 3.5"), num(3.0));
}

#[test]
fn test_division_by_zero() {
    assert_range_error("1 / 0");
    assert_range_error("1 // 0");
    assert_range_error("1 % 0");
    assert_range_error("1.5 / 0.0");
    assert_range_error("1.5 % 0.0");
    assert_range_error("days(12) // 0");
}

// ============================================================================
// Null propagation
// ============================================================================

#[test]
fn test_null_propagates() {
    assert_eq!(eval("None + 1"), VsqlValue::Null);
    assert_eq!(eval("1 - None"), VsqlValue::Null);
    assert_eq!(eval("None * None"), VsqlValue::Null);
    assert_eq!(eval("None / 0"), VsqlValue::Null);
    assert_eq!(eval("None % 0"), VsqlValue::Null);
}

// ============================================================================
// Strings and lists
// ============================================================================

#[test]
fn test_concatenation() {
    assert_eq!(eval("'foo' + 'bar'"), text("foobar"));
    assert_eq!(eval("'' + 'x'"), text("x"));
    assert_true("[1] + [2, 3] == [1, 2, 3]");
    assert_true("[] + [] == []");
}

#[test]
fn test_concatenation_does_not_promote() {
    // Elements keep their type; only `==` promotes elementwise
    assert_true("[1, 2] + [3.5, 4.5] == [1.0, 2.0, 3.5, 4.5]");
}

#[test]
fn test_string_repetition() {
    assert_eq!(eval("'ab' * 3"), text("ababab"));
    assert_eq!(eval("3 * 'ab'"), text("ababab"));
    assert_eq!(eval("'ab' * True"), text("ab"));
    assert_eq!(eval("'ab' * 0"), text(""));
    assert_eq!(eval("'ab' * -2"), text(""));
    assert_eq!(eval("'ab' * None"), VsqlValue::Null);
}

#[test]
fn test_list_repetition() {
    assert_true("[1, 2] * 2 == [1, 2, 1, 2]");
    assert_true("2 * [1] == [1, 1]");
    assert_true("[1] * 0 == []");
    assert_true("[1] * -1 == []");
    // An emptied list is falsy, so `and` hands it back unchanged
    assert_true("(0 * [1] and [4, 5, 6]) == 0 * [1]");
}

#[test]
fn test_repetition_result_capped() {
    assert_range_error("'x' * 99999999999");
    assert_range_error("[1, 2] * 987654321987");
}

#[test]
fn test_mixed_sequence_multiply_fails() {
    assert_type_error("'ab' * 'cd'");
    assert_type_error("[1] * [2]");
    assert_type_error("'ab' * 1.5");
}

// ============================================================================
// Dates and deltas
// ============================================================================

#[test]
fn test_date_plus_days() {
    assert_true("@(2000-02-28) + days(1) == @(2000-02-29)");
    assert_true("@(2000-02-29) + days(1) == @(2000-03-01)");
    assert_true("days(1) + @(2000-02-28) == @(2000-02-29)");
    assert_true("@(2000-12-31) + days(1) == @(2001-01-01)");
}

#[test]
fn test_month_arithmetic_clamps() {
    assert_true("@(2000-01-31) + months(1) == @(2000-02-29)");
    assert_true("@(2001-01-31) + months(1) == @(2001-02-28)");
    assert_true("@(2000-03-31) - months(1) == @(2000-02-29)");
    assert_true("months(1) + @(2000-01-31) == @(2000-02-29)");
    assert_true("@(2000-11-15) + months(3) == @(2001-02-15)");
}

#[test]
fn test_date_differences() {
    assert_true("@(2000-03-01) - @(2000-02-29) == days(1)");
    assert_true("@(2001-03-01) - @(2000-03-01) == days(365)");
    assert_true("@(2000-02-28) - @(2000-03-01) == days(-2)");
    assert_true("@(2000-03-01T12:00) - @(2000-02-29T06:00) == timedelta(1, 21600)");
}

#[test]
fn test_datetime_plus_delta() {
    assert_true("@(2000-02-29T12:34:56) + timedelta(0, 4) == @(2000-02-29T12:35)");
    assert_true("@(2000-02-29T23:00) + hours(2) == @(2000-03-01T01:00)");
    assert_true("@(2000-02-29T12:00) + days(1) == @(2000-03-01T12:00)");
    assert_true("@(2000-01-31T12:34) + months(1) == @(2000-02-29T12:34)");
}

#[test]
fn test_date_plus_seconds_delta_becomes_datetime() {
    assert_true("@(2000-02-28) + timedelta(1, 3600) == @(2000-02-29T01:00)");
    assert_true("@(2000-03-01) - timedelta(0, 1) == @(2000-02-29T23:59:59)");
}

#[test]
fn test_delta_sums() {
    assert_true("days(12) + timedelta(1, 1) == timedelta(13, 1)");
    assert_true("days(12) - hours(12) == timedelta(11, 43200)");
    assert_true("days(1) + days(2) == days(3)");
    assert_true("months(3) - months(12) == months(-9)");
    assert_true("timedelta(1, 1) + timedelta(1, 86399) == timedelta(3)");
}

#[test]
fn test_delta_scaling() {
    assert_true("2 * days(6) == days(12)");
    assert_true("days(6) * 2 == days(12)");
    assert_true("months(3) * 4 == years(1)");
    assert_true("2.5 * timedelta(1, 45296) == timedelta(3, 70040)");
    assert_true("timedelta(1, 45296) * 2.5 == timedelta(3, 70040)");
}

#[test]
fn test_delta_division() {
    assert_true("timedelta(1, 45296) / 12.5 == timedelta(0, 10536)");
    assert_true("days(12) / 5 == timedelta(2, 34560)");
    assert_true("timedelta(1, 45296) // 2 == days(0)");
    assert_true("timedelta(1, 45296) // True == days(1)");
    assert_true("days(12) // 5 == days(2)");
    assert_true("months(3) // 2 == months(1)");
}

#[test]
fn test_fractional_day_and_month_scaling_fails() {
    assert_type_error("42.5 * days(1)");
    assert_type_error("1.5 * months(2)");
    assert_type_error("months(3) / 2");
    assert_type_error("days(1) // 2.0");
}

#[test]
fn test_unsupported_temporal_combinations() {
    assert_type_error("@(2000-01-01) + 1");
    assert_type_error("@(2000-01-01) + @(2000-01-02)");
    assert_type_error("1 - @(2000-01-01)");
    assert_type_error("days(1) + months(1)");
    assert_type_error("'gurk' + 1");
}

#[test]
fn test_negated_deltas() {
    assert_true("-days(12) == days(-12)");
    assert_true("-months(3) == months(-3)");
    assert_true("-timedelta(1, 45296) == timedelta(-2, 41104)");
}

#[test]
fn test_date_result_out_of_range() {
    assert_range_error("@(2000-01-01) + days(999999999999)");
}
