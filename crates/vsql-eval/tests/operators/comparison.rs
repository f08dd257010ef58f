//! Equality, ordering, membership and null-test operator tests

use super::{assert_false, assert_true, assert_type_error, eval};
use vsql_eval::VsqlValue;

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_equality_within_types() {
    assert_true("None == None");
    assert_true("42 == 42");
    assert_true("'gurk' == 'gurk'");
    assert_false("'gurk' == 'hurz'");
    assert_true("@(2000-02-29) == @(2000-02-29)");
    assert_true("#369c == #369c");
}

#[test]
fn test_equality_promotes_numerics() {
    assert_true("True == 1");
    assert_true("1 == 1.0");
    assert_true("False == 0.0");
    assert_false("True == 2");
}

#[test]
fn test_equality_across_types_is_false() {
    assert_false("42 == 'gurk'");
    assert_false("None == 0");
    assert_false("None == ''");
    assert_false("days(1) == timedelta(1)");
    assert_false("@(2000-02-29) == @(2000-02-29T)");
}

#[test]
fn test_inequality() {
    assert_true("1 != 2");
    assert_false("1 != 1.0");
    assert_true("None != 0");
    assert_false("None != None");
}

#[test]
fn test_list_equality_is_elementwise() {
    assert_true("[1, 2, 3] == [1.0, 2.0, 3.0]");
    assert_false("[1, 2] == [1, 2, 3]");
    assert_true("[None, 1] == [None, True]");
    assert_true("[[1], [2]] == [[1.0], [2.0]]");
}

#[test]
fn test_set_equality_is_unordered() {
    assert_true("{1, 2, 3} == {3, 1, 2}");
    assert_true("{1, 1, 2} == {2, 1}");
    assert_true("{1} == {1.0}");
    assert_false("{1, 2} == {1}");
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_numeric_ordering() {
    assert_true("1 < 2");
    assert_true("1 < 1.5");
    assert_true("False < True");
    assert_true("2 <= 2");
    assert_false("2 > 2");
    assert_true("3.5 >= 2");
}

#[test]
fn test_null_orders_before_everything() {
    assert_true("None < False");
    assert_true("None < -9999");
    assert_true("None <= None");
    assert_false("None < None");
    assert_false("1 < None");
    assert_false("'' < None");
}

#[test]
fn test_string_ordering() {
    assert_true("'gurk' < 'hurz'");
    assert_true("'gurk' < 'gurke'");
    assert_false("'gurk' < 'gurk'");
}

#[test]
fn test_temporal_ordering() {
    assert_true("@(2000-02-29) < @(2000-03-01)");
    assert_true("@(2000-02-29T12:34) < @(2000-02-29T12:35)");
    assert_true("days(1) < days(2)");
    assert_true("timedelta(0, 59) < timedelta(0, 60)");
    assert_true("months(1) < months(2)");
}

#[test]
fn test_list_ordering_is_lexicographic() {
    assert_true("[1, 2] < [1, 3]");
    assert_true("[1, 2] < [1, 2, 0]");
    assert_false("[1, 2] < [1, 2]");
    assert_true("['a'] < ['b']");
}

#[test]
fn test_incomparable_types() {
    assert_type_error("1 < 'gurk'");
    assert_type_error("@(2000-02-29) < @(2000-02-29T)");
    assert_type_error("days(1) < timedelta(1, 1)");
    assert_type_error("days(1) < months(1)");
    assert_type_error("#fff < #000");
    assert_type_error("{1} < {2}");
    assert_type_error("[1] < ['a']");
}

// ============================================================================
// is / is not
// ============================================================================

#[test]
fn test_is_none() {
    assert_true("None is None");
    assert_false("42 is None");
    assert_false("'' is None");
    assert_true("42 is not None");
    assert_false("None is not None");
}

#[test]
fn test_is_requires_none_operand() {
    assert_type_error("1 is 1");
    assert_type_error("None is 42");
    assert_type_error("1 is not 2");
}

// ============================================================================
// in / not in
// ============================================================================

#[test]
fn test_membership_in_lists_and_sets() {
    assert_true("2 in [1, 2, 3]");
    assert_false("4 in [1, 2, 3]");
    assert_true("2.0 in [1, 2, 3]");
    assert_true("2 in {1, 2, 3}");
    assert_true("4 not in {1, 2, 3}");
}

#[test]
fn test_null_needle_is_findable() {
    assert_true("None in [1, None, 2]");
    assert_false("None in []");
    assert_true("None in {None}");
    assert_true("None not in [1, 2]");
}

#[test]
fn test_substring_membership() {
    assert_true("'ur' in 'gurk'");
    assert_false("'ru' in 'gurk'");
    assert_true("'' in 'gurk'");
    assert_true("'xx' not in 'gurk'");
}

#[test]
fn test_membership_null_container() {
    assert_eq!(eval("1 in None"), VsqlValue::Null);
    assert_eq!(eval("1 not in None"), VsqlValue::Null);
    assert_eq!(eval("None in 'gurk'"), VsqlValue::Null);
}

#[test]
fn test_membership_invalid_container() {
    assert_type_error("1 in 42");
    assert_type_error("1 in @(2000-02-29)");
    assert_type_error("1 in 'gurk'");
}

#[test]
fn test_not_binds_looser_than_in() {
    // `not a in b` parses as `not (a in b)`
    assert_true("not 4 in [1, 2, 3]");
    assert_false("not 2 in [1, 2, 3]");
}
