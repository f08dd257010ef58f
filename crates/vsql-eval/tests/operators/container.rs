//! Indexing and slicing tests

use super::{assert_range_error, assert_true, assert_type_error, eval, int, text};
use vsql_eval::VsqlValue;

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn test_list_indexing() {
    assert_eq!(eval("[17, 23, 42][0]"), int(17));
    assert_eq!(eval("[17, 23, 42][2]"), int(42));
    assert_eq!(eval("[17, 23, 42][-1]"), int(42));
    assert_eq!(eval("[17, 23, 42][-3]"), int(17));
}

#[test]
fn test_bool_index_promotes_to_int() {
    assert_eq!(eval("[17, 23, 42][True]"), int(23));
    assert_eq!(eval("[17, 23, 42][False]"), int(17));
}

#[test]
fn test_string_indexing_yields_one_char_string() {
    assert_eq!(eval("'gurk'[0]"), text("g"));
    assert_eq!(eval("'gurk'[-1]"), text("k"));
    assert_eq!(eval("'gürk'[1]"), text("ü"));
}

#[test]
fn test_list_out_of_bounds() {
    assert_range_error("[17, 23, 42][3]");
    assert_range_error("[17, 23, 42][-4]");
}

#[test]
fn test_sparse_list_out_of_bounds_is_null() {
    // lists holding no concrete values swallow bad indexes
    assert_eq!(eval("[][42]"), VsqlValue::Null);
    assert_eq!(eval("[None, None][5]"), VsqlValue::Null);
    assert_range_error("[None, 1][5]");
}

#[test]
fn test_string_out_of_bounds() {
    assert_range_error("'gurk'[4]");
    assert_range_error("'gurk'[-5]");
    assert_range_error("''[0]");
}

#[test]
fn test_index_null_propagation() {
    assert_eq!(eval("None[0]"), VsqlValue::Null);
    assert_eq!(eval("[1, 2, 3][None]"), VsqlValue::Null);
    assert_eq!(eval("'gurk'[None]"), VsqlValue::Null);
}

#[test]
fn test_index_type_errors() {
    assert_type_error("{1, 2, 3}[0]");
    assert_type_error("42[0]");
    assert_type_error("[1, 2, 3]['a']");
    assert_type_error("[1, 2, 3][1.5]");
}

// ============================================================================
// Slicing
// ============================================================================

#[test]
fn test_list_slicing() {
    assert_true("[1, 2, 3, 4][1:3] == [2, 3]");
    assert_true("[1, 2, 3, 4][:2] == [1, 2]");
    assert_true("[1, 2, 3, 4][2:] == [3, 4]");
    assert_true("[1, 2, 3, 4][:] == [1, 2, 3, 4]");
    assert_true("[1, 2, 3, 4][-2:] == [3, 4]");
    assert_true("[1, 2, 3, 4][:-1] == [1, 2, 3]");
}

#[test]
fn test_string_slicing() {
    assert_eq!(eval("'gurk'[1:3]"), text("ur"));
    assert_eq!(eval("'gurk'[:2]"), text("gu"));
    assert_eq!(eval("'gurk'[-2:]"), text("rk"));
    assert_eq!(eval("'gürk'[1:2]"), text("ü"));
}

#[test]
fn test_slices_clamp_instead_of_failing() {
    assert_true("[1, 2, 3][1:100] == [2, 3]");
    assert_true("[1, 2, 3][-100:1] == [1]");
    assert_true("[1, 2, 3][2:1] == []");
    assert_true("[1, 2, 3][100:] == []");
    assert_eq!(eval("'gurk'[2:100]"), text("rk"));
    assert_eq!(eval("'gurk'[3:2]"), text(""));
}

#[test]
fn test_null_slice_bounds_are_open() {
    assert_true("[1, 2, 3][None:2] == [1, 2]");
    assert_true("[1, 2, 3][1:None] == [2, 3]");
    assert_true("[1, 2, 3][None:None] == [1, 2, 3]");
}

#[test]
fn test_slice_null_propagation() {
    assert_eq!(eval("None[1:2]"), VsqlValue::Null);
}

#[test]
fn test_slice_type_errors() {
    assert_type_error("[1, 2, 3]['a':2]");
    assert_type_error("[1, 2, 3][1:2.5]");
    assert_type_error("{1, 2}[0:1]");
    assert_type_error("42[0:1]");
}
