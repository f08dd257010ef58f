//! Truthiness, short-circuit logic and conditional expression tests

use super::{assert_false, assert_true, eval, int, num, text};
use vsql_eval::VsqlValue;

// ============================================================================
// Truthiness
// ============================================================================

#[test]
fn test_falsy_values() {
    assert_false("bool(None)");
    assert_false("bool(False)");
    assert_false("bool(0)");
    assert_false("bool(0.0)");
    assert_false("bool('')");
    assert_false("bool([])");
    assert_false("bool({})");
    assert_false("bool(days(0))");
    assert_false("bool(timedelta(0, 0))");
    assert_false("bool(months(0))");
}

#[test]
fn test_truthy_values() {
    assert_true("bool(True)");
    assert_true("bool(-1)");
    assert_true("bool(0.5)");
    assert_true("bool('gurk')");
    assert_true("bool([None])");
    assert_true("bool({0})");
    assert_true("bool(days(-1))");
    assert_true("bool(timedelta(0, 1))");
    assert_true("bool(months(1))");
    assert_true("bool(@(2000-02-29))");
    assert_true("bool(#000)");
}

#[test]
fn test_nan_is_truthy() {
    assert_true("bool(float('nan'))");
}

// ============================================================================
// not
// ============================================================================

#[test]
fn test_not() {
    assert_true("not None");
    assert_true("not 0");
    assert_true("not ''");
    assert_true("not []");
    assert_false("not 42");
    assert_false("not 'gurk'");
    assert_true("not not 17");
}

// ============================================================================
// and / or
// ============================================================================

#[test]
fn test_and_returns_operand() {
    assert_eq!(eval("17 and 23"), int(23));
    assert_eq!(eval("0 and 23"), int(0));
    assert_eq!(eval("'' and 'gurk'"), text(""));
    assert_eq!(eval("None and 42"), VsqlValue::Null);
    assert_eq!(eval("1.5 and 'gurk'"), text("gurk"));
}

#[test]
fn test_or_returns_operand() {
    assert_eq!(eval("17 or 23"), int(17));
    assert_eq!(eval("0 or 23"), int(23));
    assert_eq!(eval("'' or 'gurk'"), text("gurk"));
    assert_eq!(eval("None or None"), VsqlValue::Null);
    assert_eq!(eval("0 or 0.0"), num(0.0));
}

#[test]
fn test_and_short_circuits() {
    // the right operand would fail if evaluated
    assert_eq!(eval("0 and 1 / 0"), int(0));
    assert_eq!(eval("None and unknown_name"), VsqlValue::Null);
}

#[test]
fn test_or_short_circuits() {
    assert_eq!(eval("17 or 1 / 0"), int(17));
    assert_eq!(eval("'gurk' or unknown_name"), text("gurk"));
}

#[test]
fn test_chained_logic() {
    assert_eq!(eval("1 and 2 and 3"), int(3));
    assert_eq!(eval("0 or '' or 42"), int(42));
    assert_eq!(eval("1 and 0 or 3"), int(3));
}

// ============================================================================
// Conditional expressions
// ============================================================================

#[test]
fn test_conditional() {
    assert_eq!(eval("17 if True else 23"), int(17));
    assert_eq!(eval("17 if False else 23"), int(23));
    assert_eq!(eval("'a' if [] else 'b'"), text("b"));
    assert_eq!(eval("'a' if None else 'b'"), text("b"));
}

#[test]
fn test_conditional_is_lazy() {
    assert_eq!(eval("17 if True else 1 / 0"), int(17));
    assert_eq!(eval("1 / 0 if False else 23"), int(23));
}

#[test]
fn test_conditional_precedence() {
    // the condition binds tighter than the conditional itself
    assert_eq!(eval("1 if 0 or 1 else 2"), int(1));
    assert_eq!(eval("1 + 1 if False else 2 + 2"), int(4));
}
