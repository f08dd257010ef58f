//! Builtin function tests

use pretty_assertions::assert_eq;
use rstest::rstest;
use vsql_eval::{Environment, VsqlEngine, VsqlError, VsqlValue};

fn eval(source: &str) -> VsqlValue {
    let expr = vsql_parser::parse_expression(source)
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {err}"));
    VsqlEngine::new()
        .evaluate(&expr, &Environment::new())
        .unwrap_or_else(|err| panic!("evaluation failed for {source:?}: {err}"))
}

fn eval_err(source: &str) -> VsqlError {
    let expr = vsql_parser::parse_expression(source)
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {err}"));
    match VsqlEngine::new().evaluate(&expr, &Environment::new()) {
        Ok(value) => panic!("expected error for {source:?}, got {value:?}"),
        Err(err) => err,
    }
}

fn assert_true(source: &str) {
    assert_eq!(eval(source), VsqlValue::Bool(true), "source: {source}");
}

fn assert_type_error(source: &str) {
    let err = eval_err(source);
    assert!(matches!(err, VsqlError::Type { .. }), "{source}: {err:?}");
}

fn assert_range_error(source: &str) {
    let err = eval_err(source);
    assert!(matches!(err, VsqlError::Range { .. }), "{source}: {err:?}");
}

// ============================================================================
// Date and time
// ============================================================================

#[test]
fn test_today_and_now() {
    assert!(matches!(eval("today()"), VsqlValue::Date(_)));
    assert!(matches!(eval("now()"), VsqlValue::DateTime(_)));
    // left operand is evaluated first, so it can never be the later instant
    assert_true("today() <= now().date");
    assert_true("now() - now() <= timedelta(0)");
}

#[test]
fn test_date_constructor() {
    assert_true("date(2000, 2, 29) == @(2000-02-29)");
    assert_true("date(@(2000-02-29)) == @(2000-02-29)");
    assert_true("date(@(2000-02-29T12:34:56)) == @(2000-02-29)");
    assert_eq!(eval("date(None, 2, 29)"), VsqlValue::Null);
}

#[test]
fn test_date_constructor_failures() {
    assert_range_error("date(2000, 2, 30)");
    assert_range_error("date(1999, 2, 29)");
    assert_range_error("date(2000, 13, 1)");
    assert_range_error("date(2000, 0, 1)");
    assert_type_error("date(2000, 2)");
    assert_type_error("date('gurk')");
    assert_type_error("date(2000.0, 2, 29)");
}

#[test]
fn test_datetime_constructor() {
    assert_true("datetime(2000, 2, 29) == @(2000-02-29T)");
    assert_true("datetime(2000, 2, 29, 12) == @(2000-02-29T12:00)");
    assert_true("datetime(2000, 2, 29, 12, 34) == @(2000-02-29T12:34)");
    assert_true("datetime(2000, 2, 29, 12, 34, 56) == @(2000-02-29T12:34:56)");
    assert_true("datetime(@(2000-02-29)) == @(2000-02-29T)");
    assert_true("datetime(@(2000-02-29), 12, 34) == @(2000-02-29T12:34)");
    assert_true("datetime(@(2000-02-29T12:34:56)) == @(2000-02-29T12:34:56)");
    assert_eq!(eval("datetime(2000, None, 29)"), VsqlValue::Null);
}

#[test]
fn test_datetime_constructor_failures() {
    assert_range_error("datetime(2000, 2, 30)");
    assert_range_error("datetime(2000, 2, 29, 24)");
    assert_range_error("datetime(2000, 2, 29, 12, 60)");
    assert_type_error("datetime(2000, 2)");
    assert_type_error("datetime(@(2000-02-29T12:34:56), 12)");
}

// ============================================================================
// Delta constructors
// ============================================================================

#[rstest]
#[case("timedelta()", "timedelta(0)")]
#[case("timedelta(0, 86400)", "days(1)")]
#[case("timedelta(0, -1)", "timedelta(-1, 86399)")]
#[case("timedelta(2, 90000)", "timedelta(3, 3600)")]
#[case("monthdelta()", "months(0)")]
#[case("monthdelta(3)", "months(3)")]
#[case("years(2)", "months(24)")]
#[case("weeks(2)", "days(14)")]
#[case("hours(42)", "timedelta(1, 64800)")]
#[case("minutes(90)", "timedelta(0, 5400)")]
#[case("seconds(42)", "timedelta(0, 42)")]
#[case("seconds(-42)", "timedelta(-1, 86358)")]
fn test_delta_constructors(#[case] left: &str, #[case] right: &str) {
    assert_true(&format!("{left} == {right}"));
}

#[test]
fn test_delta_constructor_failures() {
    assert_type_error("timedelta(1.5)");
    assert_type_error("timedelta('gurk')");
    assert_type_error("monthdelta(1.5)");
    assert_type_error("days('gurk')");
    assert_type_error("hours(1.5)");
}

#[test]
fn test_delta_null_propagation() {
    assert_eq!(eval("timedelta(None)"), VsqlValue::Null);
    assert_eq!(eval("days(None)"), VsqlValue::Null);
    assert_eq!(eval("months(None)"), VsqlValue::Null);
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_bool_is_total() {
    assert_eq!(eval("bool()"), VsqlValue::Bool(false));
    assert_eq!(eval("bool(None)"), VsqlValue::Bool(false));
    assert_eq!(eval("bool(42)"), VsqlValue::Bool(true));
}

#[test]
fn test_int_conversion() {
    assert_eq!(eval("int(42)"), VsqlValue::Int(42));
    assert_eq!(eval("int(True)"), VsqlValue::Int(1));
    assert_eq!(eval("int(False)"), VsqlValue::Int(0));
    assert_eq!(eval("int(42.9)"), VsqlValue::Int(42));
    assert_eq!(eval("int(-42.9)"), VsqlValue::Int(-42));
    assert_eq!(eval("int('1777')"), VsqlValue::Int(1777));
    assert_eq!(eval("int(' 42 ')"), VsqlValue::Int(42));
    assert_eq!(eval("int('-17')"), VsqlValue::Int(-17));
}

#[test]
fn test_int_conversion_misses() {
    assert_eq!(eval("int()"), VsqlValue::Null);
    assert_eq!(eval("int(None)"), VsqlValue::Null);
    assert_eq!(eval("int('42.5')"), VsqlValue::Null);
    assert_eq!(eval("int('verybad')"), VsqlValue::Null);
    assert_range_error("int(1e19)");
    assert_range_error("int(float('nan'))");
    assert_type_error("int([1])");
}

#[test]
fn test_float_conversion() {
    assert_eq!(eval("float(42)"), VsqlValue::Number(42.0));
    assert_eq!(eval("float(True)"), VsqlValue::Number(1.0));
    assert_eq!(eval("float('42.5')"), VsqlValue::Number(42.5));
    assert_eq!(eval("float('gurk')"), VsqlValue::Null);
    assert_eq!(eval("float()"), VsqlValue::Null);
    assert_eq!(eval("float(None)"), VsqlValue::Null);
    // number() is an alias
    assert_eq!(eval("number('42.5')"), VsqlValue::Number(42.5));
    assert_true("float('nan') != float('nan')");
}

#[test]
fn test_str_conversion() {
    assert_eq!(eval("str('gurk')"), VsqlValue::Str("gurk".into()));
    assert_eq!(eval("str(False)"), VsqlValue::Str("False".into()));
    assert_eq!(eval("str(42)"), VsqlValue::Str("42".into()));
    assert_eq!(eval("str(42.0)"), VsqlValue::Str("42.0".into()));
    assert_eq!(eval("str()"), VsqlValue::Null);
    assert_eq!(eval("str(None)"), VsqlValue::Null);
}

#[test]
fn test_repr_is_total() {
    assert_eq!(eval("repr(None)"), VsqlValue::Str("None".into()));
    assert_eq!(eval("repr(42)"), VsqlValue::Str("42".into()));
    assert_eq!(eval("repr('gurk')"), VsqlValue::Str("'gurk'".into()));
}

#[test]
fn test_list_conversion() {
    assert_true("list('gurk') == ['g', 'u', 'r', 'k']");
    assert_true("list([1, 2]) == [1, 2]");
    assert_true("list({1}) == [1]");
    assert_eq!(eval("list(None)"), VsqlValue::Null);
    assert_type_error("list(42)");
}

#[test]
fn test_set_conversion() {
    assert_true("set('mississippi') == {'m', 'i', 's', 'p'}");
    assert_true("sorted(set('mississippi')) == ['i', 'm', 'p', 's']");
    assert_true("set([1, 1, 2]) == {1, 2}");
    assert_eq!(eval("set(None)"), VsqlValue::Null);
    assert_type_error("set(42)");
}

// ============================================================================
// Math
// ============================================================================

#[test]
fn test_len() {
    assert_eq!(eval("len('gurk')"), VsqlValue::Int(4));
    assert_eq!(eval("len('gürk')"), VsqlValue::Int(4));
    assert_eq!(eval("len('')"), VsqlValue::Int(0));
    assert_eq!(eval("len([1, 2, 3])"), VsqlValue::Int(3));
    assert_eq!(eval("len({1, 1, 2})"), VsqlValue::Int(2));
    assert_eq!(eval("len(None)"), VsqlValue::Null);
    assert_type_error("len(42)");
}

#[test]
fn test_abs() {
    assert_eq!(eval("abs(-5)"), VsqlValue::Int(5));
    assert_eq!(eval("abs(5)"), VsqlValue::Int(5));
    assert_eq!(eval("abs(-2.5)"), VsqlValue::Number(2.5));
    assert_eq!(eval("abs(True)"), VsqlValue::Int(1));
    assert_eq!(eval("abs(None)"), VsqlValue::Null);
    assert_range_error("abs(-9223372036854775807 - 1)");
    assert_type_error("abs('gurk')");
}

#[test]
fn test_trigonometry() {
    assert_eq!(eval("cos(0)"), VsqlValue::Number(1.0));
    assert_eq!(eval("sin(0)"), VsqlValue::Number(0.0));
    assert_eq!(eval("tan(0)"), VsqlValue::Number(0.0));
    assert_true("0.99 < sin(1.5707963267948966)");
    assert_eq!(eval("cos(None)"), VsqlValue::Null);
    assert_type_error("cos('gurk')");
}

#[test]
fn test_sqrt() {
    assert_eq!(eval("sqrt(16)"), VsqlValue::Number(4.0));
    assert_eq!(eval("sqrt(2.25)"), VsqlValue::Number(1.5));
    assert_eq!(eval("sqrt(0)"), VsqlValue::Number(0.0));
    assert_eq!(eval("sqrt(-16)"), VsqlValue::Null);
    assert_eq!(eval("sqrt(None)"), VsqlValue::Null);
}

// ============================================================================
// Randomness and counters
// ============================================================================

#[test]
fn test_random_range() {
    for _ in 0..20 {
        assert_true("0.0 <= random()");
        assert_true("random() < 1.0");
    }
}

#[test]
fn test_randrange() {
    for _ in 0..20 {
        assert_true("randrange(5) in [0, 1, 2, 3, 4]");
        assert_true("randrange(2, 5) in [2, 3, 4]");
    }
    assert_eq!(eval("randrange(None)"), VsqlValue::Null);
    assert_range_error("randrange(0)");
    assert_range_error("randrange(5, 5)");
    assert_range_error("randrange(5, 2)");
}

#[test]
fn test_seq_counts_within_one_evaluation() {
    assert_true("[seq(), seq(), seq()] == [0, 1, 2]");
}

#[test]
fn test_seq_counts_across_evaluations() {
    let engine = VsqlEngine::new();
    let env = Environment::new();
    let expr = vsql_parser::parse_expression("seq()").unwrap();
    for expected in 0..3 {
        assert_eq!(
            engine.evaluate(&expr, &env).unwrap(),
            VsqlValue::Int(expected)
        );
    }
}

// ============================================================================
// Hashing
// ============================================================================

#[test]
fn test_md5() {
    assert_eq!(
        eval("md5('gurk')"),
        VsqlValue::Str("4b5b6a3fa4af2541daa569277c7ff4c5".into())
    );
    assert_eq!(eval("md5(None)"), VsqlValue::Null);
    assert_type_error("md5(42)");
}

// ============================================================================
// Colors and geography
// ============================================================================

#[test]
fn test_rgb() {
    assert_true("rgb(0.2, 0.4, 0.6, 0.8) == #369c");
    assert_true("rgb(0.2, 0.4, 0.6) == #369");
    assert_true("rgb(1, 1, 1) == #fff");
    assert_true("rgb(2, 0, 0) == #f00");
    assert_true("rgb(-1, 0, 0) == #000");
    assert_eq!(eval("rgb(0.2, None, 0.6)"), VsqlValue::Null);
    assert_type_error("rgb('gurk', 0, 0)");
}

#[test]
fn test_geo() {
    assert_true("geo(49.95, 11.59).lat == 49.95");
    assert_true("geo(49.95, 11.59).long == 11.59");
    assert_true("geo(49.95, 11.59).info is None");
    assert_true("geo(49.95, 11.59, 'Home').info == 'Home'");
    assert_eq!(eval("geo(None, 11.59)"), VsqlValue::Null);
    assert_eq!(eval("geo(49.95, 11.59, None).info"), VsqlValue::Null);
    assert_type_error("geo(49.95, 11.59, 42)");
}

#[test]
fn test_dist() {
    assert_eq!(
        eval("dist(geo(49.955267, 11.591212), geo(49.955267, 11.591212))"),
        VsqlValue::Number(0.0)
    );
    // one degree along the equator
    assert_true("111.0 < dist(geo(0, 0), geo(0, 1))");
    assert_true("dist(geo(0, 0), geo(0, 1)) < 111.4");
    // equator to pole
    assert_true("10007.0 < dist(geo(0, 0), geo(90, 0))");
    assert_true("dist(geo(0, 0), geo(90, 0)) < 10008.0");
    assert_eq!(eval("dist(None, geo(0, 0))"), VsqlValue::Null);
    assert_type_error("dist(geo(0, 0), 42)");
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn test_sorted() {
    assert_true("sorted([3, 1, 2]) == [1, 2, 3]");
    assert_true("sorted([1, None, 0]) == [None, 0, 1]");
    assert_true("sorted([2, 1.5, True]) == [True, 1.5, 2]");
    assert_true("sorted('gurk') == ['g', 'k', 'r', 'u']");
    assert_true("sorted({3, 1}) == [1, 3]");
    assert_true("sorted([]) == []");
    assert_eq!(eval("sorted(None)"), VsqlValue::Null);
}

#[test]
fn test_sorted_failures() {
    assert_type_error("sorted(42)");
    assert_type_error("sorted([1, 'a'])");
    assert_eq!(
        eval_err("sorted([2, 1], 'key')").message(),
        "sorted() key functions are not supported"
    );
}

#[test]
fn test_isfirst() {
    assert_true("isfirst([7, 7, 7]) == [True, False, False]");
    assert_true("isfirst('ab') == [True, False]");
    assert_true("isfirst([]) == []");
    assert_eq!(eval("isfirst(None)"), VsqlValue::Null);
    assert_type_error("isfirst(42)");
}

// ============================================================================
// Dispatch and arity
// ============================================================================

#[test]
fn test_unknown_function() {
    let err = eval_err("gurk(1, 2)");
    assert!(matches!(err, VsqlError::Name { .. }), "got {err:?}");
    assert_eq!(err.message(), "unknown function \"gurk\"");
}

#[test]
fn test_arity_messages() {
    assert_eq!(eval_err("len()").message(), "len() takes 1 arguments, got 0");
    assert_eq!(
        eval_err("timedelta(1, 2, 3)").message(),
        "timedelta() takes 0 to 2 arguments, got 3"
    );
    assert_eq!(
        eval_err("today(1)").message(),
        "today() takes 0 arguments, got 1"
    );
}
