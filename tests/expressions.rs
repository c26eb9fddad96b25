use xcalc::{evaluate, parse_expression, EvalError, Evaluator, LexError, ParseError};

fn eval_at(src: &str, x: f64) -> f64 {
    let expr = parse_expression(src).unwrap_or_else(|e| panic!("{src:?} failed to parse: {e}"));
    evaluate(&expr, x).unwrap_or_else(|e| panic!("{src:?} failed to evaluate: {e}"))
}

fn formatted(src: &str, x: f64) -> String {
    format!("{:.2}", eval_at(src, x))
}

#[test]
fn constant_formulas_ignore_x() {
    for x in [-1.5, 0.0, 2.0, 1e6] {
        assert_eq!(formatted("2+3*4", x), "14.00");
    }
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval_at("2+3*4", 0.0), 14.0);
    assert_eq!(eval_at("(2+3)*4", 0.0), 20.0);
    assert_eq!(eval_at("2^3^2", 0.0), 512.0);
    assert_eq!(eval_at("10-4-3", 0.0), 3.0);
    assert_eq!(eval_at("64/4/2", 0.0), 8.0);
}

#[test]
fn unary_minus() {
    assert_eq!(eval_at("-3+5", 0.0), 2.0);
    assert_eq!(eval_at("-(2+3)", 0.0), -5.0);
    assert_eq!(eval_at("3--2", 0.0), 5.0);
}

#[test]
fn variable_substitution() {
    assert_eq!(formatted("x*x+1", 3.0), "10.00");
    assert_eq!(formatted("x*x+1", -2.0), "5.00");
    assert_eq!(formatted("x / 3", 1.0), "0.33");
}

#[test]
fn spaces_are_skipped() {
    assert_eq!(eval_at("  2 *   ( x + 1 )  ", 4.0), 10.0);
}

#[test]
fn division_by_zero_is_an_error() {
    let expr = parse_expression("1/0").unwrap();
    assert_eq!(evaluate(&expr, 0.0), Err(EvalError::DivisionByZero));
}

#[test]
fn lex_error_names_the_character() {
    match parse_expression("2+@") {
        Err(ParseError::Lex(LexError::UnexpectedChar { ch, .. })) => assert_eq!(ch, '@'),
        other => panic!("expected lex error, got {other:?}"),
    }
    assert!(parse_expression("2+@").unwrap_err().to_string().contains('@'));
}

#[test]
fn tabs_are_lex_errors() {
    assert!(matches!(
        parse_expression("1\t+ 2"),
        Err(ParseError::Lex(LexError::UnexpectedChar { ch: '\t', .. }))
    ));
}

#[test]
fn incomplete_input_is_a_syntax_error() {
    for src in ["2+", "(2+3", "", "-", "2*(x-)"] {
        assert!(
            matches!(parse_expression(src), Err(ParseError::Syntax { .. })),
            "{src:?} should not parse"
        );
    }
}

#[test]
fn trailing_input_is_a_syntax_error() {
    for src in ["2+3)", "2 3", "3x"] {
        assert!(
            matches!(parse_expression(src), Err(ParseError::Syntax { .. })),
            "{src:?} should not parse"
        );
    }
}

#[test]
fn one_tree_many_values() {
    let expr = parse_expression("x^3 - x").unwrap();
    assert_eq!(evaluate(&expr, 2.0), Ok(6.0));
    assert_eq!(evaluate(&expr, -1.0), Ok(0.0));
    assert_eq!(evaluate(&expr, 2.0), Ok(6.0));
}

#[test]
fn strict_mode_is_opt_in() {
    let expr = parse_expression("2*y").unwrap();
    assert_eq!(evaluate(&expr, 1.0), Ok(0.0));
    assert_eq!(
        Evaluator::new(1.0).strict(true).eval(&expr),
        Err(EvalError::UnknownVariable { name: 'y' })
    );
}

#[test]
fn deep_nesting_is_bounded() {
    let src = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
    assert!(matches!(
        parse_expression(&src),
        Err(ParseError::NestingTooDeep { .. })
    ));

    let src = format!("{}x{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(eval_at(&src, 7.0), 7.0);
}

#[test]
fn flat_chains_are_bounded() {
    let src = format!("1{}", "+1".repeat(1_000_000));
    assert!(matches!(
        parse_expression(&src),
        Err(ParseError::NestingTooDeep { .. })
    ));

    let src = format!("1{}", "+1".repeat(256));
    assert_eq!(eval_at(&src, 0.0), 257.0);

    let src = format!("x{}", "*x".repeat(200));
    assert_eq!(eval_at(&src, 1.0), 1.0);
}
