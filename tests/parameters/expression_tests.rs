//! Tests for the Expression parsing, evaluation and differentiation

use curvefit_rs::parameters::expression::{
    EvaluationContext, Expression, ExpressionError, SimpleContext,
};

fn context(values: &[(&str, f64)]) -> SimpleContext {
    let mut context = SimpleContext::new();
    for (name, value) in values {
        context.set_variable(name, *value);
    }
    context
}

#[test]
fn test_expression_parsing() {
    let cases = [
        ("42", 0),
        ("x", 1),
        ("x + y", 2),
        ("x^2", 1),
        ("2 * (x + 1)", 1),
        ("sin(x) + cos(y)", 2),
        ("a*sin(b) - c*cos(a)", 3),
        ("(x + y) * (z - 1) / w", 4),
        ("  (  x  +  y  )  *  z  ", 3),
        ("x + (-y)", 2),
        ("-2 * x", 1),
        ("a0 + a1*x + a2*x^2", 4),
    ];
    for (text, count) in cases {
        let expr = Expression::parse(text).unwrap();
        assert_eq!(expr.variables().len(), count, "variables of {}", text);
    }

    for text in ["", "x +", "x + (y", "@#$%", "x y", "sin(x,)"] {
        assert!(Expression::parse(text).is_err(), "{} should not parse", text);
    }
}

#[test]
fn test_expression_evaluation() {
    let ctx = context(&[("x", 2.0), ("y", 3.0), ("z", 4.0)]);
    let cases = [
        ("-x", -2.0),
        ("x - y", -1.0),
        ("y / x", 1.5),
        ("(x + y) * (x - y)", -5.0),
        ("x^2 + y^2", 13.0),
        ("z - y - x", -1.0),
        ("z / x / x", 1.0),
        ("z^0.5", 2.0),
        ("2^-x", 0.25),
        ("ln(1)", 0.0),
    ];
    for (text, expected) in cases {
        let value = Expression::parse(text).unwrap().evaluate(&ctx).unwrap();
        assert!((value - expected).abs() < 1e-12, "{} = {}", text, value);
    }

    let identity = Expression::parse("sin(x)^2 + cos(x)^2").unwrap();
    assert!((identity.evaluate(&ctx).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn test_expression_evaluation_errors() {
    let ctx = context(&[("x", 2.0)]);

    match Expression::parse("y").unwrap().evaluate(&ctx) {
        Err(ExpressionError::UndefinedVariable { name }) => assert_eq!(name, "y"),
        other => panic!("Expected UndefinedVariable error, got {:?}", other),
    }

    assert_eq!(
        Expression::parse("x / 0").unwrap().evaluate(&ctx),
        Err(ExpressionError::DivisionByZero)
    );

    match Expression::parse("unknown_func(x)").unwrap().evaluate(&ctx) {
        Err(ExpressionError::UndefinedFunction { name }) => assert_eq!(name, "unknown_func"),
        other => panic!("Expected UndefinedFunction error, got {:?}", other),
    }

    assert!(matches!(
        Expression::parse("cos(x, x)").unwrap().evaluate(&ctx),
        Err(ExpressionError::InvalidOperation { .. })
    ));

    // functions outside the model formulas are not known
    for name in ["exp", "sqrt", "max"] {
        let text = format!("{}(x)", name);
        assert_eq!(
            Expression::parse(&text).unwrap().evaluate(&ctx),
            Err(ExpressionError::UndefinedFunction {
                name: name.to_string()
            })
        );
    }
}

#[test]
fn test_expression_context() {
    let ctx = context(&[("x", 2.0), ("y", 3.0)]);
    assert!(ctx.has_variable("x"));
    assert!(!ctx.has_variable("z"));
    assert_eq!(ctx.variable_names().len(), 2);
    assert_eq!(ctx.get_variable("y").unwrap(), 3.0);
    assert!(ctx.get_variable("c").is_err());
}

#[test]
fn test_derivative_of_quadratic_residual() {
    // d/da1 of (a0 + a1*3 - 7)^2 is 6*(a0 + 3*a1 - 7)
    let expr = Expression::parse("(a0 + a1*3 - 7)^2").unwrap();
    let derivative = expr.derivative("a1").unwrap();

    let symbols = vec!["a0".to_string(), "a1".to_string()];
    let form = derivative.affine_form(&symbols).unwrap();
    assert!((form.constant + 42.0).abs() < 1e-12);
    assert!((form.terms[0] - 6.0).abs() < 1e-12);
    assert!((form.terms[1] - 18.0).abs() < 1e-12);
}

#[test]
fn test_derivative_matches_finite_difference() {
    let expr = Expression::parse("x^3*sin(x) / (1 + cos(x)^2) + ln(x) + 2^(x^2)").unwrap();
    let derivative = expr.derivative("x").unwrap();

    for x in [0.3, 1.0, 2.5] {
        let h = 1e-6;
        let f = |v: f64| expr.evaluate(&context(&[("x", v)])).unwrap();
        let numeric = (f(x + h) - f(x - h)) / (2.0 * h);
        let symbolic = derivative.evaluate(&context(&[("x", x)])).unwrap();
        assert!(
            (numeric - symbolic).abs() < 1e-6 * symbolic.abs().max(1.0),
            "x = {}: {} vs {}",
            x,
            numeric,
            symbolic
        );
    }
}

#[test]
fn test_affine_form_undefined_symbol() {
    let expr = Expression::parse("a + x").unwrap();
    assert_eq!(
        expr.affine_form(&["a".to_string()]),
        Err(ExpressionError::UndefinedVariable {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_display_reparses_to_same_value() {
    let ctx = context(&[("x", 0.7), ("a0", 1.5), ("a1", -2.0)]);
    let expr = Expression::parse("a0 - a1*(x - 1)/(x + 2)^2 - -x")
        .unwrap()
        .derivative("x")
        .unwrap();
    let text = expr.to_string();
    let reparsed = Expression::parse(&text).unwrap();
    assert!((expr.evaluate(&ctx).unwrap() - reparsed.evaluate(&ctx).unwrap()).abs() < 1e-12);
}
