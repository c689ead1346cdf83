use crate::expression::ast::{Expression, Operator};
use crate::expression::eval::evaluate_tree;

fn num(n: f64) -> Box<Expression> {
    Box::new(Expression::Number(n))
}

#[test]
fn test_evaluate_literal() {
    assert_eq!(Expression::Number(4.5).evaluate(), 4.5);
}

#[test]
fn test_evaluate_binary_operators() {
    assert_eq!(Expression::Add(num(2.0), num(3.0)).evaluate(), 5.0);
    assert_eq!(Expression::Sub(num(2.0), num(3.0)).evaluate(), -1.0);
    assert_eq!(Expression::Mul(num(2.0), num(3.0)).evaluate(), 6.0);
    assert_eq!(Expression::Div(num(3.0), num(2.0)).evaluate(), 1.5);
    assert_eq!(Expression::Pow(num(2.0), num(10.0)).evaluate(), 1024.0);
}

#[test]
fn test_evaluate_negate() {
    let expr = Expression::Neg(Box::new(Expression::Add(num(1.0), num(2.0))));
    assert_eq!(expr.evaluate(), -3.0);

    let double = Expression::negate(Expression::negate(Expression::Number(3.0)));
    assert_eq!(double.evaluate(), 3.0);
}

#[test]
fn test_division_by_zero_follows_float_semantics() {
    let positive = Expression::Div(num(1.0), num(0.0)).evaluate();
    assert!(positive.is_infinite() && positive > 0.0);

    let negative = Expression::Div(Box::new(Expression::negate(Expression::Number(1.0))), num(0.0))
        .evaluate();
    assert!(negative.is_infinite() && negative < 0.0);

    assert!(Expression::Div(num(0.0), num(0.0)).evaluate().is_nan());
}

#[test]
fn test_fractional_power_of_negative_is_nan() {
    let expr = Expression::Pow(
        Box::new(Expression::negate(Expression::Number(1.0))),
        num(0.5),
    );
    assert!(expr.evaluate().is_nan());

    let integral = Expression::Pow(
        Box::new(Expression::negate(Expression::Number(2.0))),
        num(3.0),
    );
    assert_eq!(integral.evaluate(), -8.0);
}

#[test]
fn test_evaluate_absent_tree_is_zero() {
    assert_eq!(evaluate_tree(None), 0.0);
    let tree = Expression::Mul(num(2.0), num(4.0));
    assert_eq!(evaluate_tree(Some(&tree)), 8.0);
}

#[test]
fn test_operator_symbols_and_tiers() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
    }
    assert_eq!(Operator::from_symbol('&'), None);
    assert_eq!(Operator::from_symbol('('), None);

    assert!(Operator::Pow.tier() < Operator::Mul.tier());
    assert_eq!(Operator::Mul.tier(), Operator::Div.tier());
    assert!(Operator::Div.tier() < Operator::Add.tier());
    assert_eq!(Operator::Add.tier(), Operator::Sub.tier());
}

#[test]
fn test_operator_apply_builds_matching_node() {
    let node = Operator::Div.apply(Expression::Number(1.0), Expression::Number(2.0));
    assert_eq!(node, Expression::Div(num(1.0), num(2.0)));
    assert_eq!(node.operator(), Some(Operator::Div));
    assert!(!node.is_literal());

    let neg = Expression::negate(Expression::Number(1.0));
    assert_eq!(neg.operator(), None);
    assert!(Expression::Number(1.0).is_literal());
}

#[test]
fn test_display_minimal_parentheses() {
    let expr = Expression::Add(num(2.0), Box::new(Expression::Mul(num(7.0), num(3.0))));
    assert_eq!(expr.to_string(), "2+7*3");

    let expr = Expression::Mul(Box::new(Expression::Add(num(1.0), num(3.0))), num(4.0));
    assert_eq!(expr.to_string(), "(1+3)*4");

    let expr = Expression::Div(num(2.0), Box::new(Expression::Pow(num(2.0), num(3.0))));
    assert_eq!(expr.to_string(), "2/2^3");
}

#[test]
fn test_display_left_associativity() {
    let left = Expression::Sub(Box::new(Expression::Sub(num(5.0), num(2.0))), num(1.0));
    assert_eq!(left.to_string(), "5-2-1");

    let right = Expression::Sub(num(5.0), Box::new(Expression::Sub(num(2.0), num(1.0))));
    assert_eq!(right.to_string(), "5-(2-1)");

    let right_pow = Expression::Pow(num(2.0), Box::new(Expression::Pow(num(3.0), num(2.0))));
    assert_eq!(right_pow.to_string(), "2^(3^2)");
}

#[test]
fn test_display_negation_as_group() {
    let neg = Expression::negate(Expression::Number(2.5));
    assert_eq!(neg.to_string(), "(-2.5)");

    let neg_group = Expression::negate(Expression::Add(
        Expression::Number(1.0).into(),
        Expression::Number(2.0).into(),
    ));
    assert_eq!(neg_group.to_string(), "(-(1+2))");

    let pow = Expression::Pow(Box::new(neg), num(2.0));
    assert_eq!(pow.to_string(), "(-2.5)^2");
}

#[test]
fn test_display_nested_negation() {
    let double = Expression::negate(Expression::negate(Expression::Number(1.0)));
    assert_eq!(double.to_string(), "(-(-1))");
}

#[test]
fn test_display_overflowed_literal() {
    assert_eq!(Expression::Number(f64::INFINITY).to_string(), "inf");
}

fn left_deep_sum(terms: usize) -> Expression {
    let mut tree = Expression::Number(1.0);
    for _ in 1..terms {
        tree = Operator::Add.apply(tree, Expression::Number(1.0));
    }
    tree
}

#[test]
fn test_deep_tree_evaluates_and_drops() {
    let tree = left_deep_sum(200_000);
    assert_eq!(tree.evaluate(), 200_000.0);
    drop(tree);

    let mut negated = Expression::Number(2.0);
    for _ in 0..200_001 {
        negated = Expression::negate(negated);
    }
    assert_eq!(negated.evaluate(), -2.0);
}

#[test]
fn test_deep_tree_on_small_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024)
        .spawn(|| {
            let tree = left_deep_sum(100_000);
            let value = tree.evaluate();
            let rendered_len = tree.to_string().len();
            (value, rendered_len)
        });
    assert!(handle.is_ok());
    if let Ok(handle) = handle {
        let joined = handle.join();
        assert!(joined.is_ok());
        if let Ok((value, rendered_len)) = joined {
            assert_eq!(value, 100_000.0);
            assert_eq!(rendered_len, 2 * 100_000 - 1);
        }
    }
}
