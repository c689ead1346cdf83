use log::debug;

use crate::expression::ast::Expression;

enum Step<'a> {
    Visit(&'a Expression),
    Reduce(&'a Expression),
}

fn pop(values: &mut Vec<f64>) -> f64 {
    // Every reduce step follows the visits that pushed its operands
    values.pop().unwrap_or(f64::NAN)
}

impl Expression {
    /// Reduce the tree to a number.
    ///
    /// Follows IEEE 754 semantics: division by zero yields an infinity or NaN,
    /// and a negative base raised to a fractional exponent yields NaN.
    /// Works on an explicit stack, so tree depth is not limited by the thread stack.
    pub fn evaluate(&self) -> f64 {
        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expression::Number(n)) => values.push(*n),
                Step::Visit(node @ Expression::Neg(e)) => {
                    steps.push(Step::Reduce(node));
                    steps.push(Step::Visit(e));
                }
                Step::Visit(
                    node @ (Expression::Add(l, r)
                    | Expression::Sub(l, r)
                    | Expression::Mul(l, r)
                    | Expression::Div(l, r)
                    | Expression::Pow(l, r)),
                ) => {
                    steps.push(Step::Reduce(node));
                    steps.push(Step::Visit(r));
                    steps.push(Step::Visit(l));
                }
                Step::Reduce(node) => {
                    let value = match node.operator() {
                        Some(op) => {
                            let right = pop(&mut values);
                            let left = pop(&mut values);
                            let value = op.compute(left, right);
                            debug!("{} {} {} = {}", left, op.symbol(), right, value);
                            value
                        }
                        None => {
                            let value = -pop(&mut values);
                            debug!("negate = {}", value);
                            value
                        }
                    };
                    values.push(value);
                }
            }
        }

        pop(&mut values)
    }
}

/// Evaluate an optional tree; the absent tree of an empty equation is zero
pub fn evaluate_tree(tree: Option<&Expression>) -> f64 {
    tree.map_or(0.0, Expression::evaluate)
}
