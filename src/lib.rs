//! Eqeval - parse and evaluate arithmetic equations
//!
//! Equations are made of decimal literals, the operators `+ - * / ^`,
//! parenthesized groups and a leading unary minus. Power binds tightest,
//! then multiplication/division, then addition/subtraction; every tier is
//! left-associative.

pub mod expression;
pub mod parser;
pub mod selftest;

use log::info;
use rayon::prelude::*;

// Re-export the main public API
pub use expression::{Expression, Operator, evaluate_tree};
pub use parser::{ParseError, build_tree};

/// Parse an equation and compute its value
///
/// An empty (or all-whitespace) equation evaluates to zero. Division by zero
/// and invalid powers are not errors; they produce infinities or NaN.
///
/// # Errors
///
/// Returns the `ParseError` kind describing why the equation could not be
/// parsed. Evaluation itself never fails.
///
/// # Examples
///
/// ```
/// use eqeval::{ParseError, evaluate};
///
/// assert_eq!(evaluate("2 + 7 * (3 + 1)"), Ok(30.0));
/// assert_eq!(evaluate("()"), Err(ParseError::EmptyGroup));
/// ```
pub fn evaluate(equation: &str) -> Result<f64, ParseError> {
    let tree = build_tree(equation)?;
    Ok(evaluate_tree(tree.as_ref()))
}

/// Evaluate independent equations in parallel, keeping input order
pub fn evaluate_all<S>(equations: &[S]) -> Vec<Result<f64, ParseError>>
where
    S: AsRef<str> + Sync,
{
    info!("Evaluating {} equations", equations.len());
    equations
        .par_iter()
        .map(|equation| evaluate(equation.as_ref()))
        .collect()
}
