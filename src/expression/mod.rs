//! Equation tree and its evaluation

mod ast;
mod display;
mod eval;

pub use ast::{Expression, Operator};
pub use eval::evaluate_tree;

#[cfg(test)]
mod tests;
