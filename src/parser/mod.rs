//! Equation text to tree: scanning, group extraction and precedence resolution

pub mod constants;
mod core;
mod errors;
mod scanner;

pub use core::build_tree;
pub use errors::ParseError;
pub use scanner::Scanner;
