use thiserror::Error;

/// Errors that can occur while building an equation tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected a number or group")]
    InvalidOperand,
    #[error("Expected one of the operators + - * / ^")]
    InvalidOperator,
    #[error("Group contains no expression")]
    EmptyGroup,
    #[error("Group is missing its closing symbol")]
    MissingClosingSymbol,
    #[error("Operands were left over after resolving precedence")]
    Internal,
}

impl ParseError {
    /// Whether the failure was caused by the equation text rather than a parser defect
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ParseError::Internal)
    }
}
