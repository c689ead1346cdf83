use log::debug;

use crate::expression::Operator;
use crate::parser::constants::{CLOSE_GROUP, NEGATE, OPEN_GROUP};
use crate::parser::errors::ParseError;

/// Cursor over equation text.
///
/// Each `pop_*` recognizer either consumes a prefix of the remaining input
/// and advances the cursor, or fails and leaves the cursor where it was.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Text not yet consumed
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Consume a single leading minus sign
    pub fn pop_negate(&mut self) -> bool {
        if self.remaining().starts_with(NEGATE) {
            self.pos += NEGATE.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn starts_group(&self) -> bool {
        self.remaining().starts_with(OPEN_GROUP)
    }

    /// Consume the longest `digits[.digits]` prefix and return its value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperand` when the input does not start with a digit.
    pub fn pop_literal(&mut self) -> Result<f64, ParseError> {
        let rest = self.remaining();
        let bytes = rest.as_bytes();

        let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if int_len == 0 {
            debug!("No literal at offset {} in '{}'", self.pos, self.input);
            return Err(ParseError::InvalidOperand);
        }

        let mut len = int_len;
        if bytes.get(int_len) == Some(&b'.') {
            let frac_len = bytes
                .iter()
                .skip(int_len + 1)
                .take_while(|b| b.is_ascii_digit())
                .count();
            // A dot without fraction digits is left for the operator scan to reject
            if frac_len > 0 {
                len += 1 + frac_len;
            }
        }

        let text = rest.get(..len).ok_or(ParseError::InvalidOperand)?;
        let value = text
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidOperand)?;
        self.pos += len;
        debug!("Scanned literal {}", value);
        Ok(value)
    }

    /// Consume one operator symbol.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperator` when the next character is not `+ - * / ^`.
    pub fn pop_operator(&mut self) -> Result<Operator, ParseError> {
        let symbol = self.remaining().chars().next();
        match symbol.and_then(Operator::from_symbol) {
            Some(op) => {
                self.pos += op.symbol().len_utf8();
                debug!("Scanned operator '{}'", op.symbol());
                Ok(op)
            }
            None => {
                debug!(
                    "Expected operator at offset {} in '{}', found {:?}",
                    self.pos, self.input, symbol
                );
                Err(ParseError::InvalidOperator)
            }
        }
    }

    /// Consume a balanced group and return the text between its outer
    /// symbols. The cursor moves past the matching closing symbol.
    ///
    /// # Errors
    ///
    /// Returns `MissingClosingSymbol` when the input runs out before the
    /// group is closed, and `InvalidOperand` when the input does not start
    /// with an opening symbol.
    pub fn pop_group(&mut self) -> Result<&'a str, ParseError> {
        let rest = self.remaining();
        if !rest.starts_with(OPEN_GROUP) {
            return Err(ParseError::InvalidOperand);
        }

        let mut level = 0usize;
        for (idx, c) in rest.char_indices() {
            if c == OPEN_GROUP {
                level += 1;
            } else if c == CLOSE_GROUP {
                level -= 1;
                if level == 0 {
                    let body = rest
                        .get(OPEN_GROUP.len_utf8()..idx)
                        .ok_or(ParseError::MissingClosingSymbol)?;
                    self.pos += idx + CLOSE_GROUP.len_utf8();
                    debug!("Scanned group '{}'", body);
                    return Ok(body);
                }
            }
        }

        debug!(
            "Group opened at offset {} in '{}' is never closed",
            self.pos, self.input
        );
        Err(ParseError::MissingClosingSymbol)
    }
}
