use log::{debug, warn};

use crate::expression::{Expression, Operator};
use crate::parser::constants::PRECEDENCE_TIERS;
use crate::parser::errors::ParseError;
use crate::parser::scanner::Scanner;

/// Operands and operators in source order, `first (op operand)*`
#[derive(Debug)]
struct TokenSequence {
    negate: bool,
    first: Expression,
    rest: Vec<(Operator, Expression)>,
}

impl TokenSequence {
    /// Wrap the leading operand in the negation that preceded it
    fn attach_negation(self) -> Self {
        if !self.negate {
            return self;
        }
        debug!("Attaching leading negation");
        Self {
            negate: false,
            first: Expression::negate(self.first),
            rest: self.rest,
        }
    }

    /// Left fold over one precedence tier: each matching operator takes its
    /// current neighbours as children, yielding a shorter sequence.
    fn collapse(self, tier: u8) -> Self {
        let mut first = self.first;
        let mut collapsed: Vec<(Operator, Expression)> = Vec::with_capacity(self.rest.len());

        for (op, operand) in self.rest {
            if op.tier() != tier {
                collapsed.push((op, operand));
                continue;
            }
            match collapsed.pop() {
                Some((prev_op, left)) => collapsed.push((prev_op, op.apply(left, operand))),
                None => first = op.apply(first, operand),
            }
        }

        Self {
            negate: self.negate,
            first,
            rest: collapsed,
        }
    }

    fn into_root(self) -> Result<Expression, ParseError> {
        if self.negate || !self.rest.is_empty() {
            warn!(
                "Precedence resolution left {} unresolved operators",
                self.rest.len()
            );
            return Err(ParseError::Internal);
        }
        Ok(self.first)
    }
}

/// Build the tree for a whole equation. Whitespace is ignored.
///
/// An empty equation has no tree and evaluates to zero.
///
/// # Errors
///
/// Returns the `ParseError` kind for the first problem found; any failure
/// inside a group aborts the whole parse.
pub fn build_tree(equation: &str) -> Result<Option<Expression>, ParseError> {
    let compact: String = equation.chars().filter(|c| !c.is_whitespace()).collect();
    debug!("Building tree for '{}'", compact);

    let result = if compact.is_empty() {
        Ok(None)
    } else {
        build_nonempty(&compact).map(Some)
    };
    match &result {
        Ok(Some(tree)) => debug!("Built tree: {}", tree),
        Ok(None) => debug!("Empty equation"),
        Err(e) if e.is_input_error() => debug!("Failed to parse '{}': {}", equation, e),
        Err(e) => warn!("Failed to parse '{}': {}", equation, e),
    }
    result
}

/// Partially read equation or group, suspended while a nested group is read
struct Frame<'a> {
    scanner: Scanner<'a>,
    negate: bool,
    first: Option<Expression>,
    rest: Vec<(Operator, Expression)>,
    pending: Option<Operator>,
}

impl<'a> Frame<'a> {
    fn start(text: &'a str) -> Self {
        let mut scanner = Scanner::new(text);
        let negate = scanner.pop_negate();
        Self {
            scanner,
            negate,
            first: None,
            rest: Vec::new(),
            pending: None,
        }
    }

    fn expects_operand(&self) -> bool {
        self.first.is_none() || self.pending.is_some()
    }

    fn push_operand(&mut self, operand: Expression) {
        match self.pending.take() {
            Some(op) => self.rest.push((op, operand)),
            None => self.first = Some(operand),
        }
    }

    fn finish(self) -> Result<Expression, ParseError> {
        let first = self.first.ok_or(ParseError::Internal)?;
        let mut sequence = TokenSequence {
            negate: self.negate,
            first,
            rest: self.rest,
        }
        .attach_negation();
        for tier in PRECEDENCE_TIERS {
            sequence = sequence.collapse(tier);
        }
        sequence.into_root()
    }
}

/// Read `operand (operator operand)*` for the equation and every group in
/// it. A group suspends the enclosing frame until its own tree is complete,
/// so nesting depth is bounded by memory rather than the call stack.
fn build_nonempty(equation: &str) -> Result<Expression, ParseError> {
    let mut frames = vec![Frame::start(equation)];

    while let Some(frame) = frames.last_mut() {
        if frame.expects_operand() {
            if frame.scanner.starts_group() {
                let body = frame.scanner.pop_group()?;
                if body.is_empty() {
                    return Err(ParseError::EmptyGroup);
                }
                frames.push(Frame::start(body));
            } else {
                let value = frame.scanner.pop_literal()?;
                frame.push_operand(Expression::Number(value));
            }
            continue;
        }

        if !frame.scanner.is_empty() {
            frame.pending = Some(frame.scanner.pop_operator()?);
            continue;
        }

        let tree = match frames.pop() {
            Some(done) => done.finish()?,
            None => break,
        };
        match frames.last_mut() {
            Some(parent) => parent.push_operand(tree),
            None => return Ok(tree),
        }
    }

    Err(ParseError::Internal)
}
