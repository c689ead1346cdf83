//! Built-in catalog of equations with known outcomes, used by `eqeval --self-test`

use log::{debug, info};

use crate::{ParseError, evaluate};

/// Tolerance when comparing evaluated results
pub const EPSILON: f64 = 1e-7;

/// Expected outcome of evaluating one catalog equation
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Value(f64),
    Error(ParseError),
}

#[derive(Debug, Clone)]
pub struct SelfTestCase {
    pub title: &'static str,
    pub equation: &'static str,
    pub expected: Expected,
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub title: &'static str,
    pub passed: bool,
    /// Why the case failed, empty when it passed
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl SelfTestReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

/// Infinities match by sign and NaN matches NaN
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() < EPSILON
}

fn valid(title: &'static str, equation: &'static str, value: f64) -> SelfTestCase {
    SelfTestCase {
        title,
        equation,
        expected: Expected::Value(value),
    }
}

fn invalid(title: &'static str, equation: &'static str, error: ParseError) -> SelfTestCase {
    SelfTestCase {
        title,
        equation,
        expected: Expected::Error(error),
    }
}

pub fn catalog() -> Vec<SelfTestCase> {
    vec![
        valid("Empty equation", "", 0.0),
        valid("Single number", "1", 1.0),
        valid("Decimal number", "12.5", 12.5),
        valid("Simple addition", "2+2", 4.0),
        valid("Simple subtraction", "2-1", 1.0),
        valid("Simple multiplication", "2*3", 6.0),
        valid("Simple division", "6/2", 3.0),
        valid("Simple power", "2^3", 8.0),
        valid("Simple negate", "-2", -2.0),
        valid("Simple group", "(2)", 2.0),
        valid("Negate in group", "(-2)", -2.0),
        valid("Negates in several groups", "(-2)+(-6)", -8.0),
        valid("Precedence with group", "2*(1+1)", 4.0),
        valid("Multiplication before addition", "2*1+1", 3.0),
        valid("Power before division", "2/(1+1)^3", 0.25),
        valid("Multiplication before subtraction", "3*4-3", 9.0),
        valid("Addition after multiplication", "3+4*3", 15.0),
        valid("Left to right at equal tier", "-4^3/5*(2+1)", -38.4),
        valid("Product of groups", "(1+3)*(4+5)", 36.0),
        valid("Nested negated groups", "-(-(3))", 3.0),
        valid("Deeply nested groups", "4*(5-(1+3)/(5*6))*(4-1)", 58.4),
        valid("Left-associative power", "2^3^2", 64.0),
        valid("Fractional power of negative base", "(-1)^(0.5)", f64::NAN),
        valid("Zero divided by zero", "0/0", f64::NAN),
        valid("Division by zero", "1/0", f64::INFINITY),
        valid("Whitespace is ignored", " 2 + 7  *  ( 3 +1) ", 30.0),
        invalid("Empty group", "()", ParseError::EmptyGroup),
        invalid("Empty group after operator", "3+()", ParseError::EmptyGroup),
        invalid("Double minus", "1--3", ParseError::InvalidOperand),
        invalid("Double negate", "--3", ParseError::InvalidOperand),
        invalid("Letter operand", "n-3", ParseError::InvalidOperand),
        invalid("Missing right operand", "4-", ParseError::InvalidOperand),
        invalid("Closing symbol as operand", "(4-3)*)", ParseError::InvalidOperand),
        invalid("Unknown operator", "1&3", ParseError::InvalidOperator),
        invalid("Unknown operator later", "5-1&3", ParseError::InvalidOperator),
        invalid("Extra closing symbol", "(4-3))", ParseError::InvalidOperator),
        invalid("Unclosed group", "(4+3", ParseError::MissingClosingSymbol),
        invalid(
            "Unclosed nested group",
            "((4+(5*2))-3",
            ParseError::MissingClosingSymbol,
        ),
    ]
}

fn check(case: &SelfTestCase) -> CaseOutcome {
    let actual = evaluate(case.equation);
    debug!("Self-test '{}': {:?}", case.equation, actual);

    let detail = match (&case.expected, actual) {
        (Expected::Value(expected), Ok(value)) if approx_eq(*expected, value) => String::new(),
        (Expected::Value(expected), Ok(value)) => {
            format!("Expected: {} Actual: {}", expected, value)
        }
        (Expected::Value(_), Err(e)) => format!("Unexpected error: {}", e),
        (Expected::Error(expected), Err(e)) if *expected == e => String::new(),
        (Expected::Error(expected), Err(e)) => {
            format!("Expected error: {:?} Actual: {:?}", expected, e)
        }
        (Expected::Error(expected), Ok(value)) => {
            format!("Expected error: {:?} but evaluated to {}", expected, value)
        }
    };

    CaseOutcome {
        title: case.title,
        passed: detail.is_empty(),
        detail,
    }
}

/// Run every catalog case
pub fn run_self_test() -> SelfTestReport {
    let outcomes: Vec<CaseOutcome> = catalog().iter().map(check).collect();
    let report = SelfTestReport { outcomes };
    info!(
        "Self-test finished: {} passed, {} failed",
        report.passed(),
        report.failed()
    );
    report
}
