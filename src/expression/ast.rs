use std::mem;

/// Binary tree for a parsed equation
///
/// Negation carries exactly one operand; every other operator carries two.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Pow(Box<Expression>, Box<Expression>),
    Neg(Box<Expression>),
}

/// Binary operator symbols accepted between two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Precedence tier, resolved in ascending order: power binds first,
    /// then multiplication/division, then addition/subtraction.
    pub fn tier(self) -> u8 {
        match self {
            Operator::Pow => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Add | Operator::Sub => 3,
        }
    }

    /// Numeric result of this operator on evaluated operands
    pub fn compute(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
            Operator::Pow => left.powf(right),
        }
    }

    /// Combine two operands into the node for this operator
    pub fn apply(self, left: Expression, right: Expression) -> Expression {
        let (l, r) = (Box::new(left), Box::new(right));
        match self {
            Operator::Add => Expression::Add(l, r),
            Operator::Sub => Expression::Sub(l, r),
            Operator::Mul => Expression::Mul(l, r),
            Operator::Div => Expression::Div(l, r),
            Operator::Pow => Expression::Pow(l, r),
        }
    }
}

impl Expression {
    pub fn negate(operand: Expression) -> Self {
        Expression::Neg(Box::new(operand))
    }

    /// Operator at the root of this node, `None` for literals and negation
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expression::Add(_, _) => Some(Operator::Add),
            Expression::Sub(_, _) => Some(Operator::Sub),
            Expression::Mul(_, _) => Some(Operator::Mul),
            Expression::Div(_, _) => Some(Operator::Div),
            Expression::Pow(_, _) => Some(Operator::Pow),
            Expression::Number(_) | Expression::Neg(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Number(_))
    }
}

/// Placeholder left behind when a subtree is detached
fn detach(child: &mut Box<Expression>) -> Box<Expression> {
    mem::replace(child, Box::new(Expression::Number(0.0)))
}

/// Long operator chains build trees as deep as the equation is long, so
/// subtrees are moved onto a heap stack and dropped one node at a time.
impl Drop for Expression {
    fn drop(&mut self) {
        fn take_children(expr: &mut Expression, pending: &mut Vec<Box<Expression>>) {
            match expr {
                Expression::Number(_) => {}
                Expression::Neg(e) => {
                    if !e.is_literal() {
                        pending.push(detach(e));
                    }
                }
                Expression::Add(l, r)
                | Expression::Sub(l, r)
                | Expression::Mul(l, r)
                | Expression::Div(l, r)
                | Expression::Pow(l, r) => {
                    for child in [l, r] {
                        if !child.is_literal() {
                            pending.push(detach(child));
                        }
                    }
                }
            }
        }

        let mut pending = Vec::new();
        take_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            take_children(&mut node, &mut pending);
        }
    }
}
