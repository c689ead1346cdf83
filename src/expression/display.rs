use std::fmt;

use crate::expression::ast::Expression;

enum Piece<'a> {
    Node(&'a Expression, bool),
    Text(&'static str),
    Symbol(char),
}

// Lower binds tighter; literals and negation groups never need parens
fn tier(expr: &Expression) -> u8 {
    expr.operator().map_or(0, |op| op.tier())
}

fn fmt_number(f: &mut fmt::Formatter, n: f64) -> fmt::Result {
    if n.is_sign_negative() && n != 0.0 {
        write!(f, "(-{})", -n)
    } else {
        write!(f, "{}", n)
    }
}

/// Renders the tree as equation text that parses back to the same tree.
///
/// Every operator is left-associative, so a right operand of equal tier
/// is parenthesized. Negation only parses at the head of an equation or
/// group, so it is always written as its own group. Literals that overflowed
/// to infinity print as `inf` and have no equation form.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Pieces are pushed in reverse so the leftmost one is written first
        let mut pending = vec![Piece::Node(self, false)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Symbol(symbol) => write!(f, "{}", symbol)?,
                Piece::Node(expr, true) => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(expr, false));
                    pending.push(Piece::Text("("));
                }
                Piece::Node(Expression::Number(n), false) => fmt_number(f, *n)?,
                Piece::Node(Expression::Neg(e), false) => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(e, e.operator().is_some()));
                    pending.push(Piece::Text("(-"));
                }
                Piece::Node(
                    expr @ (Expression::Add(l, r)
                    | Expression::Sub(l, r)
                    | Expression::Mul(l, r)
                    | Expression::Div(l, r)
                    | Expression::Pow(l, r)),
                    false,
                ) => {
                    let own = tier(expr);
                    let symbol = expr.operator().map_or('?', |op| op.symbol());
                    pending.push(Piece::Node(r, tier(r) >= own));
                    pending.push(Piece::Symbol(symbol));
                    pending.push(Piece::Node(l, tier(l) > own));
                }
            }
        }

        Ok(())
    }
}
