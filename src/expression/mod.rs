use std::fmt::{self, Display, Formatter};

use crate::data_type::Number;
use crate::operators::{Associativity, BinOp, MAX_PRIO};
use crate::ExResult;

#[cfg(feature = "serde")]
mod serde;

const ADD_REPR: &str = "+";
const SUB_REPR: &str = "-";
const MUL_REPR: &str = "*";

/// Expression tree created by [`parse_expr`](crate::parse_expr). Each node exclusively
/// owns its children. Trees are never mutated, [`simplify`](Expr::simplify) creates a
/// new one.
#[derive(Clone, Debug)]
pub enum Expr<T> {
    Num(T),
    /// Arithmetic negation of the contained expression.
    Neg(Box<Expr<T>>),
    /// Binary operation together with the symbol it was parsed from.
    Bin {
        lhs: Box<Expr<T>>,
        rhs: Box<Expr<T>>,
        op: BinOp<T>,
        repr: String,
    },
}

impl<T: Number> Expr<T> {
    pub fn neg(expr: Expr<T>) -> Expr<T> {
        Expr::Neg(Box::new(expr))
    }

    pub fn bin(lhs: Expr<T>, rhs: Expr<T>, op: BinOp<T>, repr: &str) -> Expr<T> {
        Expr::Bin {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            op,
            repr: repr.to_string(),
        }
    }

    /// Evaluates the expression. Left operands are evaluated before right operands.
    ///
    /// # Errors
    ///
    /// The first error of an operator function is returned unchanged. Negation of an
    /// integer fails if the result is not representable, e.g., for `i64::MIN`.
    pub fn eval(&self) -> ExResult<T> {
        match self {
            Expr::Num(x) => Ok(*x),
            Expr::Neg(e) => e.eval()?.try_neg(),
            Expr::Bin { lhs, rhs, op, .. } => {
                let l = lhs.eval()?;
                let r = rhs.eval()?;
                (op.apply)(l, r)
            }
        }
    }

    /// Creates the canonical string representation. Binary operations are always put in
    /// parentheses and negations are written as `-(...)`, independent of the parentheses in the
    /// parsed text. Parsing the result with the same operators yields an equivalent expression.
    pub fn unparse(&self) -> String {
        format!("{}", self)
    }

    /// Creates a new expression where negations are replaced by multiplications with `-1` and
    /// additions or subtractions of negations become subtractions or additions, e.g.,
    /// `a + -(b)` becomes `a - b`.
    ///
    /// The rewrites of `+` and `-` only look at the operator symbols. They also take place if
    /// the symbols are bound to something different than addition and subtraction.
    ///
    /// Rewritten nodes use the checked operations of [`Number`](Number). An expression parsed
    /// with wrapping operators can therefore fail after simplification where it wrapped
    /// around before, e.g., `-9223372036854775808 + -(1)` for `i64`.
    pub fn simplify(&self) -> Expr<T> {
        match self {
            Expr::Num(x) => Expr::Num(*x),
            Expr::Neg(e) => Expr::bin(
                Expr::Num(T::minus_one()),
                e.simplify(),
                BinOp {
                    apply: T::try_mul,
                    prio: MAX_PRIO,
                    assoc: Associativity::Left,
                },
                MUL_REPR,
            ),
            Expr::Bin { lhs, rhs, op, repr } => match (repr.as_str(), &**rhs) {
                (ADD_REPR, Expr::Neg(inner)) => Expr::bin(
                    lhs.simplify(),
                    inner.simplify(),
                    BinOp {
                        apply: T::try_sub,
                        ..*op
                    },
                    SUB_REPR,
                ),
                (SUB_REPR, Expr::Neg(inner)) => Expr::bin(
                    lhs.simplify(),
                    inner.simplify(),
                    BinOp {
                        apply: T::try_add,
                        ..*op
                    },
                    ADD_REPR,
                ),
                _ => Expr::bin(lhs.simplify(), rhs.simplify(), *op, repr),
            },
        }
    }
}

impl<T: Number> Display for Expr<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Num(x) => write!(f, "{}", x),
            Expr::Neg(e) => write!(f, "-({})", e),
            Expr::Bin { lhs, rhs, repr, .. } => write!(f, "({} {} {})", lhs, repr, rhs),
        }
    }
}
