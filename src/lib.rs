#![doc(html_root_url = "https://docs.rs/calcex/0.1.0")]
//! Calcex is a configurable calculator for infix expressions. The operators are not
//! built in. Instead, the user passes a table that maps operator symbols to binary
//! functions with a priority and an associativity. The parser uses precedence climbing
//! to turn a string into an expression tree that can be evaluated, unparsed into a
//! canonical fully parenthesized string, and simplified.
//!
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use calcex::prelude::*;
//! let calculator = IntegerCalculator::default();
//! assert_eq!(calculator.evaluate("-(5 + 4) + -(1 - 5) * --(4)")?, 7);
//! assert_eq!(calculator.evaluate("2 ^ 3 ^ 2")?, 512);
//! let expr = calculator.parse("60 / 12 / 3")?;
//! assert_eq!(expr.unparse(), "((60 / 12) / 3)");
//! assert_eq!(expr.eval()?, 1);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! Operators are defined with [`Operator`](Operator) and [`BinOp`](BinOp) and collected in
//! an [`OperatorTable`](OperatorTable), possibly by a factory implementing
//! [`MakeOperators`](MakeOperators).
//! ```rust
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! #
//! use calcex::{ops_factory, prelude::*, Associativity, BinOp, Number, Operator};
//! ops_factory!(
//!     TrappingOpsFactory,
//!     i32,
//!     Operator::make_bin(
//!         "+",
//!         BinOp {
//!             apply: i32::try_add,
//!             prio: 0,
//!             assoc: Associativity::Left,
//!         }
//!     ),
//!     Operator::make_bin(
//!         "+%",
//!         BinOp {
//!             apply: |a: i32, b| Ok(a.wrap_add(b)),
//!             prio: 0,
//!             assoc: Associativity::Left,
//!         }
//!     )
//! );
//! let calculator = Calculator::<i32>::from_factory::<TrappingOpsFactory>();
//! assert!(calculator.evaluate("2147483647 + 1").is_err());
//! assert_eq!(calculator.evaluate("2147483647 +% 1")?, i32::MIN);
//! #
//! #     Ok(())
//! # }
//! ```
//!
//! Literals are maximal runs of characters that are neither whitespace nor `)`. Hence,
//! operators and operands need to be separated by whitespace, e.g., `2 * 3` instead of
//! `2*3`. A `-` directly in front of a digit belongs to the literal, any other leading `-`
//! is a unary minus that binds tighter than all binary operators.

mod calculator;
mod data_type;
mod expression;
mod operators;
mod parser;
mod result;
#[cfg(test)]
mod util;

pub use {
    calculator::{eval_str, Calculator, IntegerCalculator, RealCalculator},
    data_type::Number,
    expression::Expr,
    operators::{
        ArithOpsFactory, Associativity, BinOp, MakeOperators, Operator, OperatorTable,
        WrappingOpsFactory, MAX_PRIO, N_OPS_ON_STACK,
    },
    parser::{parse_expr, Cursor},
    result::{ExError, ExErrorKind, ExResult},
};

/// To use the calculator and its expressions without importing every item.
pub mod prelude {
    pub use super::{Calculator, Expr, IntegerCalculator, MakeOperators, RealCalculator};
}
