use log::debug;

use crate::{
    data_type::Number,
    expression::Expr,
    operators::{ArithOpsFactory, MakeOperators, OperatorTable},
    parser, ExResult,
};

/// Binds an [`OperatorTable`](OperatorTable) to the parser. A calculator is not changed by
/// parsing or evaluation and can be shared between threads.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use calcex::{Associativity, BinOp, Calculator, Operator, OperatorTable};
/// let ops = OperatorTable::from_ops(vec![
///     Operator::make_bin(
///         "+",
///         BinOp {
///             apply: |a: i64, b| Ok(a + b),
///             prio: 10,
///             assoc: Associativity::Left,
///         },
///     ),
///     Operator::make_bin(
///         "*",
///         BinOp {
///             apply: |a: i64, b| Ok(a * b),
///             prio: 20,
///             assoc: Associativity::Left,
///         },
///     ),
/// ]);
/// let calculator = Calculator::new(ops);
/// assert_eq!(calculator.evaluate("2 + 2 * 2 + -(2)")?, 4);
/// #
/// #     Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Calculator<T> {
    ops: OperatorTable<T>,
}

impl<T: Number> Calculator<T> {
    pub fn new(ops: OperatorTable<T>) -> Self {
        Calculator { ops }
    }

    /// Creates a calculator with the operators of the factory `OF`.
    pub fn from_factory<OF: MakeOperators<T>>() -> Self {
        Calculator::new(OF::make_table())
    }

    pub fn operators(&self) -> &OperatorTable<T> {
        &self.ops
    }

    /// Parses `text` into an expression tree, see [`parse_expr`](parser::parse_expr).
    pub fn parse(&self, text: &str) -> ExResult<Expr<T>> {
        parser::parse_expr(text, &self.ops)
    }

    /// Parses and evaluates `text`.
    ///
    /// # Errors
    ///
    /// The first error that occurs during parsing or evaluation is returned.
    pub fn evaluate(&self, text: &str) -> ExResult<T> {
        let expr = self.parse(text)?;
        debug!("evaluating {}", expr);
        expr.eval()
    }
}

/// Calculator with the operators of [`ArithOpsFactory`](ArithOpsFactory).
impl<T: Number> Default for Calculator<T> {
    fn default() -> Self {
        Calculator::from_factory::<ArithOpsFactory<T>>()
    }
}

pub type IntegerCalculator = Calculator<i64>;
pub type RealCalculator = Calculator<f64>;

/// Parses and evaluates a string with the operators of
/// [`ArithOpsFactory`](ArithOpsFactory).
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// let result = calcex::eval_str::<f64>("2 ^ 0.5 * 2 ^ 0.5")?;
/// assert!((result - 2.0).abs() < 1e-12);
/// #
/// #     Ok(())
/// # }
/// ```
pub fn eval_str<T: Number>(text: &str) -> ExResult<T> {
    Calculator::<T>::default().evaluate(text)
}

#[cfg(test)]
mod tests {
    use super::{eval_str, Calculator, IntegerCalculator, RealCalculator};
    use crate::{ExResult, MakeOperators, WrappingOpsFactory};

    fn assert_send_sync<S: Send + Sync>(_: &S) {}

    #[test]
    fn test_calculators() -> ExResult<()> {
        let int_calc = IntegerCalculator::default();
        assert_eq!(int_calc.evaluate("2 + 2 * 2 + 2 / 2")?, 7);
        assert_eq!(int_calc.operators().len(), 6);
        let real_calc = RealCalculator::default();
        assert_eq!(real_calc.evaluate("1 / 4")?, 0.25);
        assert_eq!(eval_str::<i32>("7 % 4 ^ 1")?, 3);
        assert_send_sync(&real_calc);
        Ok(())
    }

    #[test]
    fn test_from_factory() -> ExResult<()> {
        let calc = Calculator::<i16>::from_factory::<WrappingOpsFactory<i16>>();
        assert_eq!(calc.evaluate("32767 + 1")?, i16::MIN);
        let table = WrappingOpsFactory::<i16>::make_table();
        assert_eq!(Calculator::new(table).evaluate("-32768 - 1")?, i16::MAX);
        assert!(IntegerCalculator::default().evaluate("1 / 0").is_err());
        Ok(())
    }
}
