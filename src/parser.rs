use crate::data_type::Number;
use crate::expression::Expr;
use crate::operators::{BinOp, OperatorTable};
use crate::{exerr, ExResult};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    // maximal run of characters that are neither digits, whitespace, nor a closing paren
    static ref RE_OPERATOR: Regex = Regex::new(r"^[^0-9\s)]+").unwrap();
    // maximal run of characters that are neither whitespace nor a closing paren
    static ref RE_LITERAL: Regex = Regex::new(r"^[^\s)]+").unwrap();
}

/// Remaining input of one parse. It only shrinks from the left and is never rewound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    text: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Cursor<'a> {
        Cursor { text }
    }

    pub fn rest(&self) -> &'a str {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.text.chars().next()
    }

    pub fn at_close_paren(&self) -> bool {
        self.first() == Some(')')
    }

    /// A `-` is a unary minus if another character follows that is not a digit. Otherwise
    /// it belongs to a numeric literal.
    pub fn at_unary_minus(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next() == Some('-') && matches!(chars.next(), Some(c) if !c.is_ascii_digit())
    }

    pub fn skip_whitespace(&mut self) {
        self.text = self.text.trim_start();
    }

    /// Returns the operator symbol at the beginning of the remaining input without
    /// consuming it. The symbol is empty if the input starts with a digit, whitespace,
    /// or `)`, or if the input is exhausted.
    pub fn peek_operator(&self) -> &'a str {
        RE_OPERATOR.find(self.text).map_or("", |m| m.as_str())
    }

    /// Drops the first `n` characters and returns them.
    ///
    /// # Errors
    ///
    /// If less than `n` characters remain.
    pub fn consume(&mut self, n: usize) -> ExResult<&'a str> {
        let end = match self.text.char_indices().nth(n) {
            Some((idx, _)) => idx,
            None if self.text.chars().count() == n => self.text.len(),
            None => {
                return Err(exerr!(
                    Parse,
                    "cannot consume {} characters of '{}'",
                    n,
                    self.text
                ))
            }
        };
        let (consumed, rest) = self.text.split_at(end);
        self.text = rest;
        Ok(consumed)
    }

    /// Consumes and returns the maximal run of characters that are neither whitespace
    /// nor `)`. The result is empty if there is no such run.
    pub fn consume_literal(&mut self) -> &'a str {
        let literal = RE_LITERAL.find(self.text).map_or("", |m| m.as_str());
        self.text = &self.text[literal.len()..];
        literal
    }
}

/// Parses a string into an expression tree with the binary operators of the passed table.
/// The complete input has to be consumed.
///
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// #
/// use calcex::{parse_expr, ArithOpsFactory, MakeOperators};
/// let ops = ArithOpsFactory::<i64>::make_table();
/// let expr = parse_expr("1 + 2 * -(3)", &ops)?;
/// assert_eq!(expr.unparse(), "(1 + (2 * -(3)))");
/// assert_eq!(expr.eval()?, -5);
/// #
/// #     Ok(())
/// # }
/// ```
///
/// # Errors
///
/// An [`ExError`](crate::ExError) of kind [`Parse`](crate::ExErrorKind::Parse) is returned, if
///
/// * an operand is missing, e.g., `1 +` or `()`,
/// * a parenthesis is not closed, e.g., `(1 + 2`,
/// * a closing parenthesis has no opening counterpart, e.g., `1 + 2)`,
/// * an operator symbol is not in the table, e.g., `1 $ 2`,
/// * a literal cannot be parsed into the numeric type, e.g., `1.5` for integers or `2*3`
///   where the missing whitespace glues the operator to the literal.
pub fn parse_expr<T: Number>(text: &str, ops: &OperatorTable<T>) -> ExResult<Expr<T>> {
    let mut cursor = Cursor::new(text);
    let expr = parse(&mut cursor, ops)?;
    if !cursor.is_empty() {
        return Err(exerr!(
            Parse,
            "unexpected '{}' after complete expression",
            cursor.rest()
        ));
    }
    Ok(expr)
}

/// Parses operands and operations until the input is exhausted or a closing paren is found.
/// The closing paren is not consumed.
fn parse<T: Number>(cursor: &mut Cursor, ops: &OperatorTable<T>) -> ExResult<Expr<T>> {
    cursor.skip_whitespace();
    let mut result = parse_operand(cursor, ops)?;
    cursor.skip_whitespace();
    while !cursor.is_empty() && !cursor.at_close_paren() {
        result = parse_operation(cursor, ops, result)?;
        cursor.skip_whitespace();
    }
    Ok(result)
}

fn parse_operand<T: Number>(cursor: &mut Cursor, ops: &OperatorTable<T>) -> ExResult<Expr<T>> {
    match cursor.first() {
        None => Err(exerr!(Parse, "expected operand, found end of input")),
        Some('-') if cursor.at_unary_minus() => {
            cursor.consume(1)?;
            Ok(Expr::neg(parse_operand(cursor, ops)?))
        }
        Some('(') => {
            cursor.consume(1)?;
            let inner = parse(cursor, ops)?;
            match cursor.first() {
                Some(')') => {
                    cursor.consume(1)?;
                    Ok(inner)
                }
                // parse only stops at `)` or at the end of the input
                _ => Err(exerr!(Parse, "expected ), found end of input")),
            }
        }
        Some(c) => {
            let literal = cursor.consume_literal();
            if literal.is_empty() {
                return Err(exerr!(Parse, "expected operand, found {}", c));
            }
            literal
                .parse::<T>()
                .map(Expr::Num)
                .map_err(|_| exerr!(Parse, "cannot parse '{}' as number", literal))
        }
    }
}

/// Consumes an operator symbol and its right operand and combines them with `first_operand`.
fn parse_operation<T: Number>(
    cursor: &mut Cursor,
    ops: &OperatorTable<T>,
    first_operand: Expr<T>,
) -> ExResult<Expr<T>> {
    let repr = cursor.peek_operator();
    if repr.is_empty() {
        return Err(exerr!(Parse, "expected operation, found '{}'", cursor.rest()));
    }
    cursor.consume(repr.chars().count())?;
    let bin_op = ops
        .get(repr)
        .ok_or_else(|| exerr!(Parse, "expected operation, found unknown operator {}", repr))?;
    trace!("operator {} with priority {}", repr, bin_op.prio);
    let second_operand = parse_second_operand(cursor, ops, bin_op)?;
    Ok(Expr::bin(first_operand, second_operand, *bin_op, repr))
}

fn yields_to_next<T: Number>(cursor: &Cursor, ops: &OperatorTable<T>, bin_op: &BinOp<T>) -> bool {
    !cursor.is_empty()
        && !cursor.at_close_paren()
        && ops
            .get(cursor.peek_operator())
            .map_or(false, |next| bin_op.yields_to(next))
}

/// Parses the right operand of `bin_op`. Subsequent operations are folded into the operand
/// as long as `bin_op` yields to them.
fn parse_second_operand<T: Number>(
    cursor: &mut Cursor,
    ops: &OperatorTable<T>,
    bin_op: &BinOp<T>,
) -> ExResult<Expr<T>> {
    cursor.skip_whitespace();
    let mut second_operand = parse_operand(cursor, ops)?;
    cursor.skip_whitespace();
    while yields_to_next(cursor, ops, bin_op) {
        second_operand = parse_operation(cursor, ops, second_operand)?;
        cursor.skip_whitespace();
    }
    Ok(second_operand)
}
