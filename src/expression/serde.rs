use serde::{Serialize, Serializer};

use crate::{data_type::Number, Expr};

/// Expressions are serialized as their canonical string representation, see
/// [`unparse`](Expr::unparse).
impl<T: Number> Serialize for Expr<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.unparse().as_str())
    }
}

#[cfg(test)]
use {
    crate::{parse_expr, ArithOpsFactory, MakeOperators},
    serde_test::Token,
};

#[test]
fn test_ser() {
    let test = |s, reference| {
        let ops = ArithOpsFactory::<f64>::make_table();
        let expr = parse_expr(s, &ops).unwrap();
        serde_test::assert_ser_tokens(&expr, &[Token::Str(reference)]);
        let serialized = serde_json::to_string(&expr).unwrap();
        assert_eq!(serialized, format!("\"{}\"", reference));
    };
    test("1.5 + 2 * 3", "(1.5 + (2 * 3))");
    test("-(2) ^ 0.5", "(-(2) ^ 0.5)");
    test("((7))", "7");
}

#[test]
fn test_ser_simplified() {
    let ops = ArithOpsFactory::<i32>::make_table();
    let expr = parse_expr("4 - -(3)", &ops).unwrap().simplify();
    let serialized = serde_json::to_string(&expr).unwrap();
    assert_eq!(serialized, "\"(4 + 3)\"");
}
