#[cfg(test)]
mod utils;
use calcex::{
    eval_str, parse_expr, prelude::*, ArithOpsFactory, Associativity, BinOp, ExErrorKind,
    ExResult, Number, Operator, OperatorTable, WrappingOpsFactory,
};
use itertools::iproduct;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, BufRead};
use utils::assert_float_eq_f64;

#[test]
fn test_version() {
    // make sure the version strings in the Cargo.toml and lib.rs coincide
    let file = File::open("src/lib.rs").unwrap();
    let version_line_lib = io::BufReader::new(file)
        .lines()
        .find(|line| line.as_ref().unwrap().contains("html_root_url"))
        .unwrap()
        .unwrap();
    let re_version = Regex::new(r#"[0-9]{1,4}\.[0-9]{1,4}\.[0-9]{1,4}"#).unwrap();
    let match_lib = re_version.find(&version_line_lib).unwrap().as_str();

    let toml_string = fs::read_to_string("Cargo.toml").unwrap();
    let cargo_toml: toml::Value = toml::from_str(&toml_string).unwrap();
    let package = cargo_toml.get("package").unwrap().as_table().unwrap();
    let version = package.get("version").unwrap().as_str().unwrap();
    assert_eq!(match_lib, version);
}

fn make_playground_ops<T: Number>() -> OperatorTable<T> {
    let make = |repr: &str, apply: fn(T, T) -> ExResult<T>, prio| {
        Operator::make_bin(
            repr,
            BinOp {
                apply,
                prio,
                assoc: Associativity::Left,
            },
        )
    };
    OperatorTable::from_ops(vec![
        make("+", T::try_add, 10),
        make("-", T::try_sub, 10),
        make("*", T::try_mul, 20),
        make("/", T::try_div, 20),
    ])
}

#[test]
fn test_playground() -> ExResult<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let calculator = Calculator::new(make_playground_ops::<i64>());
    assert_eq!(calculator.evaluate("2 + 2 * 2 + 2 / 2")?, 7);
    let calculator = Calculator::new(make_playground_ops::<f64>());
    assert_float_eq_f64(calculator.evaluate("2 + 2 * 2 + 2 / 2")?, 7.0);
    assert_float_eq_f64(calculator.evaluate("1 / 8 - 0.5")?, -0.375);
    Ok(())
}

#[test]
fn test_grouping() -> ExResult<()> {
    fn test(sut: &str, reference: i64) -> ExResult<()> {
        println!("testing {}...", sut);
        let calculator = IntegerCalculator::default();
        assert_eq!(calculator.evaluate(sut)?, reference);
        // the canonical representation evaluates identically
        let unparsed = calculator.parse(sut)?.unparse();
        assert_eq!(calculator.evaluate(unparsed.as_str())?, reference);
        println!("...ok.");
        Ok(())
    }
    test("1 + 2 * 3", 7)?;
    test("60 / 12 / 3", 1)?;
    test("60 / (12 / 3)", 15)?;
    test("10 - 4 - 3", 3)?;
    test("2 ^ 3 ^ 2", 512)?;
    test("(2 ^ 3) ^ 2", 64)?;
    test("2 * (3 + 4)", 14)?;
    test("((((1))))", 1)?;
    test("( ( 1 + 1 ) )", 2)?;
    test("-(5 + 4) + -(1 - 5) * --(4)", 7)?;
    test("-(2) ^ 2", 4)?;
    test("-(2 ^ 2)", -4)?;
    test("---(3)", -3)?;
    test("2 * -3", -6)?;
    test("-3 * -3", 9)?;
    test("17 % 5 * 2", 4)?;
    test("1 - 2 * 3 ^ 2 + 4", -13)?;
    test(" \t1\n+\n1 ", 2)?;
    Ok(())
}

#[test]
fn test_precedence_table() -> ExResult<()> {
    // two operators `@` and `#` with all combinations of priorities and associativities
    let assocs = [Associativity::Left, Associativity::Right, Associativity::None];
    for (prio_at, prio_hash, assoc_at, assoc_hash) in
        iproduct!(0..3i64, 0..3i64, assocs.iter(), assocs.iter())
    {
        let ops = OperatorTable::from_ops(vec![
            Operator::make_bin(
                "@",
                BinOp {
                    apply: |a: i64, b| Ok(a - b),
                    prio: prio_at,
                    assoc: *assoc_at,
                },
            ),
            Operator::make_bin(
                "#",
                BinOp {
                    apply: |a: i64, b| Ok(a - b),
                    prio: prio_hash,
                    assoc: *assoc_hash,
                },
            ),
        ]);
        let expr = parse_expr("1 @ 2 # 3", &ops)?;
        let right_first = prio_at < prio_hash
            || (prio_at == prio_hash
                && *assoc_at == Associativity::Right
                && *assoc_hash == Associativity::Right);
        if right_first {
            assert_eq!(expr.unparse(), "(1 @ (2 # 3))");
            assert_eq!(expr.eval()?, 2);
        } else {
            assert_eq!(expr.unparse(), "((1 @ 2) # 3)");
            assert_eq!(expr.eval()?, -4);
        }
    }
    Ok(())
}

#[test]
fn test_unary_minus_binds_tightest() -> ExResult<()> {
    let ops = OperatorTable::from_ops(vec![Operator::make_bin(
        "^",
        BinOp {
            apply: |a: i64, b| a.try_pow(b),
            prio: i64::MAX,
            assoc: Associativity::Right,
        },
    )]);
    let expr = parse_expr("-(3) ^ 2 ^ 1", &ops)?;
    assert_eq!(expr.unparse(), "(-(3) ^ (2 ^ 1))");
    assert_eq!(expr.eval()?, 9);
    Ok(())
}

#[test]
fn test_overflow() -> ExResult<()> {
    let checked = IntegerCalculator::default();
    let wrapping = Calculator::<i64>::from_factory::<WrappingOpsFactory<i64>>();

    let err = checked.evaluate("-9223372036854775808 - 1").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Arithmetic);
    assert_eq!(wrapping.evaluate("-9223372036854775808 - 1")?, i64::MAX);

    assert!(checked.evaluate("9223372036854775807 + 1").is_err());
    assert_eq!(wrapping.evaluate("9223372036854775807 + 1")?, i64::MIN);

    assert!(checked.evaluate("4611686018427387904 * 2").is_err());
    assert_eq!(wrapping.evaluate("4611686018427387904 * 2")?, i64::MIN);

    // negation always traps
    for calc in [&checked, &wrapping] {
        let err = calc.evaluate("-(-9223372036854775808)").unwrap_err();
        assert!(err.is_arithmetic());
        assert_eq!(calc.evaluate("-(-9223372036854775807)")?, i64::MAX);
    }

    assert!(checked.evaluate("1 / 0").unwrap_err().is_arithmetic());
    assert!(wrapping.evaluate("1 % (2 - 2)").unwrap_err().is_arithmetic());
    assert!(eval_str::<i8>("2 ^ -(1)").is_err());
    assert_eq!(eval_str::<i8>("-2 ^ 7")?, i8::MIN);
    Ok(())
}

#[test]
fn test_float() -> ExResult<()> {
    let calculator = RealCalculator::default();
    assert_eq!(calculator.evaluate("1 / 0")?, f64::INFINITY);
    assert_eq!(calculator.evaluate("-(1) / 0")?, f64::NEG_INFINITY);
    assert_eq!(calculator.evaluate("1 / -(0)")?, f64::NEG_INFINITY);
    assert!(calculator.evaluate("0 / 0")?.is_nan());
    assert_float_eq_f64(calculator.evaluate("2 ^ 0.5")?, 2f64.sqrt());
    assert_float_eq_f64(calculator.evaluate("1.5e2 / -3")?, -50.0);
    assert_float_eq_f64(calculator.evaluate("0.1 + 0.2")?, 0.3);
    let inf = calculator.parse("1e308 * 10")?;
    assert_eq!(inf.eval()?, f64::INFINITY);
    assert!(eval_str::<f32>("3.4e38 * 10")?.is_infinite());
    Ok(())
}

#[test]
fn test_errors() {
    fn test(sut: &str, kind: ExErrorKind) {
        let calculator = IntegerCalculator::default();
        match calculator.evaluate(sut) {
            Ok(x) => {
                println!("expected an error for '{}' but got {}", sut, x);
                assert!(false)
            }
            Err(e) => {
                println!("'{}' failed with {}", sut, e);
                assert_eq!(e.kind(), kind);
            }
        }
    }
    test("1 $ 2", ExErrorKind::Parse);
    test("", ExErrorKind::Parse);
    test("1 +", ExErrorKind::Parse);
    test("(1 + 2", ExErrorKind::Parse);
    test("1 + 2)", ExErrorKind::Parse);
    test("()", ExErrorKind::Parse);
    test("1 + ) 2", ExErrorKind::Parse);
    test("1.0 + 2", ExErrorKind::Parse);
    test("2*3", ExErrorKind::Parse);
    test("2 *(3)", ExErrorKind::Parse);
    test("1 2", ExErrorKind::Parse);
    test("10 / (5 - 5)", ExErrorKind::Arithmetic);
    test("-(1 / 0)", ExErrorKind::Arithmetic);
    // evaluation only starts after the complete input has been parsed
    test("1 / 0 + (", ExErrorKind::Parse);
}

fn random_expr(
    rng: &mut StdRng,
    depth: usize,
    ops: &[&str],
    literal: fn(&mut StdRng) -> String,
) -> String {
    if depth == 0 || rng.gen_bool(0.2) {
        return literal(rng);
    }
    match rng.gen_range(0..4) {
        0 => format!("-({})", random_expr(rng, depth - 1, ops, literal)),
        1 => format!("({})", random_expr(rng, depth - 1, ops, literal)),
        _ => {
            let op = ops[rng.gen_range(0..ops.len())];
            let lhs = random_expr(rng, depth - 1, ops, literal);
            let rhs = random_expr(rng, depth - 1, ops, literal);
            format!("{} {} {}", lhs, op, rhs)
        }
    }
}

fn random_int_literal(rng: &mut StdRng) -> String {
    format!("{}", rng.gen_range(-9..10))
}

fn random_float_literal(rng: &mut StdRng) -> String {
    format!("{}", rng.gen_range(-40..40) as f64 / 8.0)
}

fn assert_same_float(f1: f64, f2: f64, context: &str) {
    assert!(
        f1 == f2 || (f1.is_nan() && f2.is_nan()),
        "{} != {} for {}",
        f1,
        f2,
        context
    );
}

#[test]
fn test_unparse_reparse() -> ExResult<()> {
    let calculator = IntegerCalculator::default();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let sut = random_expr(&mut rng, 4, &["+", "-", "*"], random_int_literal);
        let expr = calculator.parse(&sut)?;
        let value = expr.eval()?;

        let reparsed = calculator.parse(&expr.unparse())?;
        assert_eq!(reparsed.eval()?, value, "{} vs {}", sut, expr);
        assert_eq!(reparsed.unparse(), expr.unparse());

        let simplified = expr.simplify();
        assert_eq!(simplified.eval()?, value, "{} vs {}", sut, simplified);
        let reparsed_simplified = calculator.parse(&simplified.unparse())?;
        assert_eq!(reparsed_simplified.eval()?, value);
    }
    Ok(())
}

#[test]
fn test_unparse_reparse_float() -> ExResult<()> {
    let calculator = RealCalculator::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let sut = random_expr(
            &mut rng,
            4,
            &["+", "-", "*", "/", "^"],
            random_float_literal,
        );
        let expr = calculator.parse(&sut)?;
        let value = expr.eval()?;

        let unparsed = expr.unparse();
        let reparsed = calculator.parse(&unparsed)?;
        assert_same_float(reparsed.eval()?, value, &sut);
        assert_eq!(reparsed.unparse(), unparsed);

        let simplified = expr.simplify();
        assert_same_float(simplified.eval()?, value, &sut);
        let reparsed_simplified = calculator.parse(&simplified.unparse())?;
        assert_same_float(reparsed_simplified.eval()?, value, &sut);
    }
    Ok(())
}

#[test]
fn test_custom_factory() -> ExResult<()> {
    #[derive(Clone)]
    struct MinMaxOpsFactory;
    impl MakeOperators<f64> for MinMaxOpsFactory {
        fn make() -> Vec<Operator<f64>> {
            vec![
                Operator::make_bin(
                    "max",
                    BinOp {
                        apply: |a, b| Ok(a.max(b)),
                        prio: 0,
                        assoc: Associativity::Left,
                    },
                ),
                Operator::make_bin(
                    "min",
                    BinOp {
                        apply: |a, b| Ok(a.min(b)),
                        prio: 1,
                        assoc: Associativity::Left,
                    },
                ),
            ]
        }
    }
    let calculator = Calculator::<f64>::from_factory::<MinMaxOpsFactory>();
    assert_float_eq_f64(calculator.evaluate("1 max 5 min 3")?, 3.0);
    assert_float_eq_f64(calculator.evaluate("(1 max 5) min 3")?, 3.0);
    assert_float_eq_f64(calculator.evaluate("4 max 5 min -(3)")?, 4.0);
    assert!(calculator.evaluate("1 + 2").is_err());
    // the table is independent of the default operators
    assert!(ArithOpsFactory::<f64>::make_table().get("max").is_none());
    Ok(())
}
