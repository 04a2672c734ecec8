use crate::{data_type::Number, ExResult};
use smallvec::SmallVec;
use std::marker::PhantomData;

/// Number of operators an [`OperatorTable`](OperatorTable) keeps on the stack.
pub const N_OPS_ON_STACK: usize = 16;

/// Highest possible priority. Nothing binds tighter than an operator with this priority.
pub const MAX_PRIO: i64 = i64::MAX;

/// Tie-break rule for two adjacent binary operators with equal priority.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Associativity {
    /// `(a - b) - c`
    Left,
    /// `a ^ (b ^ c)`
    Right,
    /// Groups like `Left`.
    None,
}

/// A binary operator that consists of a function pointer, a priority, and an associativity.
#[derive(Copy, Clone, Debug)]
pub struct BinOp<T> {
    /// Implementation of the binary operation, e.g., `|a, b| Ok(a * b)` for multiplication.
    /// Failures are propagated unchanged to the caller of the evaluation.
    pub apply: fn(T, T) -> ExResult<T>,
    /// Priority of the binary operation. A binary operation with a
    /// higher number will be executed first. For instance, in a sane world `*`
    /// has a higher priority than `+`. However, in Calcex land you could also define
    /// this differently.
    pub prio: i64,
    /// Decides the grouping of adjacent operators with equal priority.
    pub assoc: Associativity,
}

impl<T> BinOp<T> {
    /// Returns `true` if `next`, following the right operand of `self`, has to be applied
    /// before `self`. This is the case if `next` has a higher priority or if both have
    /// the same priority and are right-associative.
    pub fn yields_to(&self, next: &BinOp<T>) -> bool {
        self.prio < next.prio
            || (self.prio == next.prio
                && self.assoc == Associativity::Right
                && next.assoc == Associativity::Right)
    }
}

/// Operators can be custom-defined by the library-user in terms of this struct.
#[derive(Clone, Debug)]
pub struct Operator<T> {
    /// Representation of the operator in the string to be parsed, e.g., `-` or `**`.
    /// It must not be empty and must not contain digits, whitespace, or parentheses.
    pub repr: String,
    pub bin_op: BinOp<T>,
}

impl<T> Operator<T> {
    pub fn make_bin(repr: &str, bin_op: BinOp<T>) -> Operator<T> {
        Operator {
            repr: repr.to_string(),
            bin_op,
        }
    }
    pub fn repr(&self) -> &str {
        self.repr.as_str()
    }
}

/// Immutable mapping from operator symbols to binary operators that is consulted by the
/// parser. If a symbol is inserted twice, the last insertion wins.
#[derive(Clone, Debug)]
pub struct OperatorTable<T> {
    ops: SmallVec<[Operator<T>; N_OPS_ON_STACK]>,
}

impl<T> OperatorTable<T> {
    pub fn new() -> Self {
        OperatorTable {
            ops: SmallVec::new(),
        }
    }

    pub fn from_ops(ops: Vec<Operator<T>>) -> Self {
        ops.into_iter().collect()
    }

    /// Adds an operator. An existing operator with the same representation is replaced.
    pub fn insert(&mut self, op: Operator<T>) {
        match self.ops.iter_mut().find(|o| o.repr == op.repr) {
            Some(existing) => *existing = op,
            None => self.ops.push(op),
        }
    }

    pub fn get(&self, repr: &str) -> Option<&BinOp<T>> {
        self.ops
            .iter()
            .find(|op| op.repr == repr)
            .map(|op| &op.bin_op)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator<T>> {
        self.ops.iter()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<T> Default for OperatorTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Operator<T>> for OperatorTable<T> {
    fn from_iter<I: IntoIterator<Item = Operator<T>>>(iter: I) -> Self {
        let mut table = OperatorTable::new();
        for op in iter {
            table.insert(op);
        }
        table
    }
}

/// To use custom operators one needs to create a factory that implements this trait.
///
/// # Example
///
/// ```rust
/// use calcex::{Associativity, BinOp, MakeOperators, Operator};
/// #[derive(Clone)]
/// struct SomeOpsFactory;
/// impl MakeOperators<f32> for SomeOpsFactory {
///     fn make() -> Vec<Operator<f32>> {
///         vec![
///             Operator::make_bin(
///                 "-",
///                 BinOp {
///                     apply: |a, b| Ok(a - b),
///                     prio: 0,
///                     assoc: Associativity::Left,
///                 },
///             ),
///             Operator::make_bin(
///                 "atan2",
///                 BinOp {
///                     apply: |a, b| Ok(a.atan2(b)),
///                     prio: 1,
///                     assoc: Associativity::None,
///                 },
///             ),
///         ]
///     }
/// }
/// ```
pub trait MakeOperators<T>: Clone {
    /// Function that creates a vector of operators.
    fn make() -> Vec<Operator<T>>;

    /// Collects the operators of [`make`](MakeOperators::make) into a table.
    fn make_table() -> OperatorTable<T> {
        Self::make().into_iter().collect()
    }
}

/// Creates a unit struct `$name` that implements [`MakeOperators`](MakeOperators) for
/// the data type `$T` with the passed operators.
///
/// ```rust
/// use calcex::{ops_factory, Associativity, BinOp, MakeOperators, Operator};
/// ops_factory!(
///     BitwiseOpsFactory,
///     i32,
///     Operator::make_bin(
///         "|",
///         BinOp {
///             apply: |a, b| Ok(a | b),
///             prio: 0,
///             assoc: Associativity::Left,
///         }
///     ),
///     Operator::make_bin(
///         "&",
///         BinOp {
///             apply: |a, b| Ok(a & b),
///             prio: 1,
///             assoc: Associativity::Left,
///         }
///     )
/// );
/// assert_eq!(BitwiseOpsFactory::make().len(), 2);
/// ```
#[macro_export]
macro_rules! ops_factory {
    ($name:ident, $T:ty, $( $ops:expr ),* $(,)?) => {
        #[derive(Clone, Debug)]
        pub struct $name;
        impl $crate::MakeOperators<$T> for $name {
            fn make() -> Vec<$crate::Operator<$T>> {
                vec![$($ops,)*]
            }
        }
    };
}

/// Factory of the default operators. Integer operators trap on overflow and division by zero.
///
/// | repr | operation      | priority | associativity |
/// |------|----------------|----------|---------------|
/// | `+`  | addition       | 10       | left          |
/// | `-`  | subtraction    | 10       | left          |
/// | `*`  | multiplication | 20       | left          |
/// | `/`  | division       | 20       | left          |
/// | `%`  | remainder      | 20       | left          |
/// | `^`  | power          | 30       | right         |
#[derive(Clone, Debug)]
pub struct ArithOpsFactory<T: Number> {
    dummy: PhantomData<T>,
}

fn make_arith_ops<T: Number>(
    add: fn(T, T) -> ExResult<T>,
    sub: fn(T, T) -> ExResult<T>,
    mul: fn(T, T) -> ExResult<T>,
) -> Vec<Operator<T>> {
    let make = |repr: &str, apply: fn(T, T) -> ExResult<T>, prio: i64, assoc: Associativity| {
        Operator::make_bin(repr, BinOp { apply, prio, assoc })
    };
    vec![
        make("+", add, 10, Associativity::Left),
        make("-", sub, 10, Associativity::Left),
        make("*", mul, 20, Associativity::Left),
        make("/", T::try_div, 20, Associativity::Left),
        make("%", T::try_rem, 20, Associativity::Left),
        make("^", T::try_pow, 30, Associativity::Right),
    ]
}

impl<T: Number> MakeOperators<T> for ArithOpsFactory<T> {
    fn make() -> Vec<Operator<T>> {
        make_arith_ops(T::try_add, T::try_sub, T::try_mul)
    }
}

/// Factory with the same symbols as [`ArithOpsFactory`](ArithOpsFactory) whose
/// `+`, `-`, and `*` wrap around at the boundary of the integer type instead of
/// failing. For floats both factories behave identically.
#[derive(Clone, Debug)]
pub struct WrappingOpsFactory<T: Number> {
    dummy: PhantomData<T>,
}

impl<T: Number> MakeOperators<T> for WrappingOpsFactory<T> {
    fn make() -> Vec<Operator<T>> {
        make_arith_ops(
            |a: T, b| Ok(a.wrap_add(b)),
            |a: T, b| Ok(a.wrap_sub(b)),
            |a: T, b| Ok(a.wrap_mul(b)),
        )
    }
}
