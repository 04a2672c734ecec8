use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Distinguishes input that could not be parsed from arithmetic that failed
/// while evaluating a parsed expression.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ExErrorKind {
    /// Malformed input, e.g., a missing operand, an unknown operator symbol, an
    /// unbalanced parenthesis, or a literal that is not a number of the target type.
    Parse,
    /// An operator function failed, e.g., a checked addition overflowed or an
    /// integer was divided by zero.
    Arithmetic,
}

impl Display for ExErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ExErrorKind::Parse => write!(f, "parse error"),
            ExErrorKind::Arithmetic => write!(f, "arithmetic error"),
        }
    }
}

/// This will be thrown at you if something within Calcex went wrong. Ok, obviously it is not an
/// exception, so thrown needs to be understood figuratively.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct ExError {
    kind: ExErrorKind,
    msg: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind, msg: &str) -> ExError {
        ExError {
            kind,
            msg: msg.to_string(),
        }
    }
    pub fn parse(msg: &str) -> ExError {
        ExError::new(ExErrorKind::Parse, msg)
    }
    pub fn arithmetic(msg: &str) -> ExError {
        ExError::new(ExErrorKind::Arithmetic, msg)
    }
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }
    pub fn msg(&self) -> &str {
        &self.msg
    }
    pub fn is_parse(&self) -> bool {
        self.kind == ExErrorKind::Parse
    }
    pub fn is_arithmetic(&self) -> bool {
        self.kind == ExErrorKind::Arithmetic
    }
}

impl Display for ExError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl Error for ExError {}

/// Calcex' result type with [`ExError`](ExError) as error type.
pub type ExResult<U> = Result<U, ExError>;

/// Creates an [`ExError`](ExError) of the given [`ExErrorKind`](ExErrorKind) with a
/// formatted message.
///
/// ```rust
/// use calcex::{exerr, ExErrorKind};
/// let err = exerr!(Parse, "unknown operator {}", "$");
/// assert_eq!(err.kind(), ExErrorKind::Parse);
/// assert_eq!(err.msg(), "unknown operator $");
/// ```
#[macro_export]
macro_rules! exerr {
    ($kind:ident, $s:literal $(, $exps:expr)* $(,)?) => {
        $crate::ExError::new($crate::ExErrorKind::$kind, format!($s $(, $exps)*).as_str())
    };
}
