use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use num::{Signed, ToPrimitive};

use crate::{exerr, ExResult};

/// Numeric domain of a calculator. Every operation comes in a checked flavor that
/// reports failures as [`ExError`](crate::ExError) of kind
/// [`Arithmetic`](crate::ExErrorKind::Arithmetic). Addition, subtraction, and
/// multiplication additionally come in a wrapping flavor that never fails. Negation is
/// always checked.
///
/// Operator tables decide which flavor is bound to a symbol, see
/// [`ArithOpsFactory`](crate::ArithOpsFactory) and
/// [`WrappingOpsFactory`](crate::WrappingOpsFactory).
///
/// Implementations are provided for all signed primitive integers, where checked
/// operations trap on overflow and on division by zero, and for `f32` and `f64`, where
/// IEEE-754 semantics apply and no operation ever fails.
///
/// The `Display` implementation has to be lossless, i.e., parsing the displayed
/// text with `FromStr` yields the same number.
pub trait Number: Signed + Copy + Debug + Display + FromStr {
    fn try_add(self, other: Self) -> ExResult<Self>;
    fn try_sub(self, other: Self) -> ExResult<Self>;
    fn try_mul(self, other: Self) -> ExResult<Self>;
    fn try_div(self, other: Self) -> ExResult<Self>;
    fn try_rem(self, other: Self) -> ExResult<Self>;
    fn try_neg(self) -> ExResult<Self>;
    /// Raises `self` to the power of `exponent`. Integers reject negative exponents.
    fn try_pow(self, exponent: Self) -> ExResult<Self>;

    fn wrap_add(self, other: Self) -> Self;
    fn wrap_sub(self, other: Self) -> Self;
    fn wrap_mul(self, other: Self) -> Self;

    /// The additive inverse of one.
    fn minus_one() -> Self {
        -Self::one()
    }
}

macro_rules! checked_bin {
    ($name:ident, $checked:ident, $repr:literal) => {
        fn $name(self, other: Self) -> ExResult<Self> {
            self.$checked(other)
                .ok_or_else(|| exerr!(Arithmetic, "overflow in {}{}{}", self, $repr, other))
        }
    };
}

macro_rules! checked_div_like {
    ($name:ident, $checked:ident, $repr:literal) => {
        fn $name(self, other: Self) -> ExResult<Self> {
            if other == 0 {
                return Err(exerr!(Arithmetic, "division by zero in {}{}{}", self, $repr, other));
            }
            self.$checked(other)
                .ok_or_else(|| exerr!(Arithmetic, "overflow in {}{}{}", self, $repr, other))
        }
    };
}

macro_rules! impl_int_number {
    ($($t:ty),+) => {
        $(
            impl Number for $t {
                checked_bin!(try_add, checked_add, "+");
                checked_bin!(try_sub, checked_sub, "-");
                checked_bin!(try_mul, checked_mul, "*");
                checked_div_like!(try_div, checked_div, "/");
                checked_div_like!(try_rem, checked_rem, "%");

                fn try_neg(self) -> ExResult<Self> {
                    self.checked_neg()
                        .ok_or_else(|| exerr!(Arithmetic, "overflow in -({})", self))
                }

                fn try_pow(self, exponent: Self) -> ExResult<Self> {
                    if exponent < 0 {
                        return Err(exerr!(Arithmetic, "negative exponent in {}^{}", self, exponent));
                    }
                    let exp_u32 = exponent
                        .to_u32()
                        .ok_or_else(|| exerr!(Arithmetic, "exponent too large in {}^{}", self, exponent))?;
                    self.checked_pow(exp_u32)
                        .ok_or_else(|| exerr!(Arithmetic, "overflow in {}^{}", self, exponent))
                }

                fn wrap_add(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }
                fn wrap_sub(self, other: Self) -> Self {
                    self.wrapping_sub(other)
                }
                fn wrap_mul(self, other: Self) -> Self {
                    self.wrapping_mul(other)
                }
            }
        )+
    };
}

impl_int_number!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_float_number {
    ($($t:ty),+) => {
        $(
            impl Number for $t {
                fn try_add(self, other: Self) -> ExResult<Self> {
                    Ok(self + other)
                }
                fn try_sub(self, other: Self) -> ExResult<Self> {
                    Ok(self - other)
                }
                fn try_mul(self, other: Self) -> ExResult<Self> {
                    Ok(self * other)
                }
                fn try_div(self, other: Self) -> ExResult<Self> {
                    Ok(self / other)
                }
                fn try_rem(self, other: Self) -> ExResult<Self> {
                    Ok(self % other)
                }
                fn try_neg(self) -> ExResult<Self> {
                    Ok(-self)
                }
                fn try_pow(self, exponent: Self) -> ExResult<Self> {
                    Ok(self.powf(exponent))
                }
                fn wrap_add(self, other: Self) -> Self {
                    self + other
                }
                fn wrap_sub(self, other: Self) -> Self {
                    self - other
                }
                fn wrap_mul(self, other: Self) -> Self {
                    self * other
                }
            }
        )+
    };
}

impl_float_number!(f32, f64);
