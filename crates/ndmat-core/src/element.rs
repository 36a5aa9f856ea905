//! Element capability traits
//!
//! A single generic [`Tensor<T>`](crate::Tensor) serves every element
//! category. The operations available on a particular instantiation are
//! decided at compile time by which of these traits `T` implements:
//!
//! | trait              | adds                                              | implemented for                         |
//! |--------------------|---------------------------------------------------|-----------------------------------------|
//! | [`Element`]        | storage, resize, map, permute, squeeze, printing  | all of the below, `bool`, `char`, `String` |
//! | [`NumericElement`] | `+=`, `-=`, scaling, sum/product/min/max          | integers, floats, complex               |
//! | [`ScalarElement`]  | conjugation, mean/variance, LU-based linear algebra | `f32`, `f64`, `Complex<f32>`, `Complex<f64>` |
//! | [`RealElement`]    | interpolation, `+Inf`/`-Inf`/`NaN` printing        | `f32`, `f64`                            |

use std::fmt;
use std::ops::{AddAssign, DivAssign, MulAssign, Neg, SubAssign};

use scirs2_core::num_complex::Complex;
use scirs2_core::numeric::{Float, Num, NumCast};

use crate::types::ElementCategory;

/// Base capability shared by every tensor element
pub trait Element: Clone + Default + PartialEq + fmt::Debug {
    /// Category of tensors built over this element type
    const CATEGORY: ElementCategory;

    /// Write the element the way tensors print it
    ///
    /// Implementations honour the formatter's precision where it makes
    /// sense; width is applied by the caller.
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Elements supporting ring arithmetic
pub trait NumericElement:
    Element + Copy + Num + AddAssign + SubAssign + MulAssign + DivAssign
{
}

/// Field elements with a conjugate and a square root (real or complex)
pub trait ScalarElement: NumericElement + Neg<Output = Self> {
    /// The underlying real type
    type Real: RealElement;

    /// Complex conjugate (identity for real values)
    fn conj(self) -> Self;

    /// Absolute value / complex modulus
    fn modulus(self) -> Self::Real;

    /// Principal square root
    fn scalar_sqrt(self) -> Self;

    /// The not-a-number sentinel
    fn scalar_nan() -> Self;

    /// Whether any component is NaN
    fn is_nan_scalar(self) -> bool;

    /// Embed a real value
    fn from_real(value: Self::Real) -> Self;

    /// Real part
    fn real_part(self) -> Self::Real;

    /// Embed an element count
    fn from_count(n: usize) -> Self {
        let count = <Self::Real as NumCast>::from(n).unwrap_or_else(<Self::Real as Float>::nan);
        Self::from_real(count)
    }
}

/// Real floating-point elements
pub trait RealElement: ScalarElement<Real = Self> + Float {}

/// Display adapter that prints a value through [`Element::fmt_element`]
pub struct ElementDisplay<'a, T>(pub &'a T);

impl<T: Element> fmt::Display for ElementDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_element(f)
    }
}

fn fmt_real<F: Float + fmt::Display>(value: F, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > F::zero() { "+Inf" } else { "-Inf" })
    } else {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, value),
            None => write!(f, "{}", value),
        }
    }
}

macro_rules! impl_general_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const CATEGORY: ElementCategory = ElementCategory::General;

            fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self)
            }
        }
    )*};
}

macro_rules! impl_integer_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const CATEGORY: ElementCategory = ElementCategory::Numeric;

            fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self)
            }
        }

        impl NumericElement for $t {}
    )*};
}

macro_rules! impl_real_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const CATEGORY: ElementCategory = ElementCategory::Real;

            fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_real(*self, f)
            }
        }

        impl NumericElement for $t {}

        impl ScalarElement for $t {
            type Real = $t;

            fn conj(self) -> Self {
                self
            }

            fn modulus(self) -> Self {
                self.abs()
            }

            fn scalar_sqrt(self) -> Self {
                self.sqrt()
            }

            fn scalar_nan() -> Self {
                <$t>::NAN
            }

            fn is_nan_scalar(self) -> bool {
                self.is_nan()
            }

            fn from_real(value: Self) -> Self {
                value
            }

            fn real_part(self) -> Self {
                self
            }

            fn from_count(n: usize) -> Self {
                n as $t
            }
        }

        impl RealElement for $t {}

        impl Element for Complex<$t> {
            const CATEGORY: ElementCategory = ElementCategory::Complex;

            fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_real(self.re, f)?;
                if self.im.is_sign_negative() && !self.im.is_nan() {
                    f.write_str(" - j")?;
                    fmt_real(-self.im, f)
                } else {
                    f.write_str(" + j")?;
                    fmt_real(self.im, f)
                }
            }
        }

        impl NumericElement for Complex<$t> {}

        impl ScalarElement for Complex<$t> {
            type Real = $t;

            fn conj(self) -> Self {
                Complex::conj(&self)
            }

            fn modulus(self) -> $t {
                self.norm()
            }

            fn scalar_sqrt(self) -> Self {
                self.sqrt()
            }

            fn scalar_nan() -> Self {
                Complex::new(<$t>::NAN, <$t>::NAN)
            }

            fn is_nan_scalar(self) -> bool {
                self.re.is_nan() || self.im.is_nan()
            }

            fn from_real(value: $t) -> Self {
                Complex::new(value, 0.0)
            }

            fn real_part(self) -> $t {
                self.re
            }
        }
    )*};
}

impl_general_element!(bool, char, String);
impl_integer_element!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_real_element!(f32, f64);
