//! Numeric representation shared by all format bridges.
//!
//! A tree node's number is either an exact integer or a floating-point
//! value. Keeping the two apart is what makes the narrowest-fit rule of
//! [`convert`](crate::convert) possible: an integral number translates to
//! the smallest integer shape that holds it exactly, and only a genuinely
//! fractional number becomes a float or double.

use std::fmt;

/// A number read from or written to a tree node.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// The narrowest exact representation of a [`Number`].
///
/// Integer shapes are preferred in width order; `Float`/`Double` appear only
/// when no exact integral fit exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Narrowed {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    /// The exact integer value, if this number has one.
    ///
    /// A float with a zero fractional part inside the `i64` range counts as
    /// integral.
    #[inline]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(f) => {
                if f.is_finite()
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f < i64::MAX as f64
                {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// The value as a double, possibly losing precision for large integers.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Whether this number holds an exact integer.
    #[inline]
    pub fn is_integral(self) -> bool {
        self.as_i64().is_some()
    }

    /// The narrowest exact representation of this number.
    pub fn narrow(self) -> Narrowed {
        if let Some(i) = self.as_i64() {
            if let Ok(b) = i8::try_from(i) {
                return Narrowed::Byte(b);
            }
            if let Ok(s) = i16::try_from(i) {
                return Narrowed::Short(s);
            }
            if let Ok(v) = i32::try_from(i) {
                return Narrowed::Int(v);
            }
            return Narrowed::Long(i);
        }
        let f = self.as_f64();
        if (f as f32) as f64 == f {
            Narrowed::Float(f as f32)
        } else {
            Narrowed::Double(f)
        }
    }
}

impl PartialEq for Number {
    /// Numeric equality across variants. `Int(5)` equals `Float(5.0)`.
    fn eq(&self, other: &Self) -> bool {
        match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.as_f64() == other.as_f64(),
            _ => false,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i8> for Number {
    fn from(value: i8) -> Self {
        Number::Int(value as i64)
    }
}

impl From<i16> for Number {
    fn from(value: i16) -> Self {
        Number::Int(value as i64)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(value as f64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}
