//! Exact rational numbers
//!
//! Dimensional exponents are kept as fractions so that re-expressing a
//! quantity in another basis never introduces rounding. A `Fraction` is
//! always stored in lowest terms with a positive denominator, which makes
//! the derived structural equality coincide with numeric equality.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{Result, UnitError};

/// Immutable rational number in lowest terms
///
/// Invariants: `denominator > 0` and `gcd(|numerator|, denominator) == 1`.
/// Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    pub const ZERO: Self = Self::whole(0);
    pub const ONE: Self = Self::whole(1);

    /// Create `numerator / denominator`, reduced to lowest terms
    ///
    /// Fails with `DivisionByZero` when `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(UnitError::DivisionByZero);
        }
        Ok(Self::reduced(numerator, denominator))
    }

    /// Create the whole number `n / 1`
    pub const fn whole(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    // Callers guarantee `denominator != 0`, so the gcd is at least 1.
    fn reduced(numerator: i64, denominator: i64) -> Self {
        let divisor = gcd(numerator.abs(), denominator.abs());
        let (numerator, denominator) = (numerator / divisor, denominator / divisor);
        if denominator < 0 {
            Self {
                numerator: -numerator,
                denominator: -denominator,
            }
        } else {
            Self {
                numerator,
                denominator,
            }
        }
    }

    #[inline]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// True when the denominator is 1
    #[inline]
    pub const fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub const fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator,
        }
    }

    /// Swap numerator and denominator
    ///
    /// Fails with `DivisionByZero` for zero.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(UnitError::DivisionByZero);
        }
        Ok(Self::reduced(self.denominator, self.numerator))
    }

    /// Multiply by the inverse of `rhs`
    pub fn divide(&self, rhs: Fraction) -> Result<Self> {
        Ok(*self * rhs.inverse()?)
    }

    /// Floating-point approximation, for display only
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Euclid's algorithm; `gcd(a, 0) == a`
const fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Self::Output {
        let common = gcd(self.denominator, rhs.denominator);
        let numerator = self.numerator * (rhs.denominator / common)
            + rhs.numerator * (self.denominator / common);
        Fraction::reduced(numerator, self.denominator / common * rhs.denominator)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Self) -> Self::Output {
        // Cross-reduce first to keep the products small
        let left = gcd(self.numerator.abs(), rhs.denominator);
        let right = gcd(rhs.numerator.abs(), self.denominator);
        Fraction::reduced(
            (self.numerator / left) * (rhs.numerator / right),
            (self.denominator / right) * (rhs.denominator / left),
        )
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        Fraction {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

/// Left fold in iteration order
impl Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::ZERO, |acc, f| acc + f)
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::whole(n)
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

// =============================================================================
// Text and serde
// =============================================================================

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = UnitError;

    /// Accepts `n` or `n/d`, with optional sign and surrounding whitespace
    ///
    /// `i64::MIN` has no positive counterpart and is rejected in either part.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || UnitError::InvalidFraction(s.to_string());
        let parse = |part: &str| {
            part.trim()
                .parse::<i64>()
                .ok()
                .filter(|n| n.checked_abs().is_some())
                .ok_or_else(invalid)
        };

        match s.trim().split_once('/') {
            Some((numerator, denominator)) => Fraction::new(parse(numerator)?, parse(denominator)?),
            None => Ok(Fraction::whole(parse(s)?)),
        }
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Whole(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Whole(n) if n.checked_abs().is_some() => Ok(Fraction::whole(n)),
            Repr::Whole(n) => Err(serde::de::Error::custom(UnitError::InvalidFraction(
                n.to_string(),
            ))),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_reduction() {
        assert_eq!(frac(6, 8), frac(3, 4));
        assert_eq!(frac(-2, -4), frac(1, 2));
        assert_eq!(frac(0, 5), frac(0, 1));
        assert_eq!(frac(0, -7), Fraction::ZERO);
    }

    #[test]
    fn test_sign_lives_in_numerator() {
        let f = frac(3, -9);
        assert_eq!(f.numerator(), -1);
        assert_eq!(f.denominator(), 3);
        assert!(f.is_negative());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Fraction::new(1, 0), Err(UnitError::DivisionByZero));
        assert_eq!(Fraction::new(0, 0), Err(UnitError::DivisionByZero));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(frac(1, 2) + frac(1, 3), frac(5, 6));
        assert_eq!(frac(1, 2) - frac(3, 4), frac(-1, 4));
        assert_eq!(frac(2, 3) * frac(9, 4), frac(3, 2));
        assert_eq!(frac(-2, 3) * frac(0, 1), Fraction::ZERO);
        assert_eq!(frac(1, 2).divide(frac(1, 4)).unwrap(), Fraction::whole(2));
        assert_eq!(-frac(5, 7), frac(-5, 7));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(frac(-3, 4).inverse().unwrap(), frac(-4, 3));
        assert_eq!(Fraction::ZERO.inverse(), Err(UnitError::DivisionByZero));
        assert_eq!(frac(1, 2).divide(Fraction::ZERO), Err(UnitError::DivisionByZero));
    }

    #[test]
    fn test_is_integer() {
        assert!(Fraction::whole(-3).is_integer());
        assert!(frac(8, 4).is_integer());
        assert!(!frac(1, 2).is_integer());
    }

    #[test]
    fn test_to_f64() {
        assert!((frac(1, 4).to_f64() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(frac(-6, 4).to_string(), "-3/2");
        assert_eq!(Fraction::whole(2).to_string(), "2/1");
    }

    #[test]
    fn test_parse() {
        assert_eq!("3".parse::<Fraction>().unwrap(), Fraction::whole(3));
        assert_eq!(" -1 / 2 ".parse::<Fraction>().unwrap(), frac(-1, 2));
        assert_eq!("4/-6".parse::<Fraction>().unwrap(), frac(-2, 3));
        assert!(matches!("x/2".parse::<Fraction>(), Err(UnitError::InvalidFraction(_))));
        assert_eq!("1/0".parse::<Fraction>(), Err(UnitError::DivisionByZero));
    }

    #[test]
    fn test_parse_rejects_unrepresentable_magnitude() {
        let min = i64::MIN.to_string();
        for text in [format!("{min}/2"), format!("3/{min}"), min.clone()] {
            assert_eq!(
                text.parse::<Fraction>(),
                Err(UnitError::InvalidFraction(text.clone()))
            );
        }
        assert!(serde_json::from_str::<Fraction>(&min).is_err());
        assert!(serde_json::from_str::<Fraction>(&format!("\"{min}/2\"")).is_err());

        let max = format!("{}/2", i64::MAX);
        assert_eq!(max.parse::<Fraction>().unwrap(), frac(i64::MAX, 2));
    }

    #[test]
    fn test_ordering() {
        assert!(frac(1, 3) < frac(1, 2));
        assert!(frac(-1, 2) < Fraction::ZERO);
        assert_eq!(frac(2, 4).cmp(&frac(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_sum() {
        let total: Fraction = [frac(1, 2), frac(1, 3), frac(1, 6)].into_iter().sum();
        assert_eq!(total, Fraction::ONE);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&frac(-1, 2)).unwrap();
        assert_eq!(json, "\"-1/2\"");
        let whole: Fraction = serde_json::from_str("3").unwrap();
        assert_eq!(whole, Fraction::whole(3));
        let text: Fraction = serde_json::from_str("\"2/6\"").unwrap();
        assert_eq!(text, frac(1, 3));
    }
}
