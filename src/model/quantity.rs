//! Exact-value resource quantities.
//!
//! A [`Quantity`] keeps the text it was written with, but equality, hashing
//! and ordering are defined on its exact numeric value. `"1"`, `"1000m"` and
//! `"1e3m"` are the same quantity, and so are `"1Ki"` and `"1024"`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::QuantityError;

/// A resource amount such as `500m` CPU or `4Gi` memory.
///
/// The value is stored as `mantissa * 10^exponent` with trailing zeros moved
/// into the exponent, which makes the representation unique per value.
#[derive(Debug, Clone)]
pub struct Quantity {
    /// Original text, used for display and serialization.
    raw: String,
    /// Significant digits with sign; zero only for the zero quantity.
    mantissa: i128,
    /// Power of ten applied to the mantissa; zero for the zero quantity.
    exponent: i32,
}

/// Multiplier implied by a unit suffix.
enum Scale {
    /// Power of ten.
    Decimal(i32),
    /// Power of two.
    Binary(u32),
}

impl Quantity {
    /// Parses a quantity from its textual form.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, has no digits, carries an
    /// unknown suffix or cannot be represented exactly.
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        input.parse()
    }

    /// Returns the text this quantity was written with.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if the value is below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Returns a unit-free text form that is identical for equal values.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}e{}", self.mantissa, self.exponent)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }

        let (negative, body) = if let Some(rest) = input.strip_prefix('-') {
            (true, rest)
        } else {
            (false, input.strip_prefix('+').unwrap_or(input))
        };

        let number_len = body
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(body.len());
        let (number, suffix) = body.split_at(number_len);
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
            return Err(QuantityError::invalid_number(input));
        }

        // Zero runs are only folded into the mantissa once a non-zero digit
        // follows them, so large round numbers do not overflow.
        let mut mantissa: i128 = 0;
        let mut pending_zeros: u32 = 0;
        for digit in whole.bytes().chain(fraction.bytes()) {
            if digit == b'0' {
                pending_zeros = pending_zeros.saturating_add(1);
                continue;
            }
            mantissa = 10_i128
                .checked_pow(pending_zeros.saturating_add(1))
                .and_then(|factor| mantissa.checked_mul(factor))
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or_else(|| QuantityError::out_of_range(input))?;
            pending_zeros = 0;
        }

        let fraction_len =
            i64::try_from(fraction.len()).map_err(|_| QuantityError::out_of_range(input))?;
        let mut exponent = i64::from(pending_zeros) - fraction_len;

        match parse_suffix(input, suffix)? {
            Scale::Decimal(power) => exponent += i64::from(power),
            Scale::Binary(bits) => {
                mantissa = mantissa
                    .checked_mul(1_i128 << bits)
                    .ok_or_else(|| QuantityError::out_of_range(input))?;
            }
        }

        if negative {
            mantissa = -mantissa;
        }

        let (mantissa, exponent) = normalize(mantissa, exponent);
        let exponent = i32::try_from(exponent).map_err(|_| QuantityError::out_of_range(input))?;

        Ok(Self {
            raw: input.to_string(),
            mantissa,
            exponent,
        })
    }
}

/// Resolves a unit suffix into its multiplier.
fn parse_suffix(input: &str, suffix: &str) -> Result<Scale, QuantityError> {
    let scale = match suffix {
        "" => Scale::Decimal(0),
        "n" => Scale::Decimal(-9),
        "u" => Scale::Decimal(-6),
        "m" => Scale::Decimal(-3),
        "k" => Scale::Decimal(3),
        "M" => Scale::Decimal(6),
        "G" => Scale::Decimal(9),
        "T" => Scale::Decimal(12),
        "P" => Scale::Decimal(15),
        "E" => Scale::Decimal(18),
        "Ki" => Scale::Binary(10),
        "Mi" => Scale::Binary(20),
        "Gi" => Scale::Binary(30),
        "Ti" => Scale::Binary(40),
        "Pi" => Scale::Binary(50),
        "Ei" => Scale::Binary(60),
        other => other
            .strip_prefix(['e', 'E'])
            .and_then(|power| power.parse::<i32>().ok())
            .map(Scale::Decimal)
            .ok_or_else(|| QuantityError::InvalidSuffix {
                input: input.to_string(),
                suffix: other.to_string(),
            })?,
    };
    Ok(scale)
}

/// Moves trailing decimal zeros of the mantissa into the exponent.
const fn normalize(mut mantissa: i128, mut exponent: i64) -> (i128, i64) {
    if mantissa == 0 {
        return (0, 0);
    }
    while mantissa % 10 == 0 {
        mantissa /= 10;
        exponent += 1;
    }
    (mantissa, exponent)
}

/// Orders two positive normalized magnitudes.
fn compare_magnitude(a: u128, a_exp: i32, b: u128, b_exp: i32) -> Ordering {
    let a_order = i64::from(a.ilog10()) + i64::from(a_exp);
    let b_order = i64::from(b.ilog10()) + i64::from(b_exp);
    match a_order.cmp(&b_order) {
        Ordering::Equal => {
            // Same order of magnitude: the digit strings, right-padded to a
            // common width, compare like the numbers themselves.
            let a_digits = a.to_string();
            let b_digits = b.to_string();
            let width = a_digits.len().max(b_digits.len());
            format!("{a_digits:0<width$}").cmp(&format!("{b_digits:0<width$}"))
        }
        unequal => unequal,
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.exponent == other.exponent
    }
}

impl Eq for Quantity {}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mantissa.hash(state);
        self.exponent.hash(state);
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.mantissa.signum().cmp(&other.mantissa.signum());
        if by_sign != Ordering::Equal || self.mantissa == 0 {
            return by_sign;
        }
        let by_magnitude = compare_magnitude(
            self.mantissa.unsigned_abs(),
            self.exponent,
            other.mantissa.unsigned_abs(),
            other.exponent,
        );
        if self.mantissa < 0 {
            by_magnitude.reverse()
        } else {
            by_magnitude
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// Accepts quantities written as strings or bare numbers.
struct QuantityVisitor;

impl Visitor<'_> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a resource quantity such as \"500m\", \"2Gi\" or 4")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Quantity, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Quantity, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Quantity, E> {
        self.visit_str(&value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Quantity, E> {
        if !value.is_finite() {
            return Err(E::custom(format!("quantity must be finite, got {value}")));
        }
        self.visit_str(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    #[test]
    fn test_equal_values_with_different_spelling() {
        assert_eq!(q("1"), q("1000m"));
        assert_eq!(q("1"), q("1e3m"));
        assert_eq!(q("1.5"), q("1500m"));
        assert_eq!(q("1Ki"), q("1024"));
        assert_eq!(q("1.5Ki"), q("1536"));
        assert_eq!(q("2G"), q("2000M"));
        assert_eq!(q("0"), q("0Gi"));
        assert_eq!(q("+3"), q("3"));
        assert_eq!(q(".5"), q("500m"));
    }

    #[test]
    fn test_different_values() {
        assert_ne!(q("1"), q("2"));
        assert_ne!(q("1G"), q("1Gi"));
        assert_ne!(q("1m"), q("1M"));
        assert_ne!(q("-1"), q("1"));
    }

    #[test]
    fn test_exponent_suffix() {
        assert_eq!(q("1e3"), q("1k"));
        assert_eq!(q("12E-1"), q("1.2"));
        assert_eq!(q("1E"), q("1e18"));
    }

    #[test]
    fn test_large_round_numbers() {
        let big = format!("1{}", "0".repeat(60));
        assert_eq!(q(&big), q("1e60"));
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(q("1000m").to_string(), "1000m");
        assert_eq!(q("1000m").canonical(), q("1").canonical());
        assert_eq!(q("1").canonical(), "1e0");
    }

    #[test]
    fn test_invalid_quantities() {
        assert_eq!(Quantity::parse(""), Err(QuantityError::Empty));
        assert!(matches!(
            Quantity::parse("abc"),
            Err(QuantityError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Quantity::parse("1.2.3"),
            Err(QuantityError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Quantity::parse("1Qi"),
            Err(QuantityError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            Quantity::parse("1e"),
            Err(QuantityError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            Quantity::parse("99999999999999999999999999999999999999999"),
            Err(QuantityError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        assert!(q("500m") < q("1"));
        assert!(q("1Gi") > q("1G"));
        assert!(q("-2") < q("-1"));
        assert!(q("-1") < q("0"));
        assert!(q("19") < q("2e1"));
        assert_eq!(q("1k").cmp(&q("1000")), Ordering::Equal);
    }

    #[test]
    fn test_sign() {
        assert!(q("-1").is_negative());
        assert!(!q("-0").is_negative());
        assert!(!q("1").is_negative());
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: Quantity = serde_json::from_str("\"250m\"").unwrap();
        let from_float: Quantity = serde_json::from_str("0.25").unwrap();
        let from_int: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(from_str, from_float);
        assert_eq!(from_int, q("4"));
        assert!(serde_json::from_str::<Quantity>("\"4Qi\"").is_err());
    }

    #[test]
    fn test_serialize_original_text() {
        let json = serde_json::to_string(&q("2Gi")).unwrap();
        assert_eq!(json, "\"2Gi\"");
    }
}
