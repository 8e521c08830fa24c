//! Quantity — an exact, non-negative resource amount.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{QuantityError, QuantityResult};
use crate::suffix::{self, Format, Scale};

const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_UNIT: u128 = 1_000_000_000;

/// A parsed resource amount such as `400m` CPU or `512Mi` of memory.
///
/// The amount is stored exactly as a count of nano-units. Equality,
/// ordering and hashing look only at the amount, so `"1"` and `"1000m"`
/// are the same quantity; [`Display`](fmt::Display) keeps the text the
/// quantity was written with.
#[derive(Debug, Clone)]
pub struct Quantity {
    nanos: u128,
    format: Format,
    text: String,
}

impl Quantity {
    /// Parse a quantity string. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> QuantityResult<Self> {
        let trimmed = text.trim();
        let unsigned = match trimmed.as_bytes().first() {
            None => return Err(QuantityError::Empty),
            Some(b'-') => {
                return Err(QuantityError::Negative {
                    raw: trimmed.to_string(),
                });
            }
            Some(b'+') => &trimmed[1..],
            Some(_) => trimmed,
        };

        let int_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, rest) = unsigned.split_at(int_len);
        let (frac_digits, suffix) = match rest.strip_prefix('.') {
            Some(after) => {
                let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(frac_len)
            }
            None => ("", rest),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(QuantityError::InvalidNumber {
                raw: trimmed.to_string(),
            });
        }

        let (format, scale) =
            suffix::lookup(suffix).ok_or_else(|| QuantityError::UnknownSuffix {
                raw: trimmed.to_string(),
                suffix: suffix.to_string(),
            })?;
        let nanos = scaled_nanos(int_digits, frac_digits, scale).ok_or_else(|| {
            QuantityError::OutOfRange {
                raw: trimmed.to_string(),
            }
        })?;

        Ok(Self {
            nanos,
            format,
            text: trimmed.to_string(),
        })
    }

    /// Amount in nano-units.
    pub fn nanos(&self) -> u128 {
        self.nanos
    }

    /// Amount in milli-units, rounded up. For CPU this is millicores.
    pub fn millis(&self) -> u128 {
        self.nanos.div_ceil(NANOS_PER_MILLI)
    }

    /// Amount in whole units, rounded up. For memory this is bytes.
    pub fn value(&self) -> u128 {
        self.nanos.div_ceil(NANOS_PER_UNIT)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The text the quantity was parsed from, trimmed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

/// `digits` scaled by `2^binary * 10^(decimal + 9 - fraction digits)`.
///
/// Returns `None` on overflow. Amounts finer than one nano-unit round up.
fn scaled_nanos(int_digits: &str, frac_digits: &str, scale: Scale) -> Option<u128> {
    let mut mantissa: u128 = 0;
    for b in int_digits.bytes().chain(frac_digits.bytes()) {
        mantissa = mantissa
            .checked_mul(10)?
            .checked_add(u128::from(b - b'0'))?;
    }
    if mantissa == 0 {
        return Some(0);
    }
    let numerator = mantissa.checked_mul(1u128.checked_shl(scale.binary)?)?;

    let frac_len = i64::try_from(frac_digits.len()).ok()?;
    let exponent = 9 - frac_len + i64::from(scale.decimal);
    if exponent >= 0 {
        let factor = 10u128.checked_pow(u32::try_from(exponent).ok()?)?;
        numerator.checked_mul(factor)
    } else {
        let shift = u32::try_from(-exponent).ok()?;
        match 10u128.checked_pow(shift) {
            Some(divisor) => Some(numerator.div_ceil(divisor)),
            // Smaller than any representable divisor: one nano-unit.
            None => Some(1),
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl Hash for Quantity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nanos.hash(state);
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Quantity::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn q(s: &str) -> Quantity {
        Quantity::parse(s).unwrap()
    }

    #[test]
    fn millicores() {
        let cpu = q("400m");
        assert_eq!(cpu.millis(), 400);
        assert_eq!(cpu.value(), 1);
        assert_eq!(cpu.format(), Format::DecimalSi);
    }

    #[test]
    fn bare_number_is_whole_units() {
        let cpu = q("2");
        assert_eq!(cpu.millis(), 2000);
        assert_eq!(cpu.value(), 2);
    }

    #[test]
    fn binary_memory() {
        let mem = q("512Mi");
        assert_eq!(mem.value(), 512 * 1024 * 1024);
        assert_eq!(mem.format(), Format::BinarySi);
        assert_eq!(q("1.5Gi").value(), 1536 * 1024 * 1024);
        assert_eq!(q("1Ki").value(), 1024);
    }

    #[test]
    fn decimal_memory() {
        assert_eq!(q("1k").value(), 1000);
        assert_eq!(q("2G").value(), 2_000_000_000);
        assert_eq!(q("1E").value(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn fractions() {
        assert_eq!(q("0.1").millis(), 100);
        assert_eq!(q(".5").millis(), 500);
        assert_eq!(q("1.").millis(), 1000);
        assert_eq!(q("+1.25").millis(), 1250);
    }

    #[test]
    fn exponent() {
        let q1 = q("1e3");
        assert_eq!(q1.value(), 1000);
        assert_eq!(q1.format(), Format::DecimalExponent);
        assert_eq!(q("5E-1").millis(), 500);
    }

    #[test]
    fn sub_nano_rounds_up() {
        assert_eq!(q("0.1n").nanos(), 1);
        assert_eq!(q("100n").millis(), 1);
    }

    #[test]
    fn zero_is_valid() {
        assert!(q("0").is_zero());
        assert!(q("0Mi").is_zero());
    }

    #[test]
    fn whitespace_is_trimmed() {
        let cpu = q("  250m\n");
        assert_eq!(cpu.millis(), 250);
        assert_eq!(cpu.as_str(), "250m");
    }

    #[test]
    fn equality_is_numeric() {
        assert_eq!(q("1"), q("1000m"));
        assert_eq!(q("1Ki"), q("1024"));
        assert_ne!(q("1k"), q("1Ki"));
        assert!(q("500m") < q("1"));
    }

    #[test]
    fn display_keeps_original_text() {
        assert_eq!(q("1000m").to_string(), "1000m");
        assert_eq!(q("512Mi").to_string(), "512Mi");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Quantity::parse(""), Err(QuantityError::Empty));
        assert_eq!(Quantity::parse("   "), Err(QuantityError::Empty));
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(
            Quantity::parse("-1"),
            Err(QuantityError::Negative { raw: "-1".to_string() })
        );
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(
            Quantity::parse("abc"),
            Err(QuantityError::InvalidNumber { raw: "abc".to_string() })
        );
        assert!(matches!(
            Quantity::parse("Mi"),
            Err(QuantityError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Quantity::parse("."),
            Err(QuantityError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn rejects_unknown_suffix() {
        assert_eq!(
            Quantity::parse("512MB"),
            Err(QuantityError::UnknownSuffix {
                raw: "512MB".to_string(),
                suffix: "MB".to_string(),
            })
        );
        assert!(Quantity::parse("400 m").is_err());
        assert!(Quantity::parse("1e").is_err());
        assert!(Quantity::parse("1.2.3").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            Quantity::parse("999999999999999999999999999999999Ei"),
            Err(QuantityError::OutOfRange { .. })
        ));
        assert_eq!(
            Quantity::parse("1e99999999999"),
            Err(QuantityError::OutOfRange { raw: "1e99999999999".to_string() })
        );
        assert_eq!(Quantity::parse("1e-99999999999").unwrap().nanos(), 1);
        assert!(Quantity::parse("0e99999999999").unwrap().is_zero());
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&q("400m")).unwrap();
        assert_eq!(json, "\"400m\"");
        let back: Quantity = serde_json::from_str("\"512Mi\"").unwrap();
        assert_eq!(back, q("512Mi"));
        assert!(serde_json::from_str::<Quantity>("\"lots\"").is_err());
    }

    proptest! {
        #[test]
        fn any_known_suffix_parses(n in 0u32..1_000_000, idx in 0usize..16) {
            let suffix = suffix::known_suffixes().nth(idx).unwrap();
            let text = format!("{n}{suffix}");
            let parsed = Quantity::parse(&text).unwrap();
            prop_assert_eq!(parsed.as_str(), text.as_str());
            prop_assert_eq!(parsed.is_zero(), n == 0);
        }

        #[test]
        fn millicores_are_exact(n in 0u64..10_000_000) {
            prop_assert_eq!(Quantity::parse(&format!("{n}m")).unwrap().millis(), u128::from(n));
        }
    }
}
