//! Unit suffix table.

/// Which family of suffix a quantity was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Powers of 1000: `m`, `k`, `M`, `G`, ... or no suffix at all.
    DecimalSi,
    /// Powers of 1024: `Ki`, `Mi`, `Gi`, ...
    BinarySi,
    /// Scientific notation: `1e3`, `5E-1`.
    DecimalExponent,
}

/// Multiplier applied to the numeric part: `2^binary * 10^decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scale {
    pub binary: u32,
    pub decimal: i32,
}

impl Scale {
    const fn decimal(decimal: i32) -> Self {
        Self { binary: 0, decimal }
    }

    const fn binary(binary: u32) -> Self {
        Self { binary, decimal: 0 }
    }
}

const SUFFIXES: &[(&str, Format, Scale)] = &[
    ("n", Format::DecimalSi, Scale::decimal(-9)),
    ("u", Format::DecimalSi, Scale::decimal(-6)),
    ("m", Format::DecimalSi, Scale::decimal(-3)),
    ("", Format::DecimalSi, Scale::decimal(0)),
    ("k", Format::DecimalSi, Scale::decimal(3)),
    ("M", Format::DecimalSi, Scale::decimal(6)),
    ("G", Format::DecimalSi, Scale::decimal(9)),
    ("T", Format::DecimalSi, Scale::decimal(12)),
    ("P", Format::DecimalSi, Scale::decimal(15)),
    ("E", Format::DecimalSi, Scale::decimal(18)),
    ("Ki", Format::BinarySi, Scale::binary(10)),
    ("Mi", Format::BinarySi, Scale::binary(20)),
    ("Gi", Format::BinarySi, Scale::binary(30)),
    ("Ti", Format::BinarySi, Scale::binary(40)),
    ("Pi", Format::BinarySi, Scale::binary(50)),
    ("Ei", Format::BinarySi, Scale::binary(60)),
];

/// Resolve a suffix to its format and multiplier.
///
/// Named suffixes are tried first so that a bare `E` means exa; only
/// `e`/`E` followed by an integer is read as an exponent.
pub(crate) fn lookup(suffix: &str) -> Option<(Format, Scale)> {
    if let Some((_, format, scale)) = SUFFIXES.iter().find(|(s, _, _)| *s == suffix) {
        return Some((*format, *scale));
    }
    let exponent = suffix.strip_prefix('e').or_else(|| suffix.strip_prefix('E'))?;
    let digits = exponent
        .strip_prefix('-')
        .or_else(|| exponent.strip_prefix('+'))
        .unwrap_or(exponent);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only overflow can fail here; saturate so scaling reports it as out of range.
    let exponent = exponent.parse::<i32>().unwrap_or(if exponent.starts_with('-') {
        i32::MIN
    } else {
        i32::MAX
    });
    Some((Format::DecimalExponent, Scale::decimal(exponent)))
}

/// All named suffixes, in table order.
pub fn known_suffixes() -> impl Iterator<Item = &'static str> {
    SUFFIXES.iter().map(|(s, _, _)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milli_is_decimal() {
        assert_eq!(lookup("m"), Some((Format::DecimalSi, Scale::decimal(-3))));
    }

    #[test]
    fn mebi_is_binary() {
        assert_eq!(lookup("Mi"), Some((Format::BinarySi, Scale::binary(20))));
    }

    #[test]
    fn bare_capital_e_is_exa() {
        assert_eq!(lookup("E"), Some((Format::DecimalSi, Scale::decimal(18))));
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(lookup("e3"), Some((Format::DecimalExponent, Scale::decimal(3))));
        assert_eq!(lookup("E-2"), Some((Format::DecimalExponent, Scale::decimal(-2))));
        assert_eq!(lookup("e+4"), Some((Format::DecimalExponent, Scale::decimal(4))));
    }

    #[test]
    fn oversized_exponent_saturates() {
        assert_eq!(
            lookup("e99999999999"),
            Some((Format::DecimalExponent, Scale::decimal(i32::MAX)))
        );
        assert_eq!(
            lookup("e-99999999999"),
            Some((Format::DecimalExponent, Scale::decimal(i32::MIN)))
        );
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!(lookup("e"), None);
        assert_eq!(lookup("e-"), None);
        assert_eq!(lookup("mi"), None);
        assert_eq!(lookup("KB"), None);
        assert_eq!(lookup(" m"), None);
    }

    #[test]
    fn known_suffixes_include_empty() {
        assert!(known_suffixes().any(|s| s.is_empty()));
        assert_eq!(known_suffixes().count(), 16);
    }
}
