//! Human readable space sizes such as `64MB` or `0.5g`.

use thiserror::Error;

pub const KB: u64 = 1 << 10;
pub const MB: u64 = 1 << 20;
pub const GB: u64 = 1 << 30;
pub const TB: u64 = 1 << 40;
pub const PB: u64 = 1 << 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("empty size")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("unknown size unit `{0}`")]
    UnknownUnit(String),
    #[error("size must not be negative")]
    Negative,
    #[error("size overflows 64 bits")]
    Overflow,
}

/// Parses a space size: a decimal number followed by an optional unit.
///
/// Units are case-insensitive powers of 1024: `b`, `k`/`kb`, `m`/`mb`, `g`/`gb`, `t`/`tb` and
/// `p`/`pb`. A bare number is a byte count. Fractions are truncated after scaling, so `1.5k` is
/// 1536 and `0.5b` is 0.
pub fn parse_space_size(input: &str) -> Result<u64, SizeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SizeError::Empty);
    }
    let split = input
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);
    let number = number.trim();

    let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" => KB,
        "m" | "mb" => MB,
        "g" | "gb" => GB,
        "t" | "tb" => TB,
        "p" | "pb" => PB,
        other => return Err(SizeError::UnknownUnit(other.to_string())),
    };

    // integral sizes stay exact, f64 would round anything above 2^53
    if let Ok(n) = number.parse::<u64>() {
        return n.checked_mul(multiplier).ok_or(SizeError::Overflow);
    }
    let value: f64 = number
        .parse()
        .map_err(|_| SizeError::NotANumber(number.to_string()))?;
    if !value.is_finite() {
        return Err(SizeError::NotANumber(number.to_string()));
    }
    if value < 0.0 {
        return Err(SizeError::Negative);
    }
    let scaled = value * multiplier as f64;
    if scaled >= u64::MAX as f64 {
        return Err(SizeError::Overflow);
    }
    Ok(scaled as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_bytes() {
        assert_eq!(parse_space_size("0"), Ok(0));
        assert_eq!(parse_space_size("4096"), Ok(4096));
        assert_eq!(parse_space_size(" 12b "), Ok(12));
    }

    #[test]
    fn units_are_case_insensitive() {
        assert_eq!(parse_space_size("64MB"), Ok(64 * MB));
        assert_eq!(parse_space_size("64mb"), Ok(64 * MB));
        assert_eq!(parse_space_size("64m"), Ok(64 * MB));
        assert_eq!(parse_space_size("2 GB"), Ok(2 * GB));
        assert_eq!(parse_space_size("1t"), Ok(TB));
        assert_eq!(parse_space_size("1PB"), Ok(PB));
    }

    #[test]
    fn fractions_scale_then_truncate() {
        assert_eq!(parse_space_size("1.5k"), Ok(1536));
        assert_eq!(parse_space_size("0.5GB"), Ok(GB / 2));
        assert_eq!(parse_space_size("0.5b"), Ok(0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_space_size(""), Err(SizeError::Empty));
        assert_eq!(
            parse_space_size("12XB"),
            Err(SizeError::UnknownUnit("xb".to_string()))
        );
        assert!(matches!(
            parse_space_size("abc"),
            Err(SizeError::UnknownUnit(_))
        ));
        assert!(matches!(
            parse_space_size("1.2.3MB"),
            Err(SizeError::NotANumber(_))
        ));
        assert_eq!(parse_space_size("-1MB"), Err(SizeError::Negative));
        assert_eq!(parse_space_size("99999999PB"), Err(SizeError::Overflow));
    }
}
