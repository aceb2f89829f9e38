//! # Hex Quantities
//!
//! JSON-RPC encodes integers as `0x`-prefixed hex strings without leading
//! zeros ("quantities"). These helpers convert between them and Rust integers.

use alloy_primitives::U256;

/// Encode a `u64` as a JSON-RPC quantity (`0` -> `"0x0"`).
pub fn to_quantity(value: u64) -> String {
    format!("{value:#x}")
}

/// Encode a `U256` as a JSON-RPC quantity.
pub fn to_quantity_u256(value: U256) -> String {
    format!("{value:#x}")
}

/// Decode a JSON-RPC quantity into a `u64`.
///
/// Decimal strings are accepted too, since some providers report `net_version`
/// style values without the prefix.
pub fn parse_quantity(value: &str) -> Result<u64, Error> {
    let value = value.trim();
    match strip_hex_prefix(value) {
        Some("") => Err(Error::FailToParseQuantity(value.to_string())),
        Some(hex) => u64::from_str_radix(hex, 16)
            .map_err(|_| Error::FailToParseQuantity(value.to_string())),
        None => value
            .parse::<u64>()
            .map_err(|_| Error::FailToParseQuantity(value.to_string())),
    }
}

/// Decode a JSON-RPC quantity into a `U256` (balances, token ids).
pub fn parse_quantity_u256(value: &str) -> Result<U256, Error> {
    let value = value.trim();
    match strip_hex_prefix(value) {
        Some("") => Err(Error::FailToParseQuantity(value.to_string())),
        Some(hex) => U256::from_str_radix(hex, 16)
            .map_err(|_| Error::FailToParseQuantity(value.to_string())),
        None => U256::from_str_radix(value, 10)
            .map_err(|_| Error::FailToParseQuantity(value.to_string())),
    }
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FailToParseQuantity(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_quantity() {
        assert_eq!(to_quantity(0), "0x0");
        assert_eq!(to_quantity(1), "0x1");
        assert_eq!(to_quantity(42), "0x2a");
        assert_eq!(to_quantity_u256(U256::from(255u64)), "0xff");
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x1"), Ok(1));
        assert_eq!(parse_quantity("0x2a"), Ok(42));
        assert_eq!(parse_quantity("4"), Ok(4));
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_parse_quantity_errors_carry_input() {
        assert_eq!(
            parse_quantity("0xzz"),
            Err(Error::FailToParseQuantity("0xzz".to_string()))
        );
        assert_eq!(
            parse_quantity(" twelve "),
            Err(Error::FailToParseQuantity("twelve".to_string()))
        );
        assert_eq!(parse_quantity(" 0x10 "), Ok(16));
    }

    #[test]
    fn test_parse_quantity_u256() {
        let wei = parse_quantity_u256("0xde0b6b3a7640000").unwrap();
        assert_eq!(wei, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(parse_quantity_u256("10").unwrap(), U256::from(10u64));
    }
}
