//! # Validation Utilities
//!
//! Input validation helpers.

use alloy_primitives::Address;

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Parse a `0x`-prefixed 20-byte address, rejecting the zero address.
///
/// Mixed-case input is accepted without enforcing the EIP-55 checksum, the
/// way wallet providers hand addresses back.
pub fn validate_address(value: &str, field_name: &str) -> Result<Address, String> {
    validate_not_empty(value, field_name)?;
    let trimmed = value.trim();
    if !trimmed.starts_with("0x") || trimmed.len() != 42 {
        return Err(format!("{} must be a 0x-prefixed 40 character hex address", field_name));
    }
    let address = trimmed
        .parse::<Address>()
        .map_err(|e| format!("{} is not a valid address: {}", field_name, e))?;
    if address == Address::ZERO {
        return Err(format!("{} cannot be the zero address", field_name));
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address() {
        let addr = validate_address("0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18", "staking").unwrap();
        assert_eq!(
            addr.to_string().to_lowercase(),
            "0x742d35cc6634c0532925a3b844bc9e7595f2bd18"
        );
    }

    #[test]
    fn test_validate_address_rejects_bad_input() {
        assert!(validate_address("", "staking").is_err());
        assert!(validate_address("742d35Cc6634C0532925a3b844Bc9e7595f2bD18", "staking").is_err());
        assert!(validate_address("0x1234", "staking").is_err());
        assert!(validate_address("0x0000000000000000000000000000000000000000", "staking").is_err());
    }
}
