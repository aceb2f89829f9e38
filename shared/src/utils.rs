//! # Shared Utility Functions
//!
//! Common formatting functions used by the core library and the web frontend.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x` + 4 leading and 4 trailing hex digits
//!
//! ## Amount Formatting
//!
//! - [`format_units`] - Render an integer amount with a fixed number of decimals
//! - [`format_ether`] - Render wei as ether, truncated to a display precision
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
//! assert_eq!(format_address(address, 6, 4), "0x742d...bD18");
//! ```

use alloy_primitives::U256;

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
/// assert_eq!(format_address(addr, 6, 4), "0x742d...bD18");
/// assert_eq!(format_address(addr, 4, 4), "0x74...bD18");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
        || !address.is_ascii()
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an EVM address as `0x` + the first and last four hex digits.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
/// assert_eq!(truncate_address(addr), "0x742d...bD18");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Render `value` as a decimal number with `decimals` fractional digits.
///
/// Trailing zeros are trimmed but at least one fractional digit is kept,
/// so `1 ether` renders as `"1.0"`.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::utils::format_units;
///
/// assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
/// assert_eq!(format_units(U256::from(0u64), 18), "0.0");
/// ```
pub fn format_units(value: U256, decimals: u8) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / base;
    let fraction = value % base;

    if decimals == 0 {
        return whole.to_string();
    }

    let mut fraction_str = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    while fraction_str.len() > 1 && fraction_str.ends_with('0') {
        fraction_str.pop();
    }

    format!("{}.{}", whole, fraction_str)
}

/// Render wei as ether, truncated (not rounded) to `precision` fractional digits.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::utils::format_ether;
///
/// let wei = U256::from(1_234_567_000_000_000_000u64);
/// assert_eq!(format_ether(wei, 4), "1.2345");
/// ```
pub fn format_ether(wei: U256, precision: usize) -> String {
    let full = format_units(wei, 18);
    match full.split_once('.') {
        Some((whole, fraction)) if fraction.len() > precision => {
            if precision == 0 {
                whole.to_string()
            } else {
                format!("{}.{}", whole, &fraction[..precision])
            }
        }
        _ => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18";
        assert_eq!(format_address(addr, 6, 4), "0x742d...bD18");
        assert_eq!(format_address(addr, 2, 2), "0x...18");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_format_units() {
        let one_ether = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_units(one_ether, 18), "1.0");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_format_ether_truncates() {
        let wei = U256::from(2_999_999_000_000_000_000u64);
        assert_eq!(format_ether(wei, 2), "2.99");
        assert_eq!(format_ether(wei, 0), "2");
        assert_eq!(format_ether(U256::ZERO, 4), "0.0");
    }
}
