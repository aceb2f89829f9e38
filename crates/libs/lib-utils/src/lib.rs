//! # Utilities Library
//!
//! Shared utility functions for environment variables, JSON-RPC hex quantities,
//! and address validation.

pub mod envs;
pub mod quantity;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_list, get_env_parse};
pub use quantity::{parse_quantity, parse_quantity_u256, to_quantity, to_quantity_u256};
pub use validation::{validate_address, validate_not_empty};
