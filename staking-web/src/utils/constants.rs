//! Application constants

/// Static configuration compiled into the bundle.
pub const APP_CONFIG_JSON: &str = include_str!("../../config/app.json");

pub const APP_TITLE: &str = "Cranium Staking";
