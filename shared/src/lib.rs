//! # Shared Display & Chain Library
//!
//! Types and helpers shared by the core library and the web frontend.
//!
//! ## Structure
//!
//! - **[`chain`]**: Known EVM networks and their display names
//! - **[`utils`]**: Shared formatting functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!   - **[`utils::format_units`]** / **[`utils::format_ether`]**: Render wei amounts
//!
//! ## Usage in Frontend
//!
//! ```rust
//! use shared::chain::chain_name;
//! use shared::utils::truncate_address;
//!
//! let label = format!(
//!     "{} on {}",
//!     truncate_address("0x742d35Cc6634C0532925a3b844Bc9e7595f2bD18"),
//!     chain_name(1),
//! );
//! assert_eq!(label, "0x742d...bD18 on Mainnet");
//! ```

pub mod chain;
pub mod utils;

pub use chain::*;
pub use utils::*;
