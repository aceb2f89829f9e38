pub mod chain_info;
pub mod connector_selector;
pub mod navbar;
pub mod session_controls;
pub mod staking_panel;

pub use chain_info::ChainInfo;
pub use connector_selector::ConnectorSelector;
pub use navbar::Navbar;
pub use session_controls::SessionControls;
pub use staking_panel::StakingPanel;
