pub mod connectors;
pub mod ethereum;
pub mod notifier;
