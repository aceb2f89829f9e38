//! # Connector Registry
//!
//! Ordered mapping from wallet names to configured connector instances.

use std::rc::Rc;

use thiserror::Error;

use super::{Connector, ConnectorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Connector already registered: {0}")]
    Duplicate(ConnectorKind),
}

/// Connector registry. Registration order is display order.
#[derive(Default, Clone)]
pub struct ConnectorRegistry {
    connectors: Vec<Rc<dyn Connector>>,
}

impl ConnectorRegistry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connector; one instance per kind.
    pub fn register(&mut self, connector: Rc<dyn Connector>) -> Result<(), RegistryError> {
        let kind = connector.kind();
        if self.get(kind).is_some() {
            return Err(RegistryError::Duplicate(kind));
        }
        self.connectors.push(connector);
        Ok(())
    }

    /// Get a connector by kind
    pub fn get(&self, kind: ConnectorKind) -> Option<Rc<dyn Connector>> {
        self.connectors.iter().find(|c| c.kind() == kind).map(Rc::clone)
    }

    /// List `(kind, name)` of all registered connectors
    pub fn list(&self) -> Vec<(ConnectorKind, &'static str)> {
        self.connectors.iter().map(|c| (c.kind(), c.name())).collect()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockConnector;

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ConnectorRegistry::new();
        registry.register(Rc::new(MockConnector::new(ConnectorKind::WalletConnect))).unwrap();
        registry.register(Rc::new(MockConnector::new(ConnectorKind::Injected))).unwrap();

        assert_eq!(
            registry.list(),
            vec![
                (ConnectorKind::WalletConnect, "WalletConnect"),
                (ConnectorKind::Injected, "Injected"),
            ]
        );
        assert!(registry.get(ConnectorKind::Injected).is_some());
        assert!(registry.get(ConnectorKind::Ledger).is_none());
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let mut registry = ConnectorRegistry::new();
        registry.register(Rc::new(MockConnector::new(ConnectorKind::Torus))).unwrap();
        let err = registry
            .register(Rc::new(MockConnector::new(ConnectorKind::Torus)))
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate(ConnectorKind::Torus));
        assert_eq!(registry.len(), 1);
    }
}
