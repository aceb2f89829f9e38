//! # Chain Metadata
//!
//! Static information about the EVM networks the dApp knows how to label.

/// Networks with a fixed display name. Anything else renders as `Chain <id>`.
pub const KNOWN_CHAINS: &[(u64, &str)] = &[
    (1, "Mainnet"),
    (3, "Ropsten"),
    (4, "Rinkeby"),
    (5, "Goerli"),
    (42, "Kovan"),
    (100, "xDai"),
];

/// Display name for a chain id.
pub fn chain_name(chain_id: u64) -> String {
    KNOWN_CHAINS
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Chain {}", chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_name() {
        assert_eq!(chain_name(1), "Mainnet");
        assert_eq!(chain_name(4), "Rinkeby");
        assert_eq!(chain_name(1337), "Chain 1337");
    }

    #[test]
    fn test_known_chains_are_unique() {
        for (i, (id, _)) in KNOWN_CHAINS.iter().enumerate() {
            assert!(KNOWN_CHAINS[i + 1..].iter().all(|(other, _)| other != id));
        }
    }
}
