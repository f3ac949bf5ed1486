use serde::Serialize;

/// Definition of an EVM-compatible blockchain network.
#[derive(Debug, Clone, Serialize)]
pub struct EvmChain {
    pub chain_id: u64,
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
    pub is_testnet: bool,
}

/// Ethereum Mainnet (chain ID 1).
pub const ETHEREUM: EvmChain = EvmChain {
    chain_id: 1,
    name: "Ethereum",
    symbol: "ETH",
    decimals: 18,
    is_testnet: false,
};

/// Optimism (chain ID 10).
pub const OPTIMISM: EvmChain = EvmChain {
    chain_id: 10,
    name: "Optimism",
    symbol: "ETH",
    decimals: 18,
    is_testnet: false,
};

/// BNB Smart Chain (chain ID 56).
pub const BSC: EvmChain = EvmChain {
    chain_id: 56,
    name: "BNB Smart Chain",
    symbol: "BNB",
    decimals: 18,
    is_testnet: false,
};

/// Polygon PoS (chain ID 137).
pub const POLYGON: EvmChain = EvmChain {
    chain_id: 137,
    name: "Polygon",
    symbol: "MATIC",
    decimals: 18,
    is_testnet: false,
};

/// Local development network (chain ID 1337).
pub const LOCALNET: EvmChain = EvmChain {
    chain_id: 1337,
    name: "Localnet",
    symbol: "ETH",
    decimals: 18,
    is_testnet: true,
};

/// Base (chain ID 8453).
pub const BASE: EvmChain = EvmChain {
    chain_id: 8453,
    name: "Base",
    symbol: "ETH",
    decimals: 18,
    is_testnet: false,
};

/// Arbitrum One (chain ID 42161).
pub const ARBITRUM: EvmChain = EvmChain {
    chain_id: 42161,
    name: "Arbitrum One",
    symbol: "ETH",
    decimals: 18,
    is_testnet: false,
};

/// Sepolia Testnet (chain ID 11155111).
pub const SEPOLIA: EvmChain = EvmChain {
    chain_id: 11155111,
    name: "Sepolia",
    symbol: "ETH",
    decimals: 18,
    is_testnet: true,
};

/// All supported EVM chains.
const ALL_CHAINS: &[&EvmChain] = &[
    &ETHEREUM,
    &OPTIMISM,
    &BSC,
    &POLYGON,
    &LOCALNET,
    &BASE,
    &ARBITRUM,
    &SEPOLIA,
];

/// Returns the chain definition for a given chain ID, or `None` if unknown.
pub fn get_chain(chain_id: u64) -> Option<&'static EvmChain> {
    ALL_CHAINS.iter().find(|c| c.chain_id == chain_id).copied()
}

/// Returns all supported EVM chain definitions.
pub fn supported_chains() -> Vec<&'static EvmChain> {
    ALL_CHAINS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_ethereum() {
        let chain = get_chain(1).expect("Ethereum should be supported");
        assert_eq!(chain.name, "Ethereum");
        assert!(!chain.is_testnet);
    }

    #[test]
    fn get_localnet() {
        let chain = get_chain(1337).expect("Localnet should be supported");
        assert!(chain.is_testnet);
    }

    #[test]
    fn unknown_chain_returns_none() {
        assert!(get_chain(999_999).is_none());
    }

    #[test]
    fn chain_ids_are_unique() {
        let chains = supported_chains();
        for (i, a) in chains.iter().enumerate() {
            for b in &chains[i + 1..] {
                assert_ne!(a.chain_id, b.chain_id);
            }
        }
    }

    #[test]
    fn all_chains_have_18_decimals() {
        for chain in supported_chains() {
            assert_eq!(chain.decimals, 18, "{} should have 18 decimals", chain.name);
        }
    }
}
