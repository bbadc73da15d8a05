use ethers::types::Address;
use std::collections::HashMap;

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

const MAINNET_TOKENS: [(&str, &str); 5] = [
    ("ETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"), // WETH
    ("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    ("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    ("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F"),
    ("WBTC", "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
];

const SEPOLIA_TOKENS: [(&str, &str); 5] = [
    ("ETH", "0x7b79995e5f793A07Bc00c21412e50Ecae098E7f9"), // WETH
    ("USDC", "0x8267cF9254734C6Eb452a7bb9AAF97B392258b21"),
    ("USDT", "0x7169D38820dfd117C3FA1f22a697dBA58d90BA06"),
    ("DAI", "0x3e622317f8C93f7328350cF0B56d9eD4C620C5d6"),
    ("WBTC", "0xf864F8aea99899F4BAB42Cc279b22a910f5217aF"),
];

/// Pairs probed on every factory, as (label, base, quote) symbols.
const PROBED_PAIRS: [(&str, &str, &str); 4] = [
    ("ETH-USDC", "ETH", "USDC"),
    ("ETH-USDT", "ETH", "USDT"),
    ("ETH-DAI", "ETH", "DAI"),
    ("WBTC-ETH", "WBTC", "ETH"),
];

/// A token pair resolved to on-chain addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair {
    pub name: &'static str,
    pub token_a: Address,
    pub token_b: Address,
}

/// Symbol → ERC-20 address mapping for one chain.
#[derive(Debug, Clone)]
pub struct TokenBook {
    chain_id: u64,
    addresses: HashMap<&'static str, Address>,
}

impl TokenBook {
    pub fn mainnet() -> Self {
        Self::from_table(MAINNET_CHAIN_ID, &MAINNET_TOKENS)
    }

    pub fn sepolia() -> Self {
        Self::from_table(SEPOLIA_CHAIN_ID, &SEPOLIA_TOKENS)
    }

    /// Token book for the chain reported by the RPC endpoint. Unknown chains get mainnet
    /// addresses since the configured factories default to mainnet deployments.
    pub fn for_chain(chain_id: u64) -> Self {
        match chain_id {
            SEPOLIA_CHAIN_ID => Self::sepolia(),
            MAINNET_CHAIN_ID => Self::mainnet(),
            other => {
                log::warn!("No token book for chain {}, using mainnet addresses", other);
                Self::mainnet()
            }
        }
    }

    fn from_table(chain_id: u64, table: &[(&'static str, &'static str)]) -> Self {
        let addresses = table
            .iter()
            .filter_map(|(symbol, addr)| addr.parse::<Address>().ok().map(|a| (*symbol, a)))
            .collect();
        Self { chain_id, addresses }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self, symbol: &str) -> Option<Address> {
        self.addresses.get(symbol).copied()
    }

    /// Wrapped native token, used to pick the ETH-side reserve of V2 pairs.
    pub fn weth(&self) -> Option<Address> {
        self.address("ETH")
    }

    /// The probed pairs that resolve on this chain.
    pub fn probed_pairs(&self) -> Vec<TokenPair> {
        PROBED_PAIRS
            .iter()
            .filter_map(|(name, a, b)| {
                Some(TokenPair {
                    name,
                    token_a: self.address(a)?,
                    token_b: self.address(b)?,
                })
            })
            .collect()
    }
}
