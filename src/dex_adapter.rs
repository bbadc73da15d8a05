//! # DEX Adapter Trait
//!
//! One adapter per protocol turns factory/pool contract reads into `Venue` records.
//! The `VenueFetcher` runs every registered adapter concurrently and treats an adapter
//! error as "no venues from this protocol", so adapters are free to fail with context
//! instead of degrading on their own.
//!
//! ## Adding a New DEX Protocol
//!
//! 1. Add a `Protocol` variant (see `types/venue.rs`)
//! 2. Implement `DexAdapter` for the protocol
//! 3. Register the adapter where the `VenueFetcher` is built (`bin/venue_server.rs`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use venue_service::dex_adapter::{DexAdapter, FetchContext};
//! use venue_service::types::{Protocol, Venue};
//! use async_trait::async_trait;
//!
//! struct MyDexAdapter;
//!
//! #[async_trait]
//! impl DexAdapter for MyDexAdapter {
//!     fn name(&self) -> &'static str {
//!         "MyDex"
//!     }
//!
//!     fn protocol(&self) -> Protocol {
//!         Protocol::Balancer
//!     }
//!
//!     async fn fetch_venues(&self, ctx: &FetchContext) -> anyhow::Result<Vec<Venue>> {
//!         // Query factory/pool contracts for ctx.tokens.probed_pairs()
//!         Ok(Vec::new())
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;

use crate::types::tokens::MAINNET_CHAIN_ID;
use crate::types::{Protocol, TokenBook, Venue};

/// Chain facts gathered once per fetch and shared with every adapter.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub chain_id: u64,
    pub block_number: u64,
    pub tokens: TokenBook,
}

impl FetchContext {
    pub fn new(chain_id: u64, block_number: u64) -> Self {
        Self {
            chain_id,
            block_number,
            tokens: TokenBook::for_chain(chain_id),
        }
    }

    /// The default factory addresses in `[contracts]` are mainnet deployments.
    pub fn is_mainnet(&self) -> bool {
        self.chain_id == MAINNET_CHAIN_ID
    }
}

/// The main trait for all DEX protocol adapters.
///
/// Adapters must be `Send + Sync` so the fetcher can drive them concurrently.
#[async_trait]
pub trait DexAdapter: Send + Sync {
    /// Name used for logging and metrics labels.
    fn name(&self) -> &'static str;

    fn protocol(&self) -> Protocol;

    /// Reads on-chain state and aggregates it into venues.
    ///
    /// An empty vector means no deployed pool was found. An error means the protocol
    /// could not be read at all.
    async fn fetch_venues(&self, ctx: &FetchContext) -> Result<Vec<Venue>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tokens::SEPOLIA_CHAIN_ID;

    #[test]
    fn test_is_mainnet_uses_probed_chain() {
        assert!(FetchContext::new(MAINNET_CHAIN_ID, 1).is_mainnet());
        assert!(!FetchContext::new(SEPOLIA_CHAIN_ID, 1).is_mainnet());
        // Unknown chains borrow mainnet tokens but are still not mainnet
        let arbitrum = FetchContext::new(42161, 1);
        assert_eq!(arbitrum.tokens.chain_id(), MAINNET_CHAIN_ID);
        assert!(!arbitrum.is_mainnet());
    }
}
