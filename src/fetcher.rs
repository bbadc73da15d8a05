//! Live venue discovery.
//!
//! `VenueFetcher` probes the RPC endpoint once, then runs every protocol adapter concurrently
//! and concatenates whatever succeeded. It never fails: a dead endpoint, a timeout or a
//! failing adapter all degrade to fewer (possibly zero) venues, and the caller decides what
//! to serve instead.

use anyhow::Result;
use async_trait::async_trait;
use ethers::providers::Middleware;
use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dex_adapter::{DexAdapter, FetchContext};
use crate::metrics;
use crate::types::Venue;

/// Anything that can produce a fresh venue list. Implementations must not fail; an empty
/// list signals "nothing usable".
#[async_trait]
pub trait VenueSource: Send + Sync {
    async fn fetch(&self) -> Vec<Venue>;
}

pub struct VenueFetcher<M> {
    provider: Arc<M>,
    adapters: Vec<Arc<dyn DexAdapter>>,
    timeout: Duration,
}

impl<M: Middleware + 'static> VenueFetcher<M> {
    pub fn new(provider: Arc<M>, adapters: Vec<Arc<dyn DexAdapter>>, timeout: Duration) -> Self {
        Self { provider, adapters, timeout }
    }

    /// Reads chain id and head block, confirming the endpoint is reachable.
    pub async fn probe(&self) -> Result<FetchContext> {
        let chain_id = self.provider.get_chainid().await?;
        let block_number = self.provider.get_block_number().await?;
        info!("Connected to chain {} at block {}", chain_id, block_number);
        let ctx = FetchContext::new(chain_id.low_u64(), block_number.as_u64());
        if !ctx.is_mainnet() {
            warn!(
                "Chain {} is not mainnet: set [contracts] factory addresses for it or no live venues will be found",
                ctx.chain_id
            );
        }
        Ok(ctx)
    }

    async fn fetch_all(&self) -> Vec<Venue> {
        let ctx = match self.probe().await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("RPC probe failed, no live venues: {}", e);
                metrics::increment_fetch_failure("probe");
                return Vec::new();
            }
        };

        let runs = self.adapters.iter().map(|adapter| {
            let ctx = &ctx;
            async move {
                let start = Instant::now();
                let result = adapter.fetch_venues(ctx).await;
                metrics::record_fetch_latency(adapter.name(), start.elapsed());
                match result {
                    Ok(venues) => {
                        debug!("{} ({}) returned {} venues", adapter.name(), adapter.protocol(), venues.len());
                        venues
                    }
                    Err(e) => {
                        warn!("{} venue fetch failed: {}", adapter.name(), e);
                        metrics::increment_fetch_failure(adapter.name());
                        Vec::new()
                    }
                }
            }
        });

        join_all(runs).await.into_iter().flatten().collect()
    }
}

#[async_trait]
impl<M: Middleware + 'static> VenueSource for VenueFetcher<M> {
    async fn fetch(&self) -> Vec<Venue> {
        match tokio::time::timeout(self.timeout, self.fetch_all()).await {
            Ok(venues) => {
                info!("Fetched {} live venues", venues.len());
                venues
            }
            Err(_) => {
                warn!("Venue fetch timed out after {:?}", self.timeout);
                metrics::increment_fetch_failure("timeout");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chain, Protocol};
    use ethers::providers::{MockProvider, Provider};
    use ethers::types::U64;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticAdapter {
        name: &'static str,
        venues: Option<Vec<Venue>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DexAdapter for StaticAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn protocol(&self) -> crate::types::Protocol {
            Protocol::UniswapV3
        }

        async fn fetch_venues(&self, _ctx: &FetchContext) -> Result<Vec<Venue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.venues.clone().ok_or_else(|| anyhow::anyhow!("boom"))
        }
    }

    fn venue(id: &str) -> Venue {
        Venue {
            id: id.to_string(),
            name: id.to_string(),
            max: 1,
            fee: 0.003,
            slippage: 0.001,
            chain: Chain::Ethereum,
            protocol: Protocol::UniswapV3,
            tvl: 1,
            supported_tokens: vec![],
        }
    }

    fn adapter(name: &'static str, venues: Option<Vec<Venue>>) -> Arc<StaticAdapter> {
        Arc::new(StaticAdapter { name, venues, calls: AtomicUsize::new(0) })
    }

    fn reachable_provider() -> Arc<Provider<MockProvider>> {
        let (provider, mock) = Provider::mocked();
        // eth_chainId and eth_blockNumber both answer 1
        mock.push(U64::from(1)).unwrap();
        mock.push(U64::from(1)).unwrap();
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_partial_results_survive_adapter_failure() {
        let ok = adapter("ok", Some(vec![venue("a"), venue("b")]));
        let broken = adapter("broken", None);
        let fetcher = VenueFetcher::new(
            reachable_provider(),
            vec![ok.clone() as Arc<dyn DexAdapter>, broken.clone()],
            Duration::from_secs(5),
        );

        let venues = fetcher.fetch().await;
        let ids: Vec<_> = venues.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
    }

    struct SlowAdapter;

    #[async_trait]
    impl DexAdapter for SlowAdapter {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn protocol(&self) -> Protocol {
            Protocol::Curve
        }

        async fn fetch_venues(&self, _ctx: &FetchContext) -> Result<Vec<Venue>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![venue("late")])
        }
    }

    #[tokio::test]
    async fn test_timeout_yields_nothing() {
        let fetcher = VenueFetcher::new(
            reachable_provider(),
            vec![Arc::new(SlowAdapter) as Arc<dyn DexAdapter>],
            Duration::from_millis(10),
        );

        let start = Instant::now();
        assert!(fetcher.fetch().await.is_empty());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_provider_yields_nothing() {
        let (provider, _mock) = Provider::mocked();
        let ok = adapter("ok", Some(vec![venue("a")]));
        let fetcher = VenueFetcher::new(
            Arc::new(provider),
            vec![ok.clone() as Arc<dyn DexAdapter>],
            Duration::from_secs(5),
        );

        assert!(fetcher.fetch().await.is_empty());
        assert_eq!(ok.calls.load(Ordering::SeqCst), 0);
    }
}
