use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::prelude::*;
use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::contracts::{IUniswapV3Factory, IUniswapV3Pool};
use crate::dex_adapter::{DexAdapter, FetchContext};
use crate::pools::{total_liquidity_eth, PoolReading, SizingParams, V3PoolReading};
use crate::types::conversions::{fee_tier_percent, fee_tier_rate};
use crate::types::{Chain, Protocol, TokenPair, Venue};

/// 0.05%, 0.3% and 1% tiers.
pub const DEFAULT_FEE_TIERS: [u32; 3] = [500, 3000, 10000];

const BASE_SLIPPAGE: f64 = 0.001;
const DEFAULT_TVL: u64 = 1_000_000;
const SUPPORTED_TOKENS: [&str; 6] = ["ETH", "WETH", "USDC", "USDT", "DAI", "WBTC"];

/// Discovers Uniswap V3 pools through the factory and exposes one venue per fee tier.
#[derive(Clone)]
pub struct UniswapV3Adapter<M> {
    factory_address: Address,
    fee_tiers: Vec<u32>,
    sizing: SizingParams,
    provider: Arc<M>,
}

impl<M: Middleware + 'static> UniswapV3Adapter<M> {
    pub fn new(provider: Arc<M>, factory_address: Address, fee_tiers: Vec<u32>, sizing: SizingParams) -> Self {
        Self { factory_address, fee_tiers, sizing, provider }
    }

    async fn read_pool(&self, pair: TokenPair, fee: u32) -> Result<Option<PoolReading>> {
        let factory = IUniswapV3Factory::new(self.factory_address, Arc::clone(&self.provider));
        let pool_address = factory.get_pool(pair.token_a, pair.token_b, fee).call().await?;

        if pool_address.is_zero() {
            debug!("No Uniswap V3 pool for {} with fee {}", pair.name, fee);
            return Ok(None);
        }

        let pool = IUniswapV3Pool::new(pool_address, Arc::clone(&self.provider));
        let liquidity_call = pool.liquidity();
        let slot0_call = pool.slot_0();
        let (liquidity, slot0) = tokio::try_join!(liquidity_call.call(), slot0_call.call())?;
        let (sqrt_price_x96, tick, ..) = slot0;

        debug!("Uniswap V3 pool {} ({:?}, fee {}) liquidity {}", pair.name, pool_address, fee, liquidity);
        Ok(Some(PoolReading::UniswapV3(V3PoolReading {
            pair: pair.name,
            address: pool_address,
            fee,
            liquidity,
            sqrt_price_x96,
            tick,
        })))
    }
}

/// Builds the venue for one fee tier. `None` when the tier has no deployed pool.
pub fn aggregate_fee_tier(fee: u32, readings: &[PoolReading], sizing: &SizingParams) -> Option<Venue> {
    if readings.is_empty() {
        return None;
    }
    // V3 liquidity does not depend on the WETH side
    let liquidity = total_liquidity_eth(readings, Address::zero());
    let (max, tvl) = sizing.size(liquidity, DEFAULT_TVL);
    let fee_rate = fee_tier_rate(fee);

    Some(Venue {
        id: format!("uniswap-v3-{}", fee),
        name: format!("Uniswap V3 ({}%)", fee_tier_percent(fee)),
        max,
        fee: fee_rate,
        slippage: BASE_SLIPPAGE + fee_rate / 2.0,
        chain: Chain::Ethereum,
        protocol: Protocol::UniswapV3,
        tvl,
        supported_tokens: SUPPORTED_TOKENS.iter().map(|s| s.to_string()).collect(),
    })
}

#[async_trait]
impl<M: Middleware + 'static> DexAdapter for UniswapV3Adapter<M> {
    fn name(&self) -> &'static str {
        "UniswapV3"
    }

    fn protocol(&self) -> Protocol {
        Protocol::UniswapV3
    }

    async fn fetch_venues(&self, ctx: &FetchContext) -> Result<Vec<Venue>> {
        let pairs = ctx.tokens.probed_pairs();
        let mut venues = Vec::new();
        let mut attempted = 0usize;
        let mut failed = 0usize;

        for &fee in &self.fee_tiers {
            let results = join_all(pairs.iter().map(|pair| self.read_pool(*pair, fee))).await;

            let mut readings = Vec::new();
            for (pair, result) in pairs.iter().zip(results) {
                attempted += 1;
                match result {
                    Ok(Some(reading)) => readings.push(reading),
                    Ok(None) => {}
                    Err(e) => {
                        failed += 1;
                        warn!("Uniswap V3 pool read failed for {} with fee {}: {}", pair.name, fee, e);
                    }
                }
            }

            if let Some(venue) = aggregate_fee_tier(fee, &readings, &self.sizing) {
                info!("Uniswap V3 fee tier {} -> venue {} from {} pools", fee, venue.id, readings.len());
                venues.push(venue);
            }
        }

        if attempted > 0 && failed == attempted {
            return Err(anyhow!(
                "all {} Uniswap V3 pool lookups failed at block {}",
                attempted,
                ctx.block_number
            ));
        }
        Ok(venues)
    }
}
