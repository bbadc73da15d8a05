use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::prelude::*;
use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::contracts::{IUniswapV2Factory, IUniswapV2Pair};
use crate::dex_adapter::{DexAdapter, FetchContext};
use crate::pools::{total_liquidity_eth, PoolReading, SizingParams, V2PairReading};
use crate::types::{Chain, Protocol, TokenPair, Venue};

const SUSHISWAP_FEE: f64 = 0.0025;
const SUSHISWAP_SLIPPAGE: f64 = 0.002;
const DEFAULT_TVL: u64 = 500_000;
const SUPPORTED_TOKENS: [&str; 6] = ["ETH", "WETH", "USDC", "USDT", "DAI", "WBTC"];

/// Reads SushiSwap (Uniswap V2-style) pairs and exposes them as a single venue.
#[derive(Clone)]
pub struct SushiSwapAdapter<M> {
    factory_address: Address,
    sizing: SizingParams,
    provider: Arc<M>,
}

impl<M: Middleware + 'static> SushiSwapAdapter<M> {
    pub fn new(provider: Arc<M>, factory_address: Address, sizing: SizingParams) -> Self {
        Self { factory_address, sizing, provider }
    }

    async fn read_pair(&self, pair: TokenPair) -> Result<Option<PoolReading>> {
        let factory = IUniswapV2Factory::new(self.factory_address, Arc::clone(&self.provider));
        let pair_address = factory.get_pair(pair.token_a, pair.token_b).call().await?;

        if pair_address.is_zero() {
            debug!("No SushiSwap pair for {}", pair.name);
            return Ok(None);
        }

        let pair_contract = IUniswapV2Pair::new(pair_address, Arc::clone(&self.provider));
        let reserves_call = pair_contract.get_reserves();
        let token0_call = pair_contract.token_0();
        let ((reserve0, reserve1, _), token0) = tokio::try_join!(reserves_call.call(), token0_call.call())?;

        debug!("SushiSwap pair {} ({:?}) reserves {}, {}", pair.name, pair_address, reserve0, reserve1);
        Ok(Some(PoolReading::V2Pair(V2PairReading {
            pair: pair.name,
            address: pair_address,
            reserve0,
            reserve1,
            token0,
        })))
    }
}

/// Builds the SushiSwap venue. `None` when no pair is deployed.
pub fn aggregate_pairs(readings: &[PoolReading], weth: Address, sizing: &SizingParams) -> Option<Venue> {
    if readings.is_empty() {
        return None;
    }
    let liquidity = total_liquidity_eth(readings, weth);
    let (max, tvl) = sizing.size(liquidity, DEFAULT_TVL);

    Some(Venue {
        id: "sushiswap".to_string(),
        name: "SushiSwap".to_string(),
        max,
        fee: SUSHISWAP_FEE,
        slippage: SUSHISWAP_SLIPPAGE,
        chain: Chain::Ethereum,
        protocol: Protocol::SushiSwap,
        tvl,
        supported_tokens: SUPPORTED_TOKENS.iter().map(|s| s.to_string()).collect(),
    })
}

#[async_trait]
impl<M: Middleware + 'static> DexAdapter for SushiSwapAdapter<M> {
    fn name(&self) -> &'static str {
        "SushiSwap"
    }

    fn protocol(&self) -> Protocol {
        Protocol::SushiSwap
    }

    async fn fetch_venues(&self, ctx: &FetchContext) -> Result<Vec<Venue>> {
        let weth = ctx
            .tokens
            .weth()
            .ok_or_else(|| anyhow!("no WETH address for chain {}", ctx.chain_id))?;
        let pairs = ctx.tokens.probed_pairs();
        let results = join_all(pairs.iter().map(|pair| self.read_pair(*pair))).await;

        let mut readings = Vec::new();
        let mut failed = 0usize;
        for (pair, result) in pairs.iter().zip(results) {
            match result {
                Ok(Some(reading)) => readings.push(reading),
                Ok(None) => {}
                Err(e) => {
                    failed += 1;
                    warn!("SushiSwap pair read failed for {}: {}", pair.name, e);
                }
            }
        }

        if !pairs.is_empty() && failed == pairs.len() {
            return Err(anyhow!("all {} SushiSwap pair lookups failed at block {}", failed, ctx.block_number));
        }

        Ok(aggregate_pairs(&readings, weth, &self.sizing)
            .map(|venue| {
                info!("SushiSwap venue built from {} pairs", readings.len());
                vec![venue]
            })
            .unwrap_or_default())
    }
}
