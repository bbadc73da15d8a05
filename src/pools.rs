// src/pools.rs

use ethers::types::{Address, U256};
use serde::Deserialize;

use crate::types::conversions::wei_to_ether;

/// Raw on-chain observation of a single pool, before aggregation into a venue.
#[derive(Debug, Clone)]
pub enum PoolReading {
    /// Uniswap V3 concentrated-liquidity pool
    UniswapV3(V3PoolReading),
    /// Uniswap V2-style pair (SushiSwap)
    V2Pair(V2PairReading),
}

#[derive(Debug, Clone)]
pub struct V3PoolReading {
    pub pair: &'static str,
    pub address: Address,
    pub fee: u32,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

#[derive(Debug, Clone)]
pub struct V2PairReading {
    pub pair: &'static str,
    pub address: Address,
    pub reserve0: u128,
    pub reserve1: u128,
    pub token0: Address,
}

impl V2PairReading {
    /// Reserve held on the WETH side of the pair.
    pub fn eth_reserve(&self, weth: Address) -> u128 {
        if self.token0 == weth {
            self.reserve0
        } else {
            self.reserve1
        }
    }
}

impl PoolReading {
    pub fn address(&self) -> Address {
        match self {
            PoolReading::UniswapV3(p) => p.address,
            PoolReading::V2Pair(p) => p.address,
        }
    }

    pub fn pair(&self) -> &'static str {
        match self {
            PoolReading::UniswapV3(p) => p.pair,
            PoolReading::V2Pair(p) => p.pair,
        }
    }

    /// Liquidity contribution in wei. V3 uses the raw `liquidity()` value; V2 approximates
    /// the pair's depth as twice its WETH reserve.
    pub fn liquidity_wei(&self, weth: Address) -> U256 {
        match self {
            PoolReading::UniswapV3(p) => U256::from(p.liquidity),
            PoolReading::V2Pair(p) => U256::from(p.eth_reserve(weth)).saturating_mul(U256::from(2u8)),
        }
    }
}

/// Summed liquidity of a set of readings, in ether units.
pub fn total_liquidity_eth(readings: &[PoolReading], weth: Address) -> f64 {
    let total = readings
        .iter()
        .fold(U256::zero(), |acc, r| acc.saturating_add(r.liquidity_wei(weth)));
    match wei_to_ether(total) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Could not convert liquidity {} to ether: {}", total, e);
            0.0
        }
    }
}

/// Scaling constants that turn on-chain liquidity into venue order-size and TVL figures.
///
/// These are heuristics, not market-depth models.
#[derive(Debug, Clone, Deserialize)]
pub struct SizingParams {
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f64,
    #[serde(default = "default_max_cap")]
    pub max_cap: f64,
    #[serde(default = "default_tvl_multiplier")]
    pub tvl_multiplier: f64,
    /// Order size used when no liquidity could be measured
    #[serde(default = "default_max")]
    pub default_max: u64,
}

fn default_max_multiplier() -> f64 {
    5.0
}
fn default_max_cap() -> f64 {
    1_000_000.0
}
fn default_tvl_multiplier() -> f64 {
    100.0
}
fn default_max() -> u64 {
    500_000
}

impl Default for SizingParams {
    fn default() -> Self {
        Self {
            max_multiplier: default_max_multiplier(),
            max_cap: default_max_cap(),
            tvl_multiplier: default_tvl_multiplier(),
            default_max: default_max(),
        }
    }
}

impl SizingParams {
    /// Returns `(max, tvl)` for a venue holding `liquidity_eth`.
    ///
    /// `max` is always positive: a measurement that floors to zero falls back to `default_max`.
    pub fn size(&self, liquidity_eth: f64, default_tvl: u64) -> (u64, u64) {
        if !(liquidity_eth.is_finite() && liquidity_eth > 0.0) {
            return (self.default_max.max(1), default_tvl);
        }
        let max = (liquidity_eth * self.max_multiplier).min(self.max_cap).floor();
        let tvl = (liquidity_eth * self.tvl_multiplier).floor();
        let max = if max >= 1.0 { max as u64 } else { self.default_max.max(1) };
        (max, tvl as u64)
    }
}
