//! Hardcoded venues served whenever live discovery yields nothing.

use once_cell::sync::Lazy;

use crate::types::{Chain, Protocol, Venue};

const ETH_MAJORS: [&str; 6] = ["ETH", "WETH", "USDC", "USDT", "DAI", "WBTC"];

static FALLBACK_VENUES: Lazy<Vec<Venue>> = Lazy::new(|| {
    vec![
        venue("uniswap-v3-500", "Uniswap V3 (0.05%)", Protocol::UniswapV3, 600_000, 0.0005, 0.0008, 1_350_000_000, &ETH_MAJORS),
        venue("uniswap-v3-3000", "Uniswap V3 (0.3%)", Protocol::UniswapV3, 900_000, 0.003, 0.0012, 2_100_000_000, &ETH_MAJORS),
        venue("uniswap-v3-10000", "Uniswap V3 (1%)", Protocol::UniswapV3, 1_200_000, 0.01, 0.0008, 500_000_000, &ETH_MAJORS),
        venue("sushiswap", "SushiSwap", Protocol::SushiSwap, 800_000, 0.0025, 0.002, 500_000_000, &ETH_MAJORS),
        venue("balancer", "Balancer", Protocol::Balancer, 500_000, 0.002, 0.001, 300_000_000, &["ETH", "WETH", "USDC", "DAI", "BAL"]),
        venue("curve", "Curve", Protocol::Curve, 900_000, 0.0004, 0.001, 2_000_000_000, &["ETH", "WETH", "USDC", "USDT", "DAI"]),
    ]
});

#[allow(clippy::too_many_arguments)]
fn venue(
    id: &str,
    name: &str,
    protocol: Protocol,
    max: u64,
    fee: f64,
    slippage: f64,
    tvl: u64,
    tokens: &[&str],
) -> Venue {
    Venue {
        id: id.to_string(),
        name: name.to_string(),
        max,
        fee,
        slippage,
        chain: Chain::Ethereum,
        protocol,
        tvl,
        supported_tokens: tokens.iter().map(|t| t.to_string()).collect(),
    }
}

/// The full fallback table, in its fixed order.
pub fn fallback_venues() -> &'static [Venue] {
    &FALLBACK_VENUES
}

pub fn find_fallback(id: &str) -> Option<&'static Venue> {
    FALLBACK_VENUES.iter().find(|v| v.id == id)
}
