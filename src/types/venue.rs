use serde::{Deserialize, Serialize};
use std::fmt;

/// Blockchain a venue settles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Bsc,
    Avalanche,
    Solana,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Bsc => "bsc",
            Chain::Avalanche => "avalanche",
            Chain::Solana => "solana",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DEX protocol family a venue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    UniswapV3,
    SushiSwap,
    Balancer,
    Curve,
    PancakeSwap,
    TraderJoe,
    Raydium,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::UniswapV3 => "UniswapV3",
            Protocol::SushiSwap => "SushiSwap",
            Protocol::Balancer => "Balancer",
            Protocol::Curve => "Curve",
            Protocol::PancakeSwap => "PancakeSwap",
            Protocol::TraderJoe => "TraderJoe",
            Protocol::Raydium => "Raydium",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tradable liquidity source (a DEX, or a single fee tier of one) with its cost parameters.
///
/// Venues only live in memory: either inside the venue cache for its TTL window or as
/// constants in the fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Stable identifier, protocol plus fee tier (e.g. `uniswap-v3-3000`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Maximum recommended order size in quote-currency units
    pub max: u64,
    /// Swap fee as a fraction (0.003 = 0.3%)
    pub fee: f64,
    /// Modeled slippage as a fraction
    pub slippage: f64,
    pub chain: Chain,
    pub protocol: Protocol,
    /// Total value locked, informational only
    pub tvl: u64,
    pub supported_tokens: Vec<String>,
}

impl Venue {
    /// Checks `fee ∈ [0, 1)`, `slippage ≥ 0` and `max > 0`.
    pub fn validate(&self) -> Result<(), VenueError> {
        if !self.fee.is_finite() || self.fee < 0.0 || self.fee >= 1.0 {
            return Err(VenueError::InvalidFee {
                id: self.id.clone(),
                fee: self.fee,
            });
        }
        if !self.slippage.is_finite() || self.slippage < 0.0 {
            return Err(VenueError::InvalidSlippage {
                id: self.id.clone(),
                slippage: self.slippage,
            });
        }
        if self.max == 0 {
            return Err(VenueError::ZeroMax { id: self.id.clone() });
        }
        Ok(())
    }

    pub fn supports(&self, symbol: &str) -> bool {
        self.supported_tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(symbol))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VenueError {
    #[error("venue {id}: fee {fee} outside [0, 1)")]
    InvalidFee { id: String, fee: f64 },
    #[error("venue {id}: negative slippage {slippage}")]
    InvalidSlippage { id: String, slippage: f64 },
    #[error("venue {id}: max order size must be positive")]
    ZeroMax { id: String },
}

/// Cost breakdown for a single swap. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub fee: f64,
    pub slippage: f64,
    pub gas_cost: f64,
    pub estimated_output: f64,
    pub total_cost: f64,
    pub route: Vec<String>,
    pub execution_price: f64,
}
