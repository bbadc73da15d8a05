//! Closed-form swap-cost estimation.
//!
//! Costs are linear in the order amount: per-venue fee, slippage and gas factors come from a
//! static table and the output uses a static pair rate. There is no order-book walk or
//! liquidity curve. Unknown venues fall back to Uniswap V3 numbers and unknown pairs to a
//! rate of 1; both cases are reported as warnings on the returned [`Estimate`].

use serde::Serialize;
use std::collections::HashMap;

use crate::types::SwapQuote;

pub const DEFAULT_VENUE: &str = "Uniswap V3";
pub const DEFAULT_SOURCE_TOKEN: &str = "ETH";
pub const DEFAULT_TARGET_TOKEN: &str = "USDC";

/// Per-venue cost factors, all fractions of the order amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostProfile {
    pub fee: f64,
    pub slippage: f64,
    pub gas: f64,
}

const VENUE_COSTS: [(&str, CostProfile); 7] = [
    ("Uniswap V3", CostProfile { fee: 0.0030, slippage: 0.0015, gas: 0.0045 }),
    ("SushiSwap", CostProfile { fee: 0.0025, slippage: 0.0020, gas: 0.0050 }),
    ("Balancer", CostProfile { fee: 0.0020, slippage: 0.0010, gas: 0.0060 }),
    ("Curve", CostProfile { fee: 0.0004, slippage: 0.0010, gas: 0.0080 }),
    ("PancakeSwap", CostProfile { fee: 0.0025, slippage: 0.0025, gas: 0.0020 }),
    ("TraderJoe", CostProfile { fee: 0.0030, slippage: 0.0020, gas: 0.0030 }),
    ("Raydium", CostProfile { fee: 0.0030, slippage: 0.0025, gas: 0.0005 }),
];

const PAIR_RATES: [(&str, &str, f64); 5] = [
    ("ETH", "USDC", 3500.0),
    ("ETH", "DAI", 3500.0),
    ("ETH", "USDT", 3490.0),
    ("WBTC", "ETH", 16.5),
    ("WBTC", "USDC", 57500.0),
];

/// Input the estimator had to guess about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum EstimateWarning {
    /// Venue not in the cost table, Uniswap V3 costs used
    UnknownVenue(String),
    /// Pair not in the rate table, rate 1 used
    UnknownPair(String),
}

/// A quote plus the defaults that went into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    #[serde(flatten)]
    pub quote: SwapQuote,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EstimateWarning>,
}

impl Estimate {
    pub fn is_exact(&self) -> bool {
        self.warnings.is_empty()
    }

    /// False when the amount was large enough to overflow any cost or output figure.
    pub fn is_finite(&self) -> bool {
        let q = &self.quote;
        [q.fee, q.slippage, q.gas_cost, q.estimated_output, q.total_cost, q.execution_price]
            .iter()
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone)]
pub struct SwapEstimator {
    /// Keyed by lowercased venue name
    costs: HashMap<String, CostProfile>,
    rates: HashMap<(String, String), f64>,
    default_costs: CostProfile,
}

impl Default for SwapEstimator {
    fn default() -> Self {
        let costs: HashMap<String, CostProfile> = VENUE_COSTS
            .iter()
            .map(|(name, profile)| (name.to_lowercase(), *profile))
            .collect();
        let rates = PAIR_RATES
            .iter()
            .map(|(base, quote, rate)| ((base.to_string(), quote.to_string()), *rate))
            .collect();
        // First table entry is DEFAULT_VENUE
        let default_costs = VENUE_COSTS[0].1;
        Self { costs, rates, default_costs }
    }
}

impl SwapEstimator {
    /// Looks a venue up by exact or case-insensitive name, or by slug (`uniswap-v3`).
    pub fn cost_profile(&self, venue: &str) -> Option<CostProfile> {
        let key = venue.trim().to_lowercase();
        if let Some(profile) = self.costs.get(&key) {
            return Some(*profile);
        }
        self.costs
            .iter()
            .find(|(name, _)| slug(name) == key)
            .map(|(_, profile)| *profile)
    }

    pub fn pair_rate(&self, source: &str, target: &str) -> Option<f64> {
        self.rates
            .get(&(source.to_uppercase(), target.to_uppercase()))
            .copied()
    }

    /// Estimates the cost of swapping `amount` of `source` into `target` on `venue`.
    pub fn estimate(&self, venue: &str, amount: f64, source: &str, target: &str) -> Estimate {
        let mut warnings = Vec::new();

        let costs = self.cost_profile(venue).unwrap_or_else(|| {
            warnings.push(EstimateWarning::UnknownVenue(venue.to_string()));
            self.default_costs
        });
        let rate = self.pair_rate(source, target).unwrap_or_else(|| {
            warnings.push(EstimateWarning::UnknownPair(format!("{}/{}", source, target)));
            1.0
        });

        let fee = costs.fee * amount;
        let slippage = costs.slippage * amount;
        let gas_cost = costs.gas * amount;
        let execution_price = rate * (1.0 - costs.fee - costs.slippage);

        Estimate {
            quote: SwapQuote {
                fee,
                slippage,
                gas_cost,
                estimated_output: amount * rate * (1.0 - costs.fee - costs.slippage),
                total_cost: fee + slippage + gas_cost,
                route: vec![venue.to_string()],
                execution_price,
            },
            warnings,
        }
    }
}

fn slug(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}
