use ethers::types::U256;
use ethers::utils::format_ether;
use rust_decimal::Decimal;

// Liquidity values only feed sizing heuristics, so f64 precision is enough here
pub fn wei_to_ether(value: U256) -> Result<f64, ConversionError> {
    let formatted = format_ether(value);
    formatted
        .parse::<f64>()
        .map_err(|e| ConversionError::InvalidFloat(format!("{}: {}", formatted, e)))
}

/// Uniswap fee tier (hundredths of a basis point) as a percentage: 500 → 0.05, 3000 → 0.3.
pub fn fee_tier_percent(fee: u32) -> Decimal {
    Decimal::new(i64::from(fee), 4).normalize()
}

/// Uniswap fee tier as a fraction: 3000 → 0.003.
pub fn fee_tier_rate(fee: u32) -> f64 {
    f64::from(fee) / 1_000_000.0
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid float: {0}")]
    InvalidFloat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_tier_percent() {
        assert_eq!(fee_tier_percent(500).to_string(), "0.05");
        assert_eq!(fee_tier_percent(3000).to_string(), "0.3");
        assert_eq!(fee_tier_percent(10000).to_string(), "1");
    }

    #[test]
    fn test_fee_tier_rate() {
        assert_eq!(fee_tier_rate(500), 0.0005);
        assert_eq!(fee_tier_rate(3000), 0.003);
        assert_eq!(fee_tier_rate(10000), 0.01);
    }

    #[test]
    fn test_wei_to_ether() {
        let one_and_half = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(wei_to_ether(one_and_half).unwrap(), 1.5);
        assert_eq!(wei_to_ether(U256::zero()).unwrap(), 0.0);
    }
}
