use ethers::prelude::*;

// Exact Solidity widths: uint160 sqrtPriceX96, int24 tick, uint24 fee, uint128 liquidity.
// Widening any of them breaks output decoding silently.
abigen!(
    IUniswapV3Pool,
    r#"[
        function slot0() external view returns (uint160 sqrtPriceX96, int24 tick, uint16 observationIndex, uint16 observationCardinality, uint16 observationCardinalityNext, uint8 feeProtocol, bool unlocked)
        function liquidity() external view returns (uint128)
        function fee() external view returns (uint24)
    ]"#
);
