// DEX Adapters Module
// One adapter per protocol, each turning contract reads into venues

pub mod sushiswap;
pub mod uniswap_v3;

pub use sushiswap::SushiSwapAdapter;
pub use uniswap_v3::UniswapV3Adapter;

// Re-export the trait
pub use crate::dex_adapter::DexAdapter;
