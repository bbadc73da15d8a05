//! Common types shared by the fetcher, cache, estimator and HTTP layer.

pub mod conversions;
pub mod tokens;
pub mod venue;

pub use tokens::{TokenBook, TokenPair};
pub use venue::{Chain, Protocol, SwapQuote, Venue, VenueError};
