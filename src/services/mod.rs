//! External-facing collaborators: market data acquisition and order routing.

pub mod market_data;
pub mod orders;
pub mod rest;

pub use market_data::MarketDataProvider;
pub use orders::{OrderAck, OrderGateway, RestOrderGateway};
pub use rest::RestMarketData;
