//! Client for rising related search terms from the SerpApi Google Trends engine.

pub mod client;
pub mod error;
pub mod types;

pub use client::TrendsClient;
pub use error::TrendsError;
