//! YouTube Data API v3 client for short-form video discovery.
//!
//! [`ShortsClient::discover_shorts`] is the pipeline entry point: it searches
//! for `#shorts` videos matching a query, fetches statistics and durations,
//! keeps videos of at most 60 seconds and returns the five most viewed.
//! Every failure along the way is logged and collapses to an empty list.

pub mod client;
pub mod duration;
pub mod error;
pub mod keys;
pub mod rank;
pub mod types;
pub mod url;

pub use client::{published_after, ShortsClient};
pub use duration::parse_iso8601_duration;
pub use error::YoutubeError;
pub use keys::{FixedKey, KeySelector, RandomKeyPool};
pub use rank::{is_short, rank_shorts};
pub use url::normalize_video_url;
