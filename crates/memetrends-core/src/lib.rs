//! Shared configuration and domain types for memetrends.
//!
//! Every other crate in the workspace depends on this one for the
//! [`Country`] presets, the [`LookbackPeriod`] options, the [`Report`] data
//! model and the environment-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod country;
pub mod error;
pub mod report;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use country::{Country, LookbackPeriod};
pub use error::{ConfigError, CoreError};
pub use report::{
    CountryOutcome, CountryReport, Report, SearchTerm, TermResult, VideoCandidate, VideoRow,
    MAX_SEARCH_TERMS, MAX_SHORT_DURATION_SECS, MAX_VIDEOS_PER_TERM,
};
