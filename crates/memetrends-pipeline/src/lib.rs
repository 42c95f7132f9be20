//! Trend-to-video analysis runs.
//!
//! A run walks the selected countries one at a time: fetch rising terms, look
//! up short-form videos for each term, and record the outcome in a
//! [`memetrends_core::Report`]. One country's failure never affects another.

pub mod analyzer;
pub mod run;

pub use analyzer::{Analyzer, SetupError};
pub use run::{run_analysis, RunProgress};
