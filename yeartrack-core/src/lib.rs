//! # yeartrack-core
//!
//! Core library for yeartrack - a year in review for issue-tracker activity.
//!
//! This library provides:
//! - Domain types for issues, comments, articles and projects
//! - A REST gateway for the tracker API
//! - A collector that assembles one year of a user's activity
//! - An aggregator that turns the collected data into statistics
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Gateway:** paged, authenticated reads against the tracker
//! - **Collector:** concurrent fetch plus ownership/date filtering into a
//!   [`RawYearDataset`]
//! - **Aggregator:** pure computation of a [`StatisticsReport`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use yeartrack_core::{Aggregator, Collector, Credential, NoProgress, TrackerClient};
//!
//! # async fn run() -> yeartrack_core::Result<()> {
//! let credential = Credential::new("https://tracker.example.com", "perm:token");
//! let client = TrackerClient::new(&credential)?;
//!
//! let dataset = Collector::new(&client)
//!     .collect_year_data(2025, &["KB".to_string()], &NoProgress)
//!     .await?;
//! let report = Aggregator::utc().calculate_all(&dataset);
//! println!("{} contributions", report.summary.total_contributions);
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{Aggregator, StatisticsReport};
pub use collector::{Collector, NoProgress, ProgressObserver, YearWindow};
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{TrackerApi, TrackerClient};
pub use types::*;

// Public modules
pub mod analytics;
pub mod collector;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod types;
