//! Analytics module for yeartrack
//!
//! Turns a collected [`crate::RawYearDataset`] into a year-in-review
//! [`StatisticsReport`]:
//! - Summary counts and per-entity statistics
//! - Per-project rollups
//! - Month/weekday/hour histograms and the longest activity streak
//! - Fun facts and achievement badges
//!
//! Everything here is pure computation; no I/O and no error paths. Missing
//! optional fields (project, text, content, resolution date) count as zero
//! or empty.

pub mod achievements;
pub mod aggregator;
pub mod facts;
pub mod report;
pub mod time;

pub use achievements::{Achievement, AchievementKind};
pub use aggregator::{Aggregator, UNKNOWN_PROJECT};
pub use facts::{FunFact, HourPersonality};
pub use report::{
    ArticleHighlight, ArticleStats, CommentHighlight, CommentStats, IssueHighlight, IssueStats,
    MostCommentedIssue, ProjectActivity, ProjectStats, StatisticsReport, Summary,
};
pub use time::{Streak, TimeStats};
