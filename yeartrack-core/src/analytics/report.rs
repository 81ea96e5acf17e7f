//! Statistics report types.
//!
//! A [`StatisticsReport`] is the only artifact handed to presentation. It is
//! built once by [`super::Aggregator`] and never mutated afterwards.

use serde::Serialize;

use super::achievements::Achievement;
use super::facts::FunFact;
use super::time::TimeStats;
use crate::types::User;

/// Complete year-in-review statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub user: User,
    pub year: i32,
    pub summary: Summary,
    pub issue_stats: IssueStats,
    pub comment_stats: CommentStats,
    pub article_stats: ArticleStats,
    pub project_stats: ProjectStats,
    pub time_stats: TimeStats,
    pub fun_facts: Vec<FunFact>,
    pub achievements: Vec<Achievement>,
}

impl StatisticsReport {
    /// True when the user had no recorded activity at all.
    pub fn is_empty(&self) -> bool {
        self.summary.total_contributions == 0
    }
}

/// Headline counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub issues_created: usize,
    pub issues_resolved: usize,
    pub comments: usize,
    pub articles: usize,
    /// Sum of the four counts above
    pub total_contributions: usize,
}

/// An issue singled out by summary length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueHighlight {
    pub id_readable: String,
    pub summary: String,
    pub length: usize,
}

/// Statistics over created issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStats {
    /// Mean `resolved - created` over created issues that are resolved
    pub avg_resolution_ms: f64,
    /// `avg_resolution_ms` in whole days, rounded
    pub avg_resolution_days: i64,
    /// Number of created issues that contributed to the average
    pub resolved_with_time: usize,
    pub longest_issue: Option<IssueHighlight>,
    pub shortest_issue: Option<IssueHighlight>,
}

impl IssueStats {
    /// Human-friendly resolution time (e.g., "3d 4h").
    pub fn avg_resolution_display(&self) -> String {
        let total_hours = (self.avg_resolution_ms / 3_600_000.0).round() as i64;
        let days = total_hours / 24;
        let hours = total_hours % 24;
        if days > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}h", hours)
        }
    }
}

/// A comment singled out by text length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentHighlight {
    /// Human-readable id of the issue the comment belongs to
    pub issue_id: String,
    pub text: String,
    pub length: usize,
}

/// The issue the user commented on most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MostCommentedIssue {
    pub id_readable: String,
    pub summary: String,
    pub comment_count: usize,
}

/// Statistics over the user's comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStats {
    pub total: usize,
    /// Characters written across all comments
    pub total_length: usize,
    pub average_length: usize,
    pub longest: Option<CommentHighlight>,
    pub shortest: Option<CommentHighlight>,
    pub most_commented_issue: Option<MostCommentedIssue>,
}

/// An article singled out by content length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleHighlight {
    pub id_readable: String,
    pub summary: String,
    pub length: usize,
}

/// Statistics over the user's articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total: usize,
    pub total_length: usize,
    pub average_length: usize,
    pub longest: Option<ArticleHighlight>,
}

/// Activity rolled up under one project display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectActivity {
    pub name: String,
    pub issues_created: usize,
    pub issues_resolved: usize,
    pub comments: usize,
    pub total_activity: usize,
}

/// Per-project rollups, most active first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub projects: Vec<ProjectActivity>,
    pub top_project: Option<ProjectActivity>,
}
