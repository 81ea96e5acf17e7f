//! Core domain types for yeartrack
//!
//! These types mirror the tracker's REST entities. They double as the wire
//! schema: every response body is decoded straight into one of these structs,
//! so an unexpected shape fails at the gateway boundary instead of deep inside
//! the analytics.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Issue** | A tracked work item |
//! | **Comment** | A remark on an issue, authored by a tracker user |
//! | **Article** | A knowledge-base document attached to a project |
//! | **Project** | Container for issues and articles; rollups group by its display name |
//!
//! Timestamps arrive as epoch milliseconds and are held as UTC instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode an explicit JSON `null` the same way as a missing key.
///
/// The tracker sends `null` for unset text fields.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================
// Credential
// ============================================

/// Connection settings for one collection run.
///
/// Owned by the caller. The token is redacted from `Debug` output so a
/// credential can travel through `tracing` fields safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    base_endpoint: String,
    token: String,
}

impl Credential {
    pub fn new(base_endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_endpoint: base_endpoint.into(),
            token: token.into(),
        }
    }

    /// Base URL of the tracker, without the `/api` suffix.
    pub fn base_endpoint(&self) -> &str {
        &self.base_endpoint
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("base_endpoint", &self.base_endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

// ============================================
// Users and Projects
// ============================================

/// The authenticated tracker user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique handle, used as the ownership filter throughout a run
    pub login: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Full name when set, login otherwise.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.login
        } else {
            &self.full_name
        }
    }
}

/// Reference to a user embedded in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Reference to a project embedded in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

// ============================================
// Issues
// ============================================

/// A custom field value; the shape of `value` depends on the field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A tracked work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    /// Human-readable id such as `PROJ-42`
    #[serde(rename = "idReadable")]
    pub human_readable_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "resolved",
        default,
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// A comment as embedded in an issue response, before ownership filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Absent for comments by deleted users
    #[serde(default)]
    pub author: Option<UserRef>,
}

/// An issue carrying its full, unfiltered comment list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueWithComments {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(default)]
    pub comments: Vec<IssueComment>,
}

/// Lightweight back-reference from a comment to its parent issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRef {
    pub id: String,
    pub human_readable_id: String,
    pub summary: String,
    pub project: Option<ProjectRef>,
}

impl From<&Issue> for IssueRef {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            human_readable_id: issue.human_readable_id.clone(),
            summary: issue.summary.clone(),
            project: issue.project.clone(),
        }
    }
}

/// A comment authored by the target user within the collected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author: UserRef,
    pub issue: IssueRef,
}

impl Comment {
    /// Length of the comment text in characters; missing text counts as 0.
    pub fn text_len(&self) -> usize {
        self.text.as_deref().map_or(0, |t| t.chars().count())
    }
}

// ============================================
// Articles
// ============================================

/// A knowledge-base document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(rename = "idReadable")]
    pub human_readable_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "created", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated", with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub reporter: Option<UserRef>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

impl Article {
    /// Length of the article body in characters; missing content counts as 0.
    pub fn content_len(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.chars().count())
    }
}

// ============================================
// Dataset
// ============================================

/// Everything collected for one user and one calendar year.
///
/// Produced once by the collector and handed by value to the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawYearDataset {
    pub user: User,
    pub year: i32,
    /// Issues reported by the user (unfiltered)
    pub created_issues: Vec<Issue>,
    /// Issues assigned to and resolved by the user (unfiltered)
    pub resolved_issues: Vec<Issue>,
    /// Comments authored by the user inside the year window
    pub comments: Vec<Comment>,
    /// Articles reported by the user inside the year window
    pub articles: Vec<Article>,
    pub collected_at: DateTime<Utc>,
}
