//! Tracker API gateway
//!
//! Turns the tracker's paged REST endpoints into plain collections.
//!
//! ## Architecture
//!
//! - [`TrackerApi`] is the seam the collector depends on. Tests substitute
//!   an in-memory stub; production uses [`TrackerClient`].
//! - [`paginate`] owns the paging contract shared by every list endpoint:
//!   fixed page size, `$skip` from 0, sequential requests, stop on the first
//!   short or empty page.
//! - Issue searches are expressed in the tracker's query language. The
//!   query strings built here are an external contract and must match the
//!   tracker's field names exactly.

mod client;

pub use client::TrackerClient;

use std::future::Future;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{Article, Issue, IssueWithComments, ProjectRef, User};

/// Number of entities requested per page.
pub const PAGE_SIZE: usize = 100;

/// Callback invoked after every page with the running item total.
pub type PageProgress<'a> = &'a (dyn Fn(usize) + Send + Sync);

/// Read-only access to the tracker.
///
/// Every method fails with the error classification documented on
/// [`crate::Error`]. Only [`TrackerApi::get_articles`] tolerates partial
/// failure.
#[allow(async_fn_in_trait)]
pub trait TrackerApi {
    /// The user the credential belongs to.
    async fn get_current_user(&self) -> Result<User>;

    /// Issues reported by `login` between `start` and `end` (inclusive dates).
    async fn get_issues_created_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Issue>>;

    /// Issues assigned to `login` and resolved between `start` and `end`.
    async fn get_issues_resolved_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Issue>>;

    /// Issues `login` commented on between `start` and `end`.
    ///
    /// The tracker matches at issue granularity, so each issue carries its
    /// complete comment list; per-comment filtering is the caller's job.
    async fn get_issues_with_comments_by(
        &self,
        login: &str,
        start: NaiveDate,
        end: NaiveDate,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<IssueWithComments>>;

    /// All articles of a single project.
    async fn get_project_articles(
        &self,
        project_short_name: &str,
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Article>>;

    /// Up to [`PAGE_SIZE`] projects visible to the credential.
    async fn get_projects(&self) -> Result<Vec<ProjectRef>>;

    /// Articles across several projects.
    ///
    /// A project that fails (typically for lack of permission) is logged and
    /// skipped; articles already fetched from other projects are kept.
    async fn get_articles(
        &self,
        project_short_names: &[String],
        on_page: PageProgress<'_>,
    ) -> Result<Vec<Article>> {
        let mut articles = Vec::new();

        for short_name in project_short_names {
            let already = articles.len();
            let progress = |count: usize| on_page(already + count);

            match self.get_project_articles(short_name, &progress).await {
                Ok(fetched) => {
                    tracing::debug!(
                        project = %short_name,
                        count = fetched.len(),
                        "Fetched project articles"
                    );
                    articles.extend(fetched);
                }
                Err(e) => {
                    tracing::warn!(
                        project = %short_name,
                        error = %e,
                        "Skipping articles for project"
                    );
                }
            }
        }

        Ok(articles)
    }
}

/// Fetch pages until the tracker returns a short or empty page.
///
/// `fetch_page` receives the `$skip` offset of the page to load.
pub async fn paginate<T, F, Fut>(mut fetch_page: F, on_page: PageProgress<'_>) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut skip = 0;

    loop {
        let page = fetch_page(skip).await?;
        let page_len = page.len();
        items.extend(page);

        tracing::debug!(skip, page_len, total = items.len(), "Fetched page");
        on_page(items.len());

        if page_len < PAGE_SIZE {
            break;
        }
        skip += PAGE_SIZE;
    }

    Ok(items)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Query selecting issues reported by `login` in the date range.
pub fn created_by_query(login: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "created: {} .. {} created by: {}",
        format_date(start),
        format_date(end),
        login
    )
}

/// Query selecting issues assigned to `login` and resolved in the date range.
pub fn resolved_by_query(login: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "resolved date: {} .. {} Assignee: {}",
        format_date(start),
        format_date(end),
        login
    )
}

/// Query selecting issues with at least one comment by `login` in the range.
pub fn commented_by_query(login: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "commenter: {} commented: {} .. {}",
        login,
        format_date(start),
        format_date(end)
    )
}
