//! Year data collection
//!
//! Builds one [`RawYearDataset`] for the user behind a credential:
//!
//! 1. Resolve the current user (everything else filters on its login).
//! 2. Fan out four independent fetches (created issues, resolved issues,
//!    commented issues, articles) and wait for all of them. The first
//!    failure fails the whole collection; the other fetches are dropped.
//! 3. Pull the user's own comments out of the commented issues.
//! 4. Keep the user's own articles.
//!
//! Comment and article filtering uses the closed UTC interval
//! `{year}-01-01T00:00:00Z ..= {year}-12-31T23:59:59Z`, the same window the
//! tracker applies server-side to the date-only queries.

mod progress;
mod window;

pub use progress::{NoProgress, ProgressObserver};
pub use window::YearWindow;

use chrono::Utc;

use crate::error::Result;
use crate::gateway::TrackerApi;
use crate::types::{Article, Comment, IssueRef, IssueWithComments, RawYearDataset};

/// Collects a year of activity through a [`TrackerApi`].
pub struct Collector<'a, A> {
    api: &'a A,
}

impl<'a, A: TrackerApi> Collector<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Collect everything the aggregator needs for `year`.
    ///
    /// `article_projects` lists project short names to read articles from;
    /// an empty list skips article collection entirely.
    pub async fn collect_year_data(
        &self,
        year: i32,
        article_projects: &[String],
        progress: &dyn ProgressObserver,
    ) -> Result<RawYearDataset> {
        let window = YearWindow::new(year)?;

        progress.on_progress("Fetching user profile...");
        let user = self.api.get_current_user().await?;
        tracing::info!(
            login = %user.login,
            year,
            article_projects = article_projects.len(),
            "Collecting year data"
        );

        progress.on_progress(&format!(
            "Fetching {} activity for {}...",
            year,
            user.display_name()
        ));

        let start = window.start_date();
        let end = window.end_date();
        let created_progress =
            |n: usize| progress.on_progress(&format!("Loaded {} created issues", n));
        let resolved_progress =
            |n: usize| progress.on_progress(&format!("Loaded {} resolved issues", n));
        let commented_progress =
            |n: usize| progress.on_progress(&format!("Loaded {} commented issues", n));
        let article_progress = |n: usize| progress.on_progress(&format!("Loaded {} articles", n));

        let (created_issues, resolved_issues, commented_issues, articles) = tokio::try_join!(
            self.api
                .get_issues_created_by(&user.login, start, end, &created_progress),
            self.api
                .get_issues_resolved_by(&user.login, start, end, &resolved_progress),
            self.api
                .get_issues_with_comments_by(&user.login, start, end, &commented_progress),
            self.api.get_articles(article_projects, &article_progress),
        )?;

        progress.on_progress("Processing comments...");
        let comments = extract_user_comments(&commented_issues, &user.login, &window);
        let articles = filter_user_articles(articles, &user.login, &window);

        tracing::info!(
            created = created_issues.len(),
            resolved = resolved_issues.len(),
            comments = comments.len(),
            articles = articles.len(),
            "Collection complete"
        );

        Ok(RawYearDataset {
            user,
            year,
            created_issues,
            resolved_issues,
            comments,
            articles,
            collected_at: Utc::now(),
        })
    }
}

/// Comments written by `login` inside `window`, each linked to its issue.
pub fn extract_user_comments(
    issues: &[IssueWithComments],
    login: &str,
    window: &YearWindow,
) -> Vec<Comment> {
    let mut comments = Vec::new();

    for entry in issues {
        let issue_ref = IssueRef::from(&entry.issue);

        for comment in &entry.comments {
            let Some(author) = &comment.author else {
                continue;
            };
            if author.login != login || !window.contains(comment.created_at) {
                continue;
            }

            comments.push(Comment {
                id: comment.id.clone(),
                text: comment.text.clone(),
                created_at: comment.created_at,
                author: author.clone(),
                issue: issue_ref.clone(),
            });
        }
    }

    comments
}

/// Articles reported by `login` and created inside `window`.
pub fn filter_user_articles(
    articles: Vec<Article>,
    login: &str,
    window: &YearWindow,
) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|article| {
            article
                .reporter
                .as_ref()
                .is_some_and(|reporter| reporter.login == login)
                && window.contains(article.created_at)
        })
        .collect()
}
