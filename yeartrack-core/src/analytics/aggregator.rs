//! Dataset to report aggregation.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;

use super::achievements::evaluate_achievements;
use super::facts::generate_fun_facts;
use super::report::{
    ArticleHighlight, ArticleStats, CommentHighlight, CommentStats, IssueHighlight, IssueStats,
    MostCommentedIssue, ProjectActivity, ProjectStats, StatisticsReport, Summary,
};
use super::time::TimeStats;
use crate::types::{Article, Comment, Issue, ProjectRef, RawYearDataset};

/// Grouping key for activity without a project.
pub const UNKNOWN_PROJECT: &str = "Unknown";

const MS_PER_DAY: f64 = 86_400_000.0;

/// Turns a [`RawYearDataset`] into a [`StatisticsReport`].
///
/// Pure and deterministic: `tz` only decides which local month, weekday,
/// hour and calendar date an event falls on.
#[derive(Debug, Clone)]
pub struct Aggregator<Tz: TimeZone> {
    tz: Tz,
}

impl Aggregator<Utc> {
    /// Aggregator bucketing events in UTC.
    pub fn utc() -> Self {
        Self::new(Utc)
    }
}

impl<Tz: TimeZone> Aggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Compute every section of the report.
    pub fn calculate_all(&self, dataset: &RawYearDataset) -> StatisticsReport {
        let summary = calculate_summary(dataset);
        let issue_stats = calculate_issue_stats(&dataset.created_issues);
        let comment_stats = calculate_comment_stats(&dataset.comments);
        let article_stats = calculate_article_stats(&dataset.articles);
        let project_stats = calculate_project_stats(dataset);
        let time_stats = self.calculate_time_stats(dataset);

        let fun_facts = generate_fun_facts(&summary, &comment_stats, &article_stats, &time_stats);
        let achievements = evaluate_achievements(&summary, &project_stats, &time_stats);

        tracing::debug!(
            total = summary.total_contributions,
            fun_facts = fun_facts.len(),
            achievements = achievements.len(),
            "Calculated statistics"
        );

        StatisticsReport {
            user: dataset.user.clone(),
            year: dataset.year,
            summary,
            issue_stats,
            comment_stats,
            article_stats,
            project_stats,
            time_stats,
            fun_facts,
            achievements,
        }
    }

    /// Histograms and streak over created issues, comments and articles.
    ///
    /// Resolved issues do not contribute events of their own.
    pub fn calculate_time_stats(&self, dataset: &RawYearDataset) -> TimeStats {
        let events: Vec<DateTime<Utc>> = dataset
            .created_issues
            .iter()
            .map(|i| i.created_at)
            .chain(dataset.comments.iter().map(|c| c.created_at))
            .chain(dataset.articles.iter().map(|a| a.created_at))
            .collect();

        TimeStats::from_events(&events, &self.tz)
    }
}

pub fn calculate_summary(dataset: &RawYearDataset) -> Summary {
    let issues_created = dataset.created_issues.len();
    let issues_resolved = dataset.resolved_issues.len();
    let comments = dataset.comments.len();
    let articles = dataset.articles.len();

    Summary {
        issues_created,
        issues_resolved,
        comments,
        articles,
        total_contributions: issues_created + issues_resolved + comments + articles,
    }
}

/// First element with the greatest key.
///
/// `Iterator::max_by_key` keeps the last maximum; reversing first makes the
/// earliest one win.
fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().rev().max_by_key(|item| key(*item))
}

/// First element with the smallest key.
fn first_min_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().min_by_key(|item| key(*item))
}

fn rounded_average(total: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as usize
    }
}

pub fn calculate_issue_stats(created: &[Issue]) -> IssueStats {
    let durations: Vec<i64> = created
        .iter()
        .filter_map(|issue| {
            issue
                .resolved_at
                .map(|resolved| (resolved - issue.created_at).num_milliseconds())
        })
        .collect();

    let avg_resolution_ms = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<i64>() as f64 / durations.len() as f64
    };

    let summary_len = |issue: &Issue| issue.summary.chars().count();
    let highlight = |issue: &Issue| IssueHighlight {
        id_readable: issue.human_readable_id.clone(),
        summary: issue.summary.clone(),
        length: summary_len(issue),
    };

    IssueStats {
        avg_resolution_ms,
        avg_resolution_days: (avg_resolution_ms / MS_PER_DAY).round() as i64,
        resolved_with_time: durations.len(),
        longest_issue: first_max_by_key(created, |i| summary_len(i)).map(highlight),
        shortest_issue: first_min_by_key(created, |i| summary_len(i)).map(highlight),
    }
}

pub fn calculate_comment_stats(comments: &[Comment]) -> CommentStats {
    let total_length: usize = comments.iter().map(Comment::text_len).sum();

    let highlight = |comment: &Comment| CommentHighlight {
        issue_id: comment.issue.human_readable_id.clone(),
        text: comment.text.clone().unwrap_or_default(),
        length: comment.text_len(),
    };

    let mut per_issue: IndexMap<&str, (&Comment, usize)> = IndexMap::new();
    for comment in comments {
        per_issue
            .entry(comment.issue.human_readable_id.as_str())
            .or_insert((comment, 0))
            .1 += 1;
    }

    let mut most_commented: Option<(&Comment, usize)> = None;
    for &(comment, count) in per_issue.values() {
        if most_commented.map_or(true, |(_, best)| count > best) {
            most_commented = Some((comment, count));
        }
    }

    CommentStats {
        total: comments.len(),
        total_length,
        average_length: rounded_average(total_length, comments.len()),
        longest: first_max_by_key(comments, Comment::text_len).map(highlight),
        shortest: first_min_by_key(comments, Comment::text_len).map(highlight),
        most_commented_issue: most_commented.map(|(comment, count)| MostCommentedIssue {
            id_readable: comment.issue.human_readable_id.clone(),
            summary: comment.issue.summary.clone(),
            comment_count: count,
        }),
    }
}

pub fn calculate_article_stats(articles: &[Article]) -> ArticleStats {
    let total_length: usize = articles.iter().map(Article::content_len).sum();

    ArticleStats {
        total: articles.len(),
        total_length,
        average_length: rounded_average(total_length, articles.len()),
        longest: first_max_by_key(articles, Article::content_len).map(|article| {
            ArticleHighlight {
                id_readable: article.human_readable_id.clone(),
                summary: article.summary.clone(),
                length: article.content_len(),
            }
        }),
    }
}

fn project_key(project: Option<&ProjectRef>) -> &str {
    project.map_or(UNKNOWN_PROJECT, |p| p.name.as_str())
}

fn group_for<'a, 'm>(
    groups: &'m mut IndexMap<&'a str, ProjectActivity>,
    name: &'a str,
) -> &'m mut ProjectActivity {
    groups.entry(name).or_insert_with(|| ProjectActivity {
        name: name.to_string(),
        ..Default::default()
    })
}

/// Roll up activity by project display name.
///
/// Distinct projects sharing a display name are merged into one group.
pub fn calculate_project_stats(dataset: &RawYearDataset) -> ProjectStats {
    let mut groups: IndexMap<&str, ProjectActivity> = IndexMap::new();

    for issue in &dataset.created_issues {
        group_for(&mut groups, project_key(issue.project.as_ref())).issues_created += 1;
    }
    for issue in &dataset.resolved_issues {
        group_for(&mut groups, project_key(issue.project.as_ref())).issues_resolved += 1;
    }
    for comment in &dataset.comments {
        group_for(&mut groups, project_key(comment.issue.project.as_ref())).comments += 1;
    }

    let mut projects: Vec<ProjectActivity> = groups
        .into_values()
        .map(|mut p| {
            p.total_activity = p.issues_created + p.issues_resolved + p.comments;
            p
        })
        .collect();
    // Stable: equal totals keep discovery order
    projects.sort_by(|a, b| b.total_activity.cmp(&a.total_activity));

    ProjectStats {
        top_project: projects.first().cloned(),
        projects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::AchievementKind;
    use crate::types::{IssueRef, User, UserRef};
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn project(name: &str, short: &str) -> ProjectRef {
        ProjectRef {
            id: format!("0-{}", short),
            name: name.to_string(),
            short_name: short.to_string(),
        }
    }

    fn issue(id: &str, summary: &str, created: &str, project_ref: Option<ProjectRef>) -> Issue {
        Issue {
            id: format!("2-{}", id),
            human_readable_id: id.to_string(),
            summary: summary.to_string(),
            created_at: at(created),
            resolved_at: None,
            project: project_ref,
            custom_fields: vec![],
        }
    }

    fn comment(id: &str, text: Option<&str>, created: &str, parent: &Issue) -> Comment {
        Comment {
            id: id.to_string(),
            text: text.map(str::to_string),
            created_at: at(created),
            author: UserRef {
                id: "1-1".to_string(),
                login: "jane".to_string(),
                full_name: None,
            },
            issue: IssueRef::from(parent),
        }
    }

    fn article(id: &str, content: Option<&str>, created: &str) -> Article {
        Article {
            id: id.to_string(),
            human_readable_id: id.to_string(),
            summary: format!("Article {}", id),
            content: content.map(str::to_string),
            created_at: at(created),
            updated_at: at(created),
            reporter: None,
            project: None,
        }
    }

    fn dataset() -> RawYearDataset {
        RawYearDataset {
            user: User {
                id: "1-1".to_string(),
                login: "jane".to_string(),
                full_name: "Jane Doe".to_string(),
                avatar_url: None,
            },
            year: 2025,
            created_issues: vec![],
            resolved_issues: vec![],
            comments: vec![],
            articles: vec![],
            collected_at: at("2026-01-02T00:00:00Z"),
        }
    }

    #[test]
    fn test_empty_dataset() {
        let report = Aggregator::utc().calculate_all(&dataset());

        assert!(report.is_empty());
        assert_eq!(report.summary, Summary::default());
        assert_eq!(report.issue_stats.avg_resolution_ms, 0.0);
        assert_eq!(report.issue_stats.avg_resolution_days, 0);
        assert!(report.issue_stats.longest_issue.is_none());
        assert_eq!(report.comment_stats.average_length, 0);
        assert!(report.comment_stats.most_commented_issue.is_none());
        assert_eq!(report.article_stats.average_length, 0);
        assert!(report.project_stats.top_project.is_none());
        assert_eq!(report.time_stats.longest_streak.days, 0);
        assert!(report.time_stats.longest_streak.start_date.is_none());
        assert!(report.time_stats.longest_streak.end_date.is_none());
        assert!(report.fun_facts.is_empty());
        assert!(report.achievements.is_empty());
    }

    #[test]
    fn test_summary_total_is_sum_of_counts() {
        let alpha = project("Alpha", "AL");
        let created = issue("AL-1", "One", "2025-01-05T10:00:00Z", Some(alpha.clone()));
        let mut data = dataset();
        data.comments = vec![
            comment("c1", Some("hi"), "2025-01-06T10:00:00Z", &created),
            comment("c2", Some("yo"), "2025-01-07T10:00:00Z", &created),
        ];
        data.resolved_issues = vec![created.clone()];
        data.created_issues = vec![created];
        data.articles = vec![article("KB-1", Some("body"), "2025-02-01T10:00:00Z")];

        let summary = calculate_summary(&data);
        assert_eq!(summary.total_contributions, 1 + 1 + 2 + 1);
    }

    #[test]
    fn test_average_resolution_time() {
        let mut fast = issue("AL-1", "Fast", "2025-01-01T00:00:00Z", None);
        fast.resolved_at = Some(fast.created_at + Duration::days(1));
        let mut slow = issue("AL-2", "Slow", "2025-01-01T00:00:00Z", None);
        slow.resolved_at = Some(slow.created_at + Duration::days(4));
        let open = issue("AL-3", "Open", "2025-01-01T00:00:00Z", None);

        let stats = calculate_issue_stats(&[fast, slow, open]);

        assert_eq!(stats.avg_resolution_ms, 2.5 * MS_PER_DAY);
        assert_eq!(stats.avg_resolution_days, 3);
        assert_eq!(stats.resolved_with_time, 2);
    }

    #[test]
    fn test_longest_and_shortest_issue_ties_keep_first() {
        let issues = vec![
            issue("AL-1", "abc", "2025-01-01T00:00:00Z", None),
            issue("AL-2", "abcdef", "2025-01-01T00:00:00Z", None),
            issue("AL-3", "xyz", "2025-01-01T00:00:00Z", None),
            issue("AL-4", "uvwxyz", "2025-01-01T00:00:00Z", None),
        ];

        let stats = calculate_issue_stats(&issues);

        assert_eq!(stats.longest_issue.unwrap().id_readable, "AL-2");
        assert_eq!(stats.shortest_issue.unwrap().id_readable, "AL-1");
        assert_eq!(stats.avg_resolution_ms, 0.0);
    }

    #[test]
    fn test_comment_stats() {
        let first = issue("AL-1", "First", "2025-01-01T00:00:00Z", None);
        let second = issue("AL-2", "Second", "2025-01-01T00:00:00Z", None);
        let comments = vec![
            comment("c1", Some("hello"), "2025-01-02T00:00:00Z", &first),
            comment("c2", None, "2025-01-03T00:00:00Z", &second),
            comment("c3", Some("a much longer comment"), "2025-01-04T00:00:00Z", &second),
            comment("c4", Some("ok"), "2025-01-05T00:00:00Z", &first),
        ];

        let stats = calculate_comment_stats(&comments);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.total_length, 5 + 21 + 2);
        assert_eq!(stats.average_length, 7);
        assert_eq!(stats.longest.unwrap().length, 21);
        let shortest = stats.shortest.unwrap();
        assert_eq!(shortest.length, 0);
        assert_eq!(shortest.issue_id, "AL-2");

        // Both issues have two comments; the first group encountered wins
        let most = stats.most_commented_issue.unwrap();
        assert_eq!(most.id_readable, "AL-1");
        assert_eq!(most.comment_count, 2);
    }

    #[test]
    fn test_article_stats() {
        let articles = vec![
            article("KB-1", Some("short"), "2025-01-01T00:00:00Z"),
            article("KB-2", None, "2025-01-02T00:00:00Z"),
            article("KB-3", Some("the longest one"), "2025-01-03T00:00:00Z"),
        ];

        let stats = calculate_article_stats(&articles);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.total_length, 20);
        assert_eq!(stats.average_length, 7);
        assert_eq!(stats.longest.unwrap().id_readable, "KB-3");
    }

    #[test]
    fn test_project_grouping() {
        let alpha = project("Alpha", "AL");
        let mut data = dataset();
        data.created_issues = vec![
            issue("AL-1", "One", "2025-01-01T00:00:00Z", Some(alpha.clone())),
            issue("AL-2", "Two", "2025-01-02T00:00:00Z", Some(alpha.clone())),
        ];
        data.resolved_issues = vec![issue("AL-3", "Three", "2025-01-03T00:00:00Z", Some(alpha))];

        let stats = calculate_project_stats(&data);

        assert_eq!(
            stats.projects,
            vec![ProjectActivity {
                name: "Alpha".to_string(),
                issues_created: 2,
                issues_resolved: 1,
                comments: 0,
                total_activity: 3,
            }]
        );
        assert_eq!(stats.top_project.unwrap().name, "Alpha");
    }

    #[test]
    fn test_project_grouping_by_name_and_unknown() {
        let beta = project("Beta", "BE");
        let beta_clone = project("Beta", "BE2");
        let orphan = issue("X-1", "No project", "2025-01-01T00:00:00Z", None);
        let mut data = dataset();
        data.created_issues = vec![
            orphan.clone(),
            issue("BE-1", "One", "2025-01-01T00:00:00Z", Some(beta)),
        ];
        data.resolved_issues = vec![issue("BE2-1", "Two", "2025-01-01T00:00:00Z", Some(beta_clone))];
        data.comments = vec![comment("c1", Some("hm"), "2025-01-01T00:00:00Z", &orphan)];

        let stats = calculate_project_stats(&data);
        let names: Vec<_> = stats.projects.iter().map(|p| p.name.as_str()).collect();

        // Both "Beta" projects merge; ties keep discovery order
        assert_eq!(names, vec![UNKNOWN_PROJECT, "Beta"]);
        assert_eq!(stats.projects[0].total_activity, 2);
        assert_eq!(stats.projects[1].total_activity, 2);
    }

    #[test]
    fn test_time_stats_skip_resolved_issues() {
        let mut data = dataset();
        data.resolved_issues = vec![issue("AL-1", "Resolved", "2025-03-01T10:00:00Z", None)];
        data.created_issues = vec![issue("AL-2", "Created", "2025-03-02T10:00:00Z", None)];

        let time = Aggregator::utc().calculate_time_stats(&data);
        assert_eq!(time.total_events, 1);
        assert_eq!(time.active_days, 1);
    }

    #[test]
    fn test_full_report() {
        let alpha = project("Alpha", "AL");
        let mut data = dataset();
        // 75 created issues spread over consecutive days of March at 10:00 UTC
        data.created_issues = (0..75)
            .map(|i| {
                let mut created = issue(
                    &format!("AL-{}", i),
                    "Summary",
                    "2025-03-01T10:00:00Z",
                    Some(alpha.clone()),
                );
                created.created_at += Duration::days(i / 3);
                created
            })
            .collect();

        let report = Aggregator::utc().calculate_all(&data);

        assert_eq!(report.summary.total_contributions, 75);
        assert_eq!(report.time_stats.longest_streak.days, 25);
        assert_eq!(report.time_stats.busiest_hour, 10);
        let kinds: Vec<_> = report.achievements.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AchievementKind::IssuesCreated,
                AchievementKind::Streak,
                AchievementKind::WeekendWarrior
            ]
        );
        assert_eq!(report.achievements[0].threshold, Some(50));
        assert_eq!(report.achievements[1].threshold, Some(14));
        // Busiest weekday, peak hour, streak, pace (75 / 12 = 6.25 -> 6)
        assert_eq!(report.fun_facts.len(), 4);
    }
}
