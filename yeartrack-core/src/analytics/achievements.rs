//! Achievement badges
//!
//! Ladder categories award only their single highest tier reached. The
//! three activity-pattern badges are independent flags and can all fire.

use serde::Serialize;

use super::report::{ProjectStats, Summary};
use super::time::TimeStats;

/// Minimum event count for the activity-pattern badges (exclusive).
pub const PATTERN_THRESHOLD: u64 = 20;

/// Badge category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    IssuesCreated,
    IssuesResolved,
    Comments,
    Articles,
    Streak,
    Projects,
    WeekendWarrior,
    NightOwl,
    EarlyBird,
}

/// An awarded badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub kind: AchievementKind,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: String,
    /// Tier threshold for ladder badges; `None` for pattern badges
    pub threshold: Option<u64>,
}

struct Tier {
    threshold: u64,
    name: &'static str,
    emoji: &'static str,
}

const fn tier(threshold: u64, name: &'static str, emoji: &'static str) -> Tier {
    Tier {
        threshold,
        name,
        emoji,
    }
}

const ISSUES_CREATED: &[Tier] = &[
    tier(5, "Bug Spotter", "🐛"),
    tier(20, "Issue Reporter", "📝"),
    tier(50, "Bug Hunter", "🔍"),
    tier(100, "Issue Machine", "🏭"),
];

const ISSUES_RESOLVED: &[Tier] = &[
    tier(20, "Problem Solver", "🔧"),
    tier(50, "Fixer", "🛠️"),
    tier(100, "Resolution Master", "🏆"),
];

const COMMENTS: &[Tier] = &[
    tier(50, "Conversationalist", "💬"),
    tier(200, "Discussion Leader", "🗣️"),
    tier(500, "Comment Legend", "📣"),
];

const ARTICLES: &[Tier] = &[
    tier(3, "Knowledge Sharer", "📄"),
    tier(10, "Technical Writer", "✍️"),
    tier(20, "Documentation Hero", "📚"),
];

const STREAK: &[Tier] = &[
    tier(7, "Week Warrior", "🔥"),
    tier(14, "Fortnight Force", "⚡"),
    tier(30, "Unstoppable", "🚀"),
];

const PROJECTS: &[Tier] = &[
    tier(5, "Multi-tasker", "🧭"),
    tier(10, "Project Hopper", "🌍"),
];

/// Highest tier whose threshold `value` reaches.
fn highest_tier(value: u64, ladder: &'static [Tier]) -> Option<&'static Tier> {
    ladder.iter().rev().find(|t| value >= t.threshold)
}

fn ladder_badge(
    kind: AchievementKind,
    value: u64,
    ladder: &'static [Tier],
    noun: &str,
) -> Option<Achievement> {
    highest_tier(value, ladder).map(|t| Achievement {
        kind,
        name: t.name,
        emoji: t.emoji,
        description: format!("{}+ {}", t.threshold, noun),
        threshold: Some(t.threshold),
    })
}

fn pattern_badge(
    kind: AchievementKind,
    events: u64,
    name: &'static str,
    emoji: &'static str,
    description: &str,
) -> Option<Achievement> {
    (events > PATTERN_THRESHOLD).then(|| Achievement {
        kind,
        name,
        emoji,
        description: format!("{} ({} contributions)", description, events),
        threshold: None,
    })
}

/// Evaluate every category in a fixed order.
pub fn evaluate_achievements(
    summary: &Summary,
    projects: &ProjectStats,
    time: &TimeStats,
) -> Vec<Achievement> {
    [
        ladder_badge(
            AchievementKind::IssuesCreated,
            summary.issues_created as u64,
            ISSUES_CREATED,
            "issues created",
        ),
        ladder_badge(
            AchievementKind::IssuesResolved,
            summary.issues_resolved as u64,
            ISSUES_RESOLVED,
            "issues resolved",
        ),
        ladder_badge(
            AchievementKind::Comments,
            summary.comments as u64,
            COMMENTS,
            "comments written",
        ),
        ladder_badge(
            AchievementKind::Articles,
            summary.articles as u64,
            ARTICLES,
            "articles published",
        ),
        ladder_badge(
            AchievementKind::Streak,
            time.longest_streak.days as u64,
            STREAK,
            "day streak",
        ),
        ladder_badge(
            AchievementKind::Projects,
            projects.projects.len() as u64,
            PROJECTS,
            "projects touched",
        ),
        pattern_badge(
            AchievementKind::WeekendWarrior,
            time.weekend_events(),
            "Weekend Warrior",
            "🏖️",
            "Active on weekends",
        ),
        pattern_badge(
            AchievementKind::NightOwl,
            time.night_events(),
            "Night Owl",
            "🦉",
            "Active between 10pm and 5am",
        ),
        pattern_badge(
            AchievementKind::EarlyBird,
            time.early_morning_events(),
            "Early Bird",
            "🐦",
            "Active between 5am and 9am",
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
