//! Fun facts for the year in review
//!
//! Each fact is independent; a fact whose data is missing is simply left out.

use serde::Serialize;

use super::report::{ArticleStats, CommentStats, Summary};
use super::time::TimeStats;

/// Characters that make up one printed page.
pub const CHARS_PER_PAGE: usize = 3000;

/// Coding persona derived from the busiest hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HourPersonality {
    /// 5am-9am
    EarlyBird,
    /// 9am-noon
    MorningPerson,
    /// noon-5pm
    AfternoonWarrior,
    /// 5pm-9pm
    EveningCoder,
    /// 9pm-5am
    NightOwl,
}

impl HourPersonality {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=8 => HourPersonality::EarlyBird,
            9..=11 => HourPersonality::MorningPerson,
            12..=16 => HourPersonality::AfternoonWarrior,
            17..=20 => HourPersonality::EveningCoder,
            _ => HourPersonality::NightOwl,
        }
    }

    /// Get the display name for this personality.
    pub fn name(&self) -> &'static str {
        match self {
            HourPersonality::EarlyBird => "Early Bird",
            HourPersonality::MorningPerson => "Morning Person",
            HourPersonality::AfternoonWarrior => "Afternoon Warrior",
            HourPersonality::EveningCoder => "Evening Coder",
            HourPersonality::NightOwl => "Night Owl",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            HourPersonality::EarlyBird => "🐦",
            HourPersonality::MorningPerson => "☀️",
            HourPersonality::AfternoonWarrior => "⚔️",
            HourPersonality::EveningCoder => "🌆",
            HourPersonality::NightOwl => "🦉",
        }
    }
}

/// A single generated insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FunFact {
    /// Text written in comments and articles, expressed in book pages
    PagesWritten { characters: usize, pages: usize },
    /// Weekday with the most activity
    BusiestWeekday { weekday: u32, events: u64 },
    /// Persona of the busiest hour
    PeakHour {
        hour: u32,
        personality: HourPersonality,
    },
    /// Longest run of consecutive active days
    Streak { days: u32 },
    /// Monthly issue-reporting pace
    IssuePace { per_month: u64, every_days: u64 },
}

impl FunFact {
    pub fn emoji(&self) -> &'static str {
        match self {
            FunFact::PagesWritten { .. } => "📚",
            FunFact::BusiestWeekday { .. } => "📅",
            FunFact::PeakHour { personality, .. } => personality.emoji(),
            FunFact::Streak { .. } => "🔥",
            FunFact::IssuePace { .. } => "📈",
        }
    }

    /// One-line description for display.
    pub fn message(&self) -> String {
        match self {
            FunFact::PagesWritten { characters, pages } => format!(
                "You wrote {} characters, about {} page{} of a book",
                characters,
                pages,
                plural(*pages as u64)
            ),
            FunFact::BusiestWeekday { weekday, events } => format!(
                "{} is your power day with {} contribution{}",
                TimeStats::day_name(*weekday),
                events,
                plural(*events)
            ),
            FunFact::PeakHour { hour, personality } => format!(
                "You're a {}: most active around {}",
                personality.name(),
                TimeStats::hour_display(*hour)
            ),
            FunFact::Streak { days } => {
                format!("Your longest streak was {} days in a row", days)
            }
            FunFact::IssuePace {
                per_month,
                every_days,
            } => format!(
                "You created about {} issue{} a month, one every {} day{}",
                per_month,
                plural(*per_month),
                every_days,
                plural(*every_days)
            ),
        }
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Generate facts in their fixed order.
pub fn generate_fun_facts(
    summary: &Summary,
    comments: &CommentStats,
    articles: &ArticleStats,
    time: &TimeStats,
) -> Vec<FunFact> {
    let mut facts = Vec::new();

    let characters = comments.total_length + articles.total_length;
    let pages = characters / CHARS_PER_PAGE;
    if pages > 0 {
        facts.push(FunFact::PagesWritten { characters, pages });
    }

    if time.total_events > 0 {
        facts.push(FunFact::BusiestWeekday {
            weekday: time.busiest_weekday,
            events: time.by_weekday[time.busiest_weekday as usize],
        });
        facts.push(FunFact::PeakHour {
            hour: time.busiest_hour,
            personality: HourPersonality::from_hour(time.busiest_hour),
        });
    }

    if time.longest_streak.days > 1 {
        facts.push(FunFact::Streak {
            days: time.longest_streak.days,
        });
    }

    let per_month = (summary.issues_created as f64 / 12.0).round() as u64;
    if per_month >= 1 {
        facts.push(FunFact::IssuePace {
            per_month,
            every_days: (30.0 / per_month as f64).round() as u64,
        });
    }

    facts
}
