//! Report rendering: boxed terminal view, Markdown and JSON.

use std::fmt::{self, Write};

use yeartrack_core::analytics::TimeStats;
use yeartrack_core::StatisticsReport;

const BOX_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 60;
const TOP_PROJECTS: usize = 3;

fn title(report: &StatisticsReport, fun_mode: bool) -> String {
    if fun_mode {
        format!("🎉 YOUR {} TRACKER WRAPPED 🎉", report.year)
    } else {
        format!("Issue Tracker Summary: {}", report.year)
    }
}

fn heading(fun_mode: bool, emoji: &str, text: &str) -> String {
    if fun_mode {
        format!("{} {}", emoji, text)
    } else {
        text.to_string()
    }
}

/// Single-line preview of free text, cut on a character boundary.
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    }
}

fn rank_marker(index: usize, fun_mode: bool) -> String {
    match (fun_mode, index) {
        (true, 0) => "🥇".to_string(),
        (true, 1) => "🥈".to_string(),
        (true, 2) => "🥉".to_string(),
        _ => format!("{}.", index + 1),
    }
}

pub fn terminal(report: &StatisticsReport, fun_mode: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out)?;
    writeln!(out, "╭{}╮", "─".repeat(BOX_WIDTH))?;
    writeln!(out, "│{:^width$}│", title(report, fun_mode), width = BOX_WIDTH)?;
    writeln!(
        out,
        "│{:^width$}│",
        report.user.display_name(),
        width = BOX_WIDTH
    )?;
    writeln!(out, "╰{}╯", "─".repeat(BOX_WIDTH))?;
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "  No activity found for {}.", report.year)?;
        writeln!(out)?;
        return Ok(out);
    }

    let summary = &report.summary;
    writeln!(out, "{}", heading(fun_mode, "📊", "THE NUMBERS"))?;
    writeln!(
        out,
        "   Created:  {:<12} Resolved: {}",
        summary.issues_created, summary.issues_resolved
    )?;
    writeln!(
        out,
        "   Comments: {:<12} Articles: {}",
        summary.comments, summary.articles
    )?;
    writeln!(out, "   Total contributions: {}", summary.total_contributions)?;
    writeln!(out)?;

    let issues = &report.issue_stats;
    if summary.issues_created > 0 {
        writeln!(out, "{}", heading(fun_mode, "🐛", "ISSUES"))?;
        if issues.resolved_with_time > 0 {
            writeln!(
                out,
                "   Average resolution: {} ({} resolved)",
                issues.avg_resolution_display(),
                issues.resolved_with_time
            )?;
        }
        if let Some(longest) = &issues.longest_issue {
            writeln!(
                out,
                "   Wordiest summary:   {} \"{}\"",
                longest.id_readable,
                preview(&longest.summary)
            )?;
        }
        if let Some(shortest) = &issues.shortest_issue {
            writeln!(
                out,
                "   Tersest summary:    {} \"{}\"",
                shortest.id_readable,
                preview(&shortest.summary)
            )?;
        }
        writeln!(out)?;
    }

    let comments = &report.comment_stats;
    if comments.total > 0 {
        writeln!(out, "{}", heading(fun_mode, "💬", "COMMENTS"))?;
        writeln!(
            out,
            "   Written: {:<13} Average length: {} chars",
            comments.total, comments.average_length
        )?;
        if let Some(issue) = &comments.most_commented_issue {
            writeln!(
                out,
                "   Most discussed: {} ({} comments)",
                issue.id_readable, issue.comment_count
            )?;
        }
        if let Some(longest) = &comments.longest {
            writeln!(
                out,
                "   Longest: {} chars on {}",
                longest.length, longest.issue_id
            )?;
        }
        writeln!(out)?;
    }

    let articles = &report.article_stats;
    if articles.total > 0 {
        writeln!(out, "{}", heading(fun_mode, "📄", "ARTICLES"))?;
        writeln!(
            out,
            "   Published: {:<11} Average length: {} chars",
            articles.total, articles.average_length
        )?;
        if let Some(longest) = &articles.longest {
            writeln!(
                out,
                "   Longest: {} \"{}\" ({} chars)",
                longest.id_readable,
                preview(&longest.summary),
                longest.length
            )?;
        }
        writeln!(out)?;
    }

    let projects = &report.project_stats.projects;
    if !projects.is_empty() {
        writeln!(out, "{}", heading(fun_mode, "📁", "TOP PROJECTS"))?;
        for (i, project) in projects.iter().take(TOP_PROJECTS).enumerate() {
            writeln!(
                out,
                "   {} {:<24} {:>5} contributions",
                rank_marker(i, fun_mode),
                project.name,
                project.total_activity
            )?;
        }
        writeln!(out)?;
    }

    let time = &report.time_stats;
    if time.total_events > 0 {
        writeln!(out, "{}", heading(fun_mode, "⏰", "TIME PATTERNS"))?;
        writeln!(
            out,
            "   Busiest month: {:<10} Busiest day: {}",
            TimeStats::month_name(time.busiest_month),
            TimeStats::day_name(time.busiest_weekday)
        )?;
        writeln!(
            out,
            "   Peak hour: {}",
            TimeStats::hour_display(time.busiest_hour)
        )?;
        writeln!(out)?;

        writeln!(out, "{}", heading(fun_mode, "🔥", "STREAKS"))?;
        writeln!(out, "   Active days: {}", time.active_days)?;
        let streak = &time.longest_streak;
        match (streak.start_date, streak.end_date) {
            (Some(start), Some(end)) if streak.days > 1 => writeln!(
                out,
                "   Longest streak: {} days ({} to {})",
                streak.days,
                start.format("%b %-d"),
                end.format("%b %-d")
            )?,
            _ => writeln!(out, "   Longest streak: {} day", streak.days)?,
        }
        writeln!(out)?;
    }

    if fun_mode && !report.fun_facts.is_empty() {
        writeln!(out, "✨ FUN FACTS")?;
        for fact in &report.fun_facts {
            writeln!(out, "   {} {}", fact.emoji(), fact.message())?;
        }
        writeln!(out)?;
    }

    if fun_mode && !report.achievements.is_empty() {
        writeln!(out, "🏅 ACHIEVEMENTS")?;
        for achievement in &report.achievements {
            writeln!(
                out,
                "   {} {:<20} {}",
                achievement.emoji, achievement.name, achievement.description
            )?;
        }
        writeln!(out)?;
    }

    Ok(out)
}

pub fn markdown(report: &StatisticsReport, fun_mode: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "# {}", title(report, fun_mode))?;
    writeln!(out)?;
    writeln!(out, "**{}** (@{})", report.user.display_name(), report.user.login)?;
    writeln!(out)?;

    if report.is_empty() {
        writeln!(out, "*No activity found for {}.*", report.year)?;
        return Ok(out);
    }

    let summary = &report.summary;
    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|--------|-------|")?;
    writeln!(out, "| Issues Created | {} |", summary.issues_created)?;
    writeln!(out, "| Issues Resolved | {} |", summary.issues_resolved)?;
    writeln!(out, "| Comments | {} |", summary.comments)?;
    writeln!(out, "| Articles | {} |", summary.articles)?;
    writeln!(out, "| Total Contributions | {} |", summary.total_contributions)?;
    if report.issue_stats.resolved_with_time > 0 {
        writeln!(
            out,
            "| Avg Resolution | {} |",
            report.issue_stats.avg_resolution_display()
        )?;
    }
    writeln!(out)?;

    let projects = &report.project_stats.projects;
    if !projects.is_empty() {
        writeln!(out, "## Projects")?;
        writeln!(out)?;
        writeln!(out, "| Project | Created | Resolved | Comments | Total |")?;
        writeln!(out, "|---------|---------|----------|----------|-------|")?;
        for project in projects {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                project.name,
                project.issues_created,
                project.issues_resolved,
                project.comments,
                project.total_activity
            )?;
        }
        writeln!(out)?;
    }

    let time = &report.time_stats;
    if time.total_events > 0 {
        writeln!(out, "## Time Patterns")?;
        writeln!(out)?;
        writeln!(
            out,
            "- **Busiest month:** {}",
            TimeStats::month_name(time.busiest_month)
        )?;
        writeln!(
            out,
            "- **Busiest day:** {}",
            TimeStats::day_name(time.busiest_weekday)
        )?;
        writeln!(
            out,
            "- **Peak hour:** {}",
            TimeStats::hour_display(time.busiest_hour)
        )?;
        writeln!(out, "- **Active days:** {}", time.active_days)?;
        writeln!(
            out,
            "- **Longest streak:** {} days",
            time.longest_streak.days
        )?;
        writeln!(out)?;
    }

    if fun_mode && !report.fun_facts.is_empty() {
        writeln!(out, "## Fun Facts")?;
        writeln!(out)?;
        for fact in &report.fun_facts {
            writeln!(out, "- {} {}", fact.emoji(), fact.message())?;
        }
        writeln!(out)?;
    }

    if fun_mode && !report.achievements.is_empty() {
        writeln!(out, "## Achievements")?;
        writeln!(out)?;
        for achievement in &report.achievements {
            writeln!(
                out,
                "- {} **{}**: {}",
                achievement.emoji, achievement.name, achievement.description
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out, "*Generated by yeartrack-wrapped*")?;

    Ok(out)
}

pub fn json(report: &StatisticsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
