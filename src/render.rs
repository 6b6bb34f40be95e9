//! Plain-text rendering
//!
//! Turns tracker and overview state into the tables and panels printed by
//! the CLI and the interactive shell.

use crate::overview::{OverviewView, Severity, Tab, TabContent};
use crate::tracker::{TokenId, TrackedToken};
use std::fmt::Write;

const BAR_WIDTH: u64 = 30;

/// Group digits by thousands: 125000 -> "125,000"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn signed_percent(value: impl std::fmt::Display, negative: bool) -> String {
    if negative {
        format!("{}%", value)
    } else {
        format!("+{}%", value)
    }
}

/// One row per token, `*` marks the selection
pub fn token_table(tokens: &[&TrackedToken], selected: Option<TokenId>) -> String {
    if tokens.is_empty() {
        return "No tokens tracked.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<15} {:<16} {:<24} {:>10} {:>9} {:>9}",
        "ID", "Name", "Address", "Mentions", "Growth", "Sentiment"
    );
    let _ = writeln!(out, "  {}", "-".repeat(88));

    for token in tokens {
        let marker = if Some(token.id) == selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<15} {:<16} {:<24} {:>10} {:>9} {:>9}",
            marker,
            token.id,
            truncate(&token.name, 16),
            truncate(&token.address, 24),
            format_count(token.total_mentions as u64),
            signed_percent(token.weekly_growth, token.weekly_growth.0 < 0),
            token.sentiment,
        );
    }
    out
}

/// Full card for one token including its 7-day series
pub fn token_detail(token: &TrackedToken) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", token.name, token.id);
    let _ = writeln!(out, "  Address:        {}", token.address);
    let _ = writeln!(
        out,
        "  Added:          {}",
        token.added_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "  Total mentions: {}",
        format_count(token.total_mentions as u64)
    );
    let _ = writeln!(
        out,
        "  Weekly growth:  {}",
        signed_percent(token.weekly_growth, token.weekly_growth.0 < 0)
    );
    let _ = writeln!(out, "  Sentiment:      {}", token.sentiment);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Day  Mentions  Sentiment");

    let peak = token
        .mindshare_data
        .iter()
        .map(|d| d.mentions as u64)
        .max()
        .unwrap_or(0)
        .max(1);
    for sample in &token.mindshare_data {
        let bar = "#".repeat((sample.mentions as u64 * BAR_WIDTH / peak) as usize);
        let _ = writeln!(
            out,
            "  {:<4} {:>8}  {:>9}  {}",
            sample.day.to_string(),
            format_count(sample.mentions as u64),
            sample.sentiment,
            bar
        );
    }
    out
}

/// Sidebar, summary, cards and the active tab of the static overview
pub fn overview(view: &OverviewView) -> String {
    let token = view.selected_token();
    let mut out = String::new();

    let _ = writeln!(out, "Tokens");
    for t in view.tokens() {
        let marker = if view.is_selected(t) { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<6} {:<12} {:>10}",
            marker,
            t.id,
            t.name,
            format_count(t.mentions)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", token.name);
    let _ = writeln!(
        out,
        "  Replies: {}  Retweets: {}  Authors: {}  Sentiment: {}%",
        format_count(token.total_replies),
        format_count(token.total_retweets),
        format_count(token.unique_authors),
        token.sentiment
    );
    let _ = writeln!(
        out,
        "  Loyalty index: {}%  Organic growth: {}%  Bot activity: {}%",
        token.loyalty_index, token.organic_growth, token.bot_percentage
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Emotion analysis");
    for emotion in &token.emotions {
        let _ = writeln!(
            out,
            "  {:<9} {:>3}% {}",
            emotion.emotion,
            emotion.value,
            "#".repeat(emotion.value as usize / 2)
        );
    }
    let _ = writeln!(out);

    let tabs: Vec<String> = Tab::all()
        .iter()
        .map(|tab| {
            if *tab == view.tab() {
                format!("[{}]", tab)
            } else {
                tab.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    match view.tab_content() {
        TabContent::Overview(t) => {
            let _ = writeln!(out, "  Overview content for {}", t.name);
        }
        TabContent::Competition([]) => {
            let _ = writeln!(out, "  No competitors data");
        }
        TabContent::Competition(competitors) => {
            for comp in competitors {
                let _ = writeln!(
                    out,
                    "  {:<6} {} {}%  Mentions: {} · Sentiment: {}%",
                    comp.name,
                    comp.trend().arrow(),
                    comp.growth,
                    format_count(comp.mentions),
                    comp.sentiment
                );
            }
        }
        TabContent::Alerts([]) => {
            let _ = writeln!(out, "  No alerts");
        }
        TabContent::Alerts(alerts) => {
            for alert in alerts {
                let level = match alert.severity {
                    Severity::High => "HIGH",
                    Severity::Medium => "MEDIUM",
                };
                let _ = writeln!(
                    out,
                    "  [{}] {} ({}) - {}",
                    level, alert.title, alert.time, alert.message
                );
            }
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
