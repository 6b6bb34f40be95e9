//! Rich token records for the static overview

use serde::{Deserialize, Serialize};

/// Share of mentions carrying one emotion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmotionScore {
    pub emotion: String,
    /// Percentage, 0..=100
    pub value: u8,
    /// Display color as a hex string
    pub color: String,
}

/// Direction of a competitor's growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competitor {
    pub name: String,
    pub mentions: u64,
    pub sentiment: u8,
    /// Percent change, may be negative
    pub growth: f64,
}

impl Competitor {
    pub fn trend(&self) -> Trend {
        if self.growth >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub id: u32,
    pub severity: Severity,
    pub title: String,
    /// Relative time label, e.g. "2h ago"
    pub time: String,
    pub message: String,
}

/// A token as shown on the static overview
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewToken {
    pub id: String,
    pub name: String,
    pub mentions: u64,
    pub sentiment: u8,
    pub total_replies: u64,
    pub total_retweets: u64,
    pub unique_authors: u64,
    pub loyalty_index: u8,
    pub organic_growth: u8,
    pub bot_percentage: u8,
    pub emotions: Vec<EmotionScore>,
    pub competitors: Vec<Competitor>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(growth: f64) -> Competitor {
        Competitor {
            name: "ETH".to_string(),
            mentions: 210_000,
            sentiment: 68,
            growth,
        }
    }

    #[test]
    fn test_competitor_trend() {
        assert_eq!(competitor(1.8).trend(), Trend::Up);
        assert_eq!(competitor(0.0).trend(), Trend::Up);
        assert_eq!(competitor(-2.1).trend(), Trend::Down);
        assert_eq!(Trend::Down.arrow(), "↘");
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let s: Severity = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(s, Severity::Medium);
    }
}
