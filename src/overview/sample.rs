//! Built-in overview dataset

use crate::overview::types::{Alert, Competitor, EmotionScore, OverviewToken, Severity};

fn emotions(values: [u8; 5]) -> Vec<EmotionScore> {
    const PALETTE: [(&str, &str); 5] = [
        ("Joy", "#60a5fa"),
        ("Anger", "#fb7185"),
        ("Sadness", "#94a3b8"),
        ("Surprise", "#34d399"),
        ("Fear", "#fbbf24"),
    ];

    PALETTE
        .iter()
        .zip(values)
        .map(|(&(emotion, color), value)| EmotionScore {
            emotion: emotion.to_string(),
            value,
            color: color.to_string(),
        })
        .collect()
}

fn competitor(name: &str, mentions: u64, sentiment: u8, growth: f64) -> Competitor {
    Competitor {
        name: name.to_string(),
        mentions,
        sentiment,
        growth,
    }
}

fn alert(id: u32, severity: Severity, title: &str, time: &str, message: &str) -> Alert {
    Alert {
        id,
        severity,
        title: title.to_string(),
        time: time.to_string(),
        message: message.to_string(),
    }
}

/// SOL and RUST sample records
pub fn sample_tokens() -> Vec<OverviewToken> {
    vec![
        OverviewToken {
            id: "SOL".to_string(),
            name: "Solana".to_string(),
            mentions: 125_000,
            sentiment: 72,
            total_replies: 4_500,
            total_retweets: 9_800,
            unique_authors: 8_200,
            loyalty_index: 68,
            organic_growth: 12,
            bot_percentage: 4,
            emotions: emotions([55, 8, 7, 20, 10]),
            competitors: vec![
                competitor("ETH", 210_000, 68, -2.1),
                competitor("BTC", 340_000, 62, 1.8),
            ],
            alerts: vec![
                alert(
                    1,
                    Severity::High,
                    "Spike in mentions",
                    "2h ago",
                    "Mentions increased 320% in last hour",
                ),
                alert(
                    2,
                    Severity::Medium,
                    "Negative sentiment rising",
                    "5h ago",
                    "Sentiment dropped by 15% in 24h",
                ),
            ],
        },
        OverviewToken {
            id: "RUST".to_string(),
            name: "RustToken".to_string(),
            mentions: 24_000,
            sentiment: 56,
            total_replies: 480,
            total_retweets: 300,
            unique_authors: 210,
            loyalty_index: 54,
            organic_growth: 6,
            bot_percentage: 10,
            emotions: emotions([35, 15, 8, 30, 12]),
            competitors: Vec::new(),
            alerts: Vec::new(),
        },
    ]
}
