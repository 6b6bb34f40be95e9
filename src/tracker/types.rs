//! Core data types for the token tracker
//!
//! - `TrackedToken`: a user-added token and its latest mock metrics
//! - `DailySample`: one day of the 7-day mindshare series
//! - `Tenths`: a one-decimal value stored exactly
//! - `TokenDraft`: the name/address pair a user submits

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// Days of the mindshare series, in display order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Unique token identifier, derived from the creation time in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TokenId(pub i64);

impl TokenId {
    /// Id for a token created at `added_at`, strictly above every id in `existing`
    ///
    /// If the largest existing id is `i64::MAX` there is nothing above it,
    /// so the smallest unused non-negative id is returned instead.
    pub fn next(added_at: DateTime<Utc>, existing: &[TrackedToken]) -> Self {
        let candidate = added_at.timestamp_millis();
        match existing.iter().map(|t| t.id.0).max() {
            None => TokenId(candidate),
            Some(max) => match max.checked_add(1) {
                Some(floor) => TokenId(candidate.max(floor)),
                None => Self::lowest_unused(existing),
            },
        }
    }

    fn lowest_unused(existing: &[TrackedToken]) -> Self {
        let used: HashSet<i64> = existing.iter().map(|t| t.id.0).collect();
        (0..=i64::MAX)
            .find(|id| !used.contains(id))
            .map(TokenId)
            .unwrap_or(TokenId(0))
    }
}

/// Give every token after the first holder of an id a fresh one
///
/// Returns how many tokens were re-keyed. Order is kept.
pub fn assign_unique_ids(tokens: &mut [TrackedToken]) -> usize {
    let mut seen = HashSet::with_capacity(tokens.len());
    let mut rekeyed = 0;
    for i in 0..tokens.len() {
        if seen.insert(tokens[i].id) {
            continue;
        }
        let id = TokenId::next(tokens[i].added_at, tokens);
        tokens[i].id = id;
        seen.insert(id);
        rekeyed += 1;
    }
    rekeyed
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl std::str::FromStr for TokenId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TokenId)
    }
}

/// A decimal with exactly one fractional digit, kept as a count of tenths
///
/// Serialized as a string such as `"-3.4"` so persisted values read back
/// bit-for-bit. Numbers are accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(pub i32);

impl Tenths {
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }

    /// Round an arbitrary float to the nearest tenth
    pub fn from_f64(value: f64) -> Self {
        Tenths((value * 10.0).round() as i32)
    }
}

impl std::fmt::Display for Tenths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        f.pad(&format!("{}{}.{}", sign, abs / 10, abs % 10))
    }
}

impl std::str::FromStr for Tenths {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid decimal '{}'", s))?;
        if !value.is_finite() {
            return Err(format!("invalid decimal '{}'", s));
        }
        Ok(Tenths::from_f64(value))
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tenths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(Tenths::from_f64(n)),
        }
    }
}

/// One day of mock mindshare activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySample {
    /// Weekday label ("Mon" .. "Sun")
    pub day: Weekday,
    pub mentions: u32,
    /// Sentiment score in [60, 100)
    pub sentiment: u32,
}

/// A token the user is tracking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedToken {
    pub id: TokenId,
    pub name: String,
    pub address: String,
    pub added_at: DateTime<Utc>,
    /// Always exactly seven days, Mon..Sun
    pub mindshare_data: [DailySample; 7],
    pub total_mentions: u32,
    pub weekly_growth: Tenths,
    pub sentiment: Tenths,
}

impl TrackedToken {
    /// Case-insensitive substring match on name or address
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.address.to_lowercase().contains(needle)
    }

    /// Sum of the seven daily mention counts
    pub fn series_mentions(&self) -> u64 {
        self.mindshare_data.iter().map(|d| d.mentions as u64).sum()
    }
}

/// User input for a new token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDraft {
    pub name: String,
    pub address: String,
}

impl TokenDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Both fields present (non-blank)
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.address.trim().is_empty()
    }
}

/// Fixed-metric token for unit tests across the crate
#[cfg(test)]
pub(crate) fn test_token(id: i64, name: &str, address: &str) -> TrackedToken {
    use chrono::TimeZone;

    TrackedToken {
        id: TokenId(id),
        name: name.to_string(),
        address: address.to_string(),
        added_at: Utc.timestamp_millis_opt(id).unwrap(),
        mindshare_data: WEEK.map(|day| DailySample {
            day,
            mentions: 500,
            sentiment: 75,
        }),
        total_mentions: 1200,
        weekly_growth: Tenths(-34),
        sentiment: Tenths(712),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token(id: i64, name: &str, address: &str) -> TrackedToken {
        test_token(id, name, address)
    }

    // Ids past chrono's millisecond range, with a valid timestamp
    fn token_at_id(id: i64, name: &str) -> TrackedToken {
        TrackedToken {
            id: TokenId(id),
            ..test_token(0, name, name)
        }
    }

    #[test]
    fn test_tenths_display() {
        assert_eq!(Tenths(123).to_string(), "12.3");
        assert_eq!(Tenths(-5).to_string(), "-0.5");
        assert_eq!(Tenths(-100).to_string(), "-10.0");
        assert_eq!(Tenths(0).to_string(), "0.0");
    }

    #[test]
    fn test_display_respects_width() {
        assert_eq!(format!("{:>6}", Tenths(123)), "  12.3");
        assert_eq!(format!("{:<4}|", TokenId(7)), "7   |");
    }

    #[test]
    fn test_tenths_parse() {
        assert_eq!("12.3".parse::<Tenths>().unwrap(), Tenths(123));
        assert_eq!("-0.5".parse::<Tenths>().unwrap(), Tenths(-5));
        assert_eq!("7".parse::<Tenths>().unwrap(), Tenths(70));
        assert!("abc".parse::<Tenths>().is_err());
        assert!("NaN".parse::<Tenths>().is_err());
    }

    #[test]
    fn test_tenths_accepts_number() {
        let value: Tenths = serde_json::from_str("12.34").unwrap();
        assert_eq!(value, Tenths(123));
        let value: Tenths = serde_json::from_str("\"-3.4\"").unwrap();
        assert_eq!(value, Tenths(-34));
    }

    #[test]
    fn test_token_json_layout() {
        let json = serde_json::to_value(token(1700000000000, "BONK", "Addr123")).unwrap();

        assert_eq!(json["id"], 1700000000000i64);
        assert_eq!(json["addedAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["weeklyGrowth"], "-3.4");
        assert_eq!(json["sentiment"], "71.2");
        assert_eq!(json["totalMentions"], 1200);
        assert_eq!(json["mindshareData"][0]["day"], "Mon");
        assert_eq!(json["mindshareData"][6]["day"], "Sun");
        assert_eq!(json["mindshareData"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_series_must_have_seven_days() {
        let mut json = serde_json::to_value(token(1, "A", "B")).unwrap();
        json["mindshareData"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<TrackedToken>(json).is_err());
    }

    #[test]
    fn test_matches_name_or_address() {
        let t = token(1, "Solana", "So11111111111111111111111111111111111111112");
        assert!(t.matches("sol"));
        assert!(t.matches("so111"));
        assert!(!t.matches("bonk"));
    }

    #[test]
    fn test_next_id_is_unique_and_monotonic() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(TokenId::next(now, &[]), TokenId(1_000));

        let existing = vec![token(1_000, "A", "a"), token(999, "B", "b")];
        assert_eq!(TokenId::next(now, &existing), TokenId(1_001));

        let later = Utc.timestamp_millis_opt(5_000).unwrap();
        assert_eq!(TokenId::next(later, &existing), TokenId(5_000));
    }

    #[test]
    fn test_next_id_above_max_id() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let existing = vec![token_at_id(i64::MAX, "A"), token(0, "B", "b")];
        assert_eq!(TokenId::next(now, &existing), TokenId(1));

        let existing = vec![token_at_id(i64::MAX, "A"), token(5, "B", "b")];
        assert_eq!(TokenId::next(now, &existing), TokenId(0));
    }

    #[test]
    fn test_assign_unique_ids() {
        let mut tokens = vec![
            token(1_000, "A", "a"),
            token(1_000, "B", "b"),
            token(7, "C", "c"),
            token(1_000, "D", "d"),
        ];
        assert_eq!(assign_unique_ids(&mut tokens), 2);

        let ids: Vec<i64> = tokens.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1_000, 1_001, 7, 1_002]);
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);

        assert_eq!(assign_unique_ids(&mut tokens), 0);
    }

    #[test]
    fn test_assign_unique_ids_at_max_id() {
        let mut tokens = vec![token_at_id(i64::MAX, "A"), token_at_id(i64::MAX, "B")];
        assert_eq!(assign_unique_ids(&mut tokens), 1);
        assert_eq!(tokens[0].id, TokenId(i64::MAX));
        assert_eq!(tokens[1].id, TokenId(0));
    }

    #[test]
    fn test_draft_completeness() {
        assert!(TokenDraft::new("BONK", "Addr123").is_complete());
        assert!(!TokenDraft::new("", "x").is_complete());
        assert!(!TokenDraft::new("x", "").is_complete());
        assert!(!TokenDraft::new("   ", "x").is_complete());
    }
}
