//! Mock metric generator
//!
//! Stands in for a real analytics source: every call draws a fresh 7-day
//! series and aggregate figures uniformly from fixed ranges.

use crate::tracker::types::{DailySample, Tenths, TrackedToken, WEEK};
use rand::Rng;
use std::ops::{Range, RangeInclusive};

/// Daily mention count range
pub const DAILY_MENTIONS: RangeInclusive<u32> = 100..=1099;
/// Daily sentiment score range
pub const DAILY_SENTIMENT: RangeInclusive<u32> = 60..=99;
/// Total mentions range
pub const TOTAL_MENTIONS: RangeInclusive<u32> = 500..=5499;
/// Weekly growth, in tenths of a percent: [-10.0, 30.0)
pub const WEEKLY_GROWTH_TENTHS: Range<i32> = -100..300;
/// Aggregate sentiment, in tenths: [60.0, 90.0)
pub const SENTIMENT_TENTHS: Range<i32> = 600..900;

/// One full set of generated metric fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockMetrics {
    pub series: [DailySample; 7],
    pub total_mentions: u32,
    pub weekly_growth: Tenths,
    pub sentiment: Tenths,
}

impl MockMetrics {
    /// Generate from the thread-local RNG
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generate from a caller-supplied RNG
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let series = WEEK.map(|day| DailySample {
            day,
            mentions: rng.gen_range(DAILY_MENTIONS),
            sentiment: rng.gen_range(DAILY_SENTIMENT),
        });

        Self {
            series,
            total_mentions: rng.gen_range(TOTAL_MENTIONS),
            weekly_growth: Tenths(rng.gen_range(WEEKLY_GROWTH_TENTHS)),
            sentiment: Tenths(rng.gen_range(SENTIMENT_TENTHS)),
        }
    }

    /// Overwrite every metric field of `token` at once
    pub fn apply_to(self, token: &mut TrackedToken) {
        token.mindshare_data = self.series;
        token.total_mentions = self.total_mentions;
        token.weekly_growth = self.weekly_growth;
        token.sentiment = self.sentiment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let m = MockMetrics::generate_with(&mut rng);

            for (sample, day) in m.series.iter().zip(WEEK) {
                assert_eq!(sample.day, day);
                assert!(DAILY_MENTIONS.contains(&sample.mentions));
                assert!(DAILY_SENTIMENT.contains(&sample.sentiment));
            }
            assert!(TOTAL_MENTIONS.contains(&m.total_mentions));
            assert!(m.weekly_growth.as_f64() >= -10.0 && m.weekly_growth.as_f64() < 30.0);
            assert!(m.sentiment.as_f64() >= 60.0 && m.sentiment.as_f64() < 90.0);
        }
    }

    #[test]
    fn test_growth_can_be_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        let any_negative = (0..200)
            .map(|_| MockMetrics::generate_with(&mut rng))
            .any(|m| m.weekly_growth.0 < 0);
        assert!(any_negative);
    }

    #[test]
    fn test_apply_replaces_all_metrics() {
        let mut token = crate::tracker::types::test_token(1, "BONK", "Addr123");
        let before = token.clone();
        let metrics = MockMetrics::generate_with(&mut StdRng::seed_from_u64(1));

        metrics.clone().apply_to(&mut token);

        assert_eq!(token.id, before.id);
        assert_eq!(token.name, before.name);
        assert_eq!(token.address, before.address);
        assert_eq!(token.added_at, before.added_at);
        assert_eq!(token.mindshare_data, metrics.series);
        assert_eq!(token.total_mentions, metrics.total_mentions);
        assert_eq!(token.weekly_growth, metrics.weekly_growth);
        assert_eq!(token.sentiment, metrics.sentiment);
    }
}
