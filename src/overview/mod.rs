//! Static mindshare overview
//!
//! A read-only dashboard over built-in sample data: per-token engagement
//! figures, emotion breakdown, competitors and alerts, with a selected token
//! and an overview/competition/alerts tab.

pub mod sample;
pub mod types;
pub mod view;

pub use sample::sample_tokens;
pub use types::{Alert, Competitor, EmotionScore, OverviewToken, Severity, Trend};
pub use view::{OverviewView, Tab, TabContent};
