//! # Mindshare
//!
//! Token mindshare tracker - a watchlist of crypto tokens with mock mention,
//! sentiment and growth metrics, persisted to a key-value store, plus a
//! static overview of sample engagement data.
//!
//! ## Modules
//!
//! - [`tracker`]: tracked tokens, the reducer and the `Tracker` controller
//! - [`store`]: key-value backends and versioned token persistence
//! - [`overview`]: read-only sample dashboard with tabs
//! - [`render`] / [`shell`]: text output and the interactive shell
//! - [`config`] / [`logging`]: ambient setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mindshare::store::{select_backend, BackendKind, TokenStore};
//! use mindshare::tracker::{TokenDraft, Tracker, TrackerSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = select_backend(&[BackendKind::File, BackendKind::Memory], "./data").await?;
//!     let mut tracker = Tracker::open(TokenStore::new(backend), TrackerSettings::default()).await;
//!
//!     tracker.add_token(TokenDraft::new("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263")).await?;
//!
//!     for token in tracker.search("bonk") {
//!         println!("{} mentions: {}", token.name, token.total_mentions);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod logging;
pub mod overview;
pub mod render;
pub mod shell;
pub mod store;
pub mod tracker;

// Re-export top-level types for convenience
pub use store::{
    select_backend, BackendKind, FileBackend, KvBackend, MemoryBackend, StoreError, StoreResult,
    TokenStore,
};

pub use tracker::{
    MockMetrics, Notice, Outcome, Tenths, TokenDraft, TokenId, TrackedToken, Tracker,
    TrackerError, TrackerSettings, TrackerState, WriteFailurePolicy,
};

pub use overview::{OverviewToken, OverviewView, Tab, TabContent};

pub use config::{generate_default_config, Config, ConfigError, LogFormat, LoggingConfig, StorageConfig};
