//! Token tracker
//!
//! User-managed watchlist of tokens with mock mindshare metrics:
//!
//! - **types**: `TrackedToken`, `DailySample`, `Tenths`, `TokenDraft`
//! - **generator**: random metric generation
//! - **state**: explicit state plus the pure reducer
//! - **controller**: `Tracker`, which owns state and persists it
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use mindshare::store::{MemoryBackend, TokenStore};
//! use mindshare::tracker::{Outcome, TokenDraft, Tracker, TrackerSettings};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TokenStore::new(Arc::new(MemoryBackend::new()));
//!     let mut tracker = Tracker::open(store, TrackerSettings::default()).await;
//!
//!     if let Outcome::Added(id) = tracker.add_token(TokenDraft::new("BONK", "Addr123")).await? {
//!         tracker.refresh_token(id).await?;
//!     }
//!
//!     println!("Tracking {} tokens", tracker.tokens().len());
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod error;
pub mod generator;
pub mod state;
pub mod types;

pub use controller::{Tracker, TrackerSettings, WriteFailurePolicy};
pub use error::{TrackerError, TrackerResult};
pub use generator::MockMetrics;
pub use state::{reduce, search, Action, AddForm, Effect, Notice, Outcome, SyncStatus, TrackerState, Transition};
pub use types::{DailySample, Tenths, TokenDraft, TokenId, TrackedToken, WEEK};
