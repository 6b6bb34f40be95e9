//! Tracker controller
//!
//! Owns the single `TrackerState`, feeds actions through the reducer and
//! runs the persistence effect. A mutation is only committed after its
//! write has been awaited; what happens when the write keeps failing is
//! decided by [`WriteFailurePolicy`].

use crate::store::{StoreResult, TokenStore};
use crate::tracker::error::{TrackerError, TrackerResult};
use crate::tracker::generator::MockMetrics;
use crate::tracker::state::{reduce, search, Action, Effect, Notice, Outcome, SyncStatus, TrackerState, Transition};
use crate::tracker::types::{TokenDraft, TokenId, TrackedToken};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What to do with a mutation whose write failed after all retries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Drop the mutation; memory stays equal to the store
    #[default]
    Rollback,
    /// Keep the mutation in memory and mark the state dirty
    Keep,
}

impl std::str::FromStr for WriteFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rollback" => Ok(WriteFailurePolicy::Rollback),
            "keep" => Ok(WriteFailurePolicy::Keep),
            other => Err(format!("unknown write failure policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    /// Extra save attempts after the first failure
    pub save_retries: u32,
    pub retry_backoff: Duration,
    pub on_write_failure: WriteFailurePolicy,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            save_retries: 2,
            retry_backoff: Duration::from_millis(50),
            on_write_failure: WriteFailurePolicy::Rollback,
        }
    }
}

/// The token tracker
pub struct Tracker {
    store: TokenStore,
    settings: TrackerSettings,
    state: TrackerState,
}

impl Tracker {
    /// Load the persisted collection once and start tracking
    pub async fn open(store: TokenStore, settings: TrackerSettings) -> Self {
        let tokens = store.load().await;
        tracing::info!(
            "Loaded {} tracked tokens from {} backend",
            tokens.len(),
            store.backend_kind()
        );

        let state = reduce(TrackerState::default(), Action::Loaded(tokens)).state;
        Self {
            store,
            settings,
            state,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn tokens(&self) -> &[TrackedToken] {
        &self.state.tokens
    }

    pub fn token(&self, id: TokenId) -> TrackerResult<&TrackedToken> {
        self.state.token(id).ok_or(TrackerError::TokenNotFound(id))
    }

    pub fn selected_token(&self) -> Option<&TrackedToken> {
        self.state.selected_token()
    }

    /// Filter without touching the stored search term
    pub fn search(&self, term: &str) -> Vec<&TrackedToken> {
        search(&self.state.tokens, term)
    }

    /// Tokens matching the current search term
    pub fn visible_tokens(&self) -> Vec<&TrackedToken> {
        self.state.visible_tokens()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.dispatch_view(Action::Search(term.into()));
    }

    pub fn select(&mut self, id: TokenId) -> Outcome {
        self.dispatch_view(Action::Select(id))
    }

    pub fn clear_selection(&mut self) {
        self.dispatch_view(Action::ClearSelection);
    }

    pub fn open_form(&mut self) {
        self.dispatch_view(Action::OpenForm);
    }

    pub fn close_form(&mut self) {
        self.dispatch_view(Action::CloseForm);
    }

    pub fn edit_name(&mut self, name: impl Into<String>) {
        self.dispatch_view(Action::EditName(name.into()));
    }

    pub fn edit_address(&mut self, address: impl Into<String>) {
        self.dispatch_view(Action::EditAddress(address.into()));
    }

    /// Add the token currently in the form
    pub async fn submit_form(&mut self) -> TrackerResult<Outcome> {
        let draft = self.state.form.draft.clone();
        self.add_token(draft).await
    }

    /// Track a new token with freshly generated metrics
    ///
    /// A draft with a blank name or address is rejected without error.
    pub async fn add_token(&mut self, draft: TokenDraft) -> TrackerResult<Outcome> {
        let action = Action::Add {
            draft,
            added_at: Utc::now(),
            metrics: MockMetrics::generate(),
        };
        self.dispatch(action).await
    }

    /// Stop tracking `id`; unknown ids are a no-op
    pub async fn remove_token(&mut self, id: TokenId) -> TrackerResult<Outcome> {
        self.dispatch(Action::Remove(id)).await
    }

    /// Regenerate every metric of `id`
    pub async fn refresh_token(&mut self, id: TokenId) -> TrackerResult<Outcome> {
        let action = Action::Refresh {
            id,
            metrics: MockMetrics::generate(),
        };
        self.dispatch(action).await
    }

    /// Retry the write of a dirty state
    pub async fn flush(&mut self) -> TrackerResult<()> {
        if self.state.sync == SyncStatus::Synced {
            return Ok(());
        }

        self.save_with_retry(&self.state.tokens).await?;
        self.state.sync = SyncStatus::Synced;
        self.state.notices.push(Notice::Saved);
        tracing::info!("Flushed {} pending tokens", self.state.tokens.len());
        Ok(())
    }

    /// Drain queued notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let notices = self.state.notices.clone();
        self.dispatch_view(Action::DismissNotices);
        notices
    }

    fn dispatch_view(&mut self, action: Action) -> Outcome {
        let transition = reduce(std::mem::take(&mut self.state), action);
        debug_assert_eq!(transition.effect, Effect::None);
        self.state = transition.state;
        transition.outcome
    }

    async fn dispatch(&mut self, action: Action) -> TrackerResult<Outcome> {
        let Transition {
            state: next,
            effect,
            outcome,
        } = reduce(self.state.clone(), action);

        if effect == Effect::None {
            self.state = next;
            return Ok(outcome);
        }

        match self.save_with_retry(&next.tokens).await {
            Ok(()) => {
                let was_dirty = self.state.sync == SyncStatus::Dirty;
                self.state = next;
                self.state.sync = SyncStatus::Synced;
                if was_dirty {
                    self.state.notices.push(Notice::Saved);
                }
                tracing::debug!("Committed {:?}", outcome);
                Ok(outcome)
            }
            Err(e) => {
                let kept = self.settings.on_write_failure == WriteFailurePolicy::Keep;
                tracing::warn!("Could not persist {:?}: {} (kept: {})", outcome, e, kept);

                if kept {
                    self.state = next;
                    self.state.sync = SyncStatus::Dirty;
                }
                self.state.notices.push(Notice::SaveFailed {
                    reason: e.to_string(),
                    kept,
                });
                Err(TrackerError::Persist(e))
            }
        }
    }

    async fn save_with_retry(&self, tokens: &[TrackedToken]) -> StoreResult<()> {
        let mut attempt = 0;
        loop {
            match self.store.save(tokens).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.settings.save_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Save attempt {} failed: {}; retrying in {:?}",
                        attempt,
                        e,
                        self.settings.retry_backoff
                    );
                    tokio::time::sleep(self.settings.retry_backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
