//! Tracker state and reducer
//!
//! All tracker state lives in one `TrackerState` value. Changes go through
//! [`reduce`], a pure `(state, action) -> transition` function; randomness
//! and the clock are supplied inside the action so the reducer itself stays
//! deterministic. Persistence is requested through [`Effect::Persist`] and
//! carried out by the controller.

use crate::tracker::generator::MockMetrics;
use crate::tracker::types::{assign_unique_ids, TokenDraft, TokenId, TrackedToken};
use chrono::{DateTime, Utc};

/// Add-token form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub open: bool,
    pub draft: TokenDraft,
}

/// Whether the persisted mirror matches the in-memory collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Synced,
    /// A mutation was kept after its write failed
    Dirty,
}

/// Non-blocking message for the surface to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Saving failed; `kept` tells whether the change stayed in memory
    SaveFailed { reason: String, kept: bool },
    /// A previously failed save went through
    Saved,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::SaveFailed { reason, kept: true } => {
                write!(f, "Changes not saved ({}); kept locally, run flush to retry", reason)
            }
            Notice::SaveFailed { reason, kept: false } => {
                write!(f, "Changes not saved ({}); change discarded", reason)
            }
            Notice::Saved => write!(f, "Pending changes saved"),
        }
    }
}

/// Everything the tracker view needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub tokens: Vec<TrackedToken>,
    /// Selected token, held by id so it always resolves to the current record
    pub selected: Option<TokenId>,
    pub search: String,
    pub form: AddForm,
    pub sync: SyncStatus,
    pub notices: Vec<Notice>,
}

impl TrackerState {
    pub fn with_tokens(tokens: Vec<TrackedToken>) -> Self {
        Self {
            tokens,
            ..Default::default()
        }
    }

    pub fn token(&self, id: TokenId) -> Option<&TrackedToken> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn selected_token(&self) -> Option<&TrackedToken> {
        self.selected.and_then(|id| self.token(id))
    }

    /// Tokens matching the current search term
    pub fn visible_tokens(&self) -> Vec<&TrackedToken> {
        search(&self.tokens, &self.search)
    }
}

/// Case-insensitive substring filter over name or address
///
/// An empty term matches every token.
pub fn search<'a>(tokens: &'a [TrackedToken], term: &str) -> Vec<&'a TrackedToken> {
    let needle = term.to_lowercase();
    tokens.iter().filter(|t| t.matches(&needle)).collect()
}

/// Everything that can happen to the tracker
#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the collection with what the store returned
    Loaded(Vec<TrackedToken>),
    OpenForm,
    CloseForm,
    EditName(String),
    EditAddress(String),
    Add {
        draft: TokenDraft,
        added_at: DateTime<Utc>,
        metrics: MockMetrics,
    },
    Remove(TokenId),
    Refresh {
        id: TokenId,
        metrics: MockMetrics,
    },
    Select(TokenId),
    ClearSelection,
    Search(String),
    DismissNotices,
}

/// Side effect the controller must run before committing the new state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Write the full collection to the store
    Persist,
}

/// What an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Added(TokenId),
    Removed(TokenId),
    Refreshed(TokenId),
    /// Add with a blank name or address
    Rejected,
    /// Remove/refresh/select of an id that is not tracked
    NotFound(TokenId),
    /// View-only change (selection, search, form)
    Updated,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: TrackerState,
    pub effect: Effect,
    pub outcome: Outcome,
}

impl Transition {
    fn view(state: TrackerState, outcome: Outcome) -> Self {
        Self {
            state,
            effect: Effect::None,
            outcome,
        }
    }

    fn persist(state: TrackerState, outcome: Outcome) -> Self {
        Self {
            state,
            effect: Effect::Persist,
            outcome,
        }
    }
}

/// Apply `action` to `state`
pub fn reduce(mut state: TrackerState, action: Action) -> Transition {
    match action {
        Action::Loaded(mut tokens) => {
            assign_unique_ids(&mut tokens);
            state.tokens = tokens;
            if state.selected_token().is_none() {
                state.selected = None;
            }
            state.sync = SyncStatus::Synced;
            Transition::view(state, Outcome::Updated)
        }

        Action::OpenForm => {
            state.form.open = true;
            Transition::view(state, Outcome::Updated)
        }

        Action::CloseForm => {
            state.form = AddForm::default();
            Transition::view(state, Outcome::Updated)
        }

        Action::EditName(name) => {
            state.form.draft.name = name;
            Transition::view(state, Outcome::Updated)
        }

        Action::EditAddress(address) => {
            state.form.draft.address = address;
            Transition::view(state, Outcome::Updated)
        }

        Action::Add {
            draft,
            added_at,
            metrics,
        } => {
            if !draft.is_complete() {
                return Transition::view(state, Outcome::Rejected);
            }

            let id = TokenId::next(added_at, &state.tokens);
            state.tokens.push(TrackedToken {
                id,
                name: draft.name,
                address: draft.address,
                added_at,
                mindshare_data: metrics.series,
                total_mentions: metrics.total_mentions,
                weekly_growth: metrics.weekly_growth,
                sentiment: metrics.sentiment,
            });
            state.form = AddForm::default();
            Transition::persist(state, Outcome::Added(id))
        }

        Action::Remove(id) => {
            let before = state.tokens.len();
            state.tokens.retain(|t| t.id != id);
            if state.tokens.len() == before {
                return Transition::view(state, Outcome::NotFound(id));
            }

            if state.selected == Some(id) {
                state.selected = None;
            }
            Transition::persist(state, Outcome::Removed(id))
        }

        Action::Refresh { id, metrics } => match state.tokens.iter().position(|t| t.id == id) {
            Some(index) => {
                metrics.apply_to(&mut state.tokens[index]);
                Transition::persist(state, Outcome::Refreshed(id))
            }
            None => Transition::view(state, Outcome::NotFound(id)),
        },

        Action::Select(id) => {
            if state.token(id).is_none() {
                return Transition::view(state, Outcome::NotFound(id));
            }
            state.selected = Some(id);
            Transition::view(state, Outcome::Updated)
        }

        Action::ClearSelection => {
            state.selected = None;
            Transition::view(state, Outcome::Updated)
        }

        Action::Search(term) => {
            state.search = term;
            Transition::view(state, Outcome::Updated)
        }

        Action::DismissNotices => {
            state.notices.clear();
            Transition::view(state, Outcome::Updated)
        }
    }
}
