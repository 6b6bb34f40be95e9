//! Overview view model
//!
//! Selection and tab state over a fixed, read-only dataset.

use crate::overview::sample::sample_tokens;
use crate::overview::types::{Alert, Competitor, OverviewToken};

/// Which sub-list the overview shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Overview,
    Competition,
    Alerts,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Overview, Tab::Competition, Tab::Alerts]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Overview => write!(f, "overview"),
            Tab::Competition => write!(f, "competition"),
            Tab::Alerts => write!(f, "alerts"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Tab::Overview),
            "competition" => Ok(Tab::Competition),
            "alerts" => Ok(Tab::Alerts),
            other => Err(format!(
                "unknown tab '{}' (expected overview, competition or alerts)",
                other
            )),
        }
    }
}

/// What the active tab renders
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabContent<'a> {
    Overview(&'a OverviewToken),
    Competition(&'a [Competitor]),
    Alerts(&'a [Alert]),
}

impl TabContent<'_> {
    /// True for a list tab with nothing in it
    pub fn is_empty(&self) -> bool {
        match self {
            TabContent::Overview(_) => false,
            TabContent::Competition(list) => list.is_empty(),
            TabContent::Alerts(list) => list.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverviewView {
    tokens: Vec<OverviewToken>,
    selected_id: String,
    tab: Tab,
}

impl Default for OverviewView {
    fn default() -> Self {
        // The sample dataset is never empty
        let tokens = sample_tokens();
        let selected_id = tokens[0].id.clone();
        Self {
            tokens,
            selected_id,
            tab: Tab::default(),
        }
    }
}

impl OverviewView {
    /// View over `tokens`, selecting the first; `None` if there are none
    pub fn new(tokens: Vec<OverviewToken>) -> Option<Self> {
        let selected_id = tokens.first()?.id.clone();
        Some(Self {
            tokens,
            selected_id,
            tab: Tab::default(),
        })
    }

    pub fn tokens(&self) -> &[OverviewToken] {
        &self.tokens
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Select by id; returns whether the id exists
    ///
    /// Unknown ids are remembered but resolve to the first token.
    pub fn select(&mut self, id: impl Into<String>) -> bool {
        self.selected_id = id.into();
        self.tokens.iter().any(|t| t.id == self.selected_id)
    }

    pub fn is_selected(&self, token: &OverviewToken) -> bool {
        token.id == self.selected_token().id
    }

    pub fn selected_token(&self) -> &OverviewToken {
        self.tokens
            .iter()
            .find(|t| t.id == self.selected_id)
            .unwrap_or(&self.tokens[0])
    }

    pub fn tab_content(&self) -> TabContent<'_> {
        let token = self.selected_token();
        match self.tab {
            Tab::Overview => TabContent::Overview(token),
            Tab::Competition => TabContent::Competition(&token.competitors),
            Tab::Alerts => TabContent::Alerts(&token.alerts),
        }
    }
}
