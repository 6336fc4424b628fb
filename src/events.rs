use crate::model::Country;

/// A single user interaction, routed through `AppState::dispatch`.
#[derive(Debug, Clone)]
pub enum Event {
    /// Free text typed after the launcher keyword.
    Query(String),
    /// The user activated a result row.
    Select(Selection),
    /// The launcher keyword preference changed.
    SetKeyword(String),
}

#[derive(Debug, Clone)]
pub enum Selection {
    /// Connect to the country with this id.
    Country(String),
    Disconnect,
}

/// What the front end should render for a dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Top-level menu: a connect hint (using the current keyword) and a
    /// disconnect row.
    Menu { keyword: String },
    /// Ranked country rows for a connect query.
    Candidates(Vec<Row>),
    /// Approximate matching is not available in this build.
    RankingUnavailable,
    /// The nordvpn binary was not found on this system.
    CliMissing,
    /// The event was handled; nothing to render.
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub label: String,
    pub icon: String,
}

impl From<&Country> for Row {
    fn from(country: &Country) -> Self {
        Row {
            id: country.id.clone(),
            label: country.label.clone(),
            icon: country.icon_ref(),
        }
    }
}
