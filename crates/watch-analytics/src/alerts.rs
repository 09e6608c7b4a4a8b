use watch_types::{Alert, AlertLevel, Strategy, Vault};

use crate::search::{matches_strategy, matches_vault};

#[derive(Debug, Clone, Default)]
pub struct AlertQuery {
    pub term: String,
    /// Only keep subjects with at least one alert of this level.
    pub level: Option<AlertLevel>,
    pub include_dismissed: bool,
}

/// Vault or strategy carrying alerts.
#[derive(Debug, Clone, Copy)]
pub enum AlertSubject<'a> {
    Vault(&'a Vault),
    Strategy(&'a Strategy),
}

impl<'a> AlertSubject<'a> {
    pub fn alerts(&self) -> &'a [Alert] {
        match self {
            Self::Vault(v) => v.alerts.as_slice(),
            Self::Strategy(s) => s.alerts.as_slice(),
        }
    }

    pub fn address(&self) -> &'a str {
        match self {
            Self::Vault(v) => v.address.as_str(),
            Self::Strategy(s) => s.address.as_str(),
        }
    }

    pub fn visible_alerts(&self, include_dismissed: bool) -> impl Iterator<Item = &'a Alert> {
        self.alerts()
            .iter()
            .filter(move |a| a.is_visible(include_dismissed))
    }

    fn passes(&self, query: &AlertQuery) -> bool {
        let mut visible = self.visible_alerts(query.include_dismissed).peekable();
        if visible.peek().is_none() {
            return false;
        }
        match query.level {
            None => true,
            Some(level) => visible.any(|a| a.level == level),
        }
    }
}

/// Vaults and strategies with alerts matching the query, in snapshot order:
/// each vault is followed by its own strategies.
///
/// A subject whose alerts are all dismissed is left out entirely unless
/// `include_dismissed` is set, rather than listed with nothing to show.
pub fn collect_alerts<'a>(vaults: &'a [Vault], query: &AlertQuery) -> Vec<AlertSubject<'a>> {
    vaults
        .iter()
        .flat_map(|vault| {
            let vault_subject = matches_vault(vault, &query.term)
                .then_some(AlertSubject::Vault(vault))
                .filter(|s| s.passes(query));
            let strategy_subjects = vault
                .strategies
                .iter()
                .filter(move |s| matches_strategy(s, &query.term))
                .map(AlertSubject::Strategy)
                .filter(move |s| s.passes(query));
            vault_subject.into_iter().chain(strategy_subjects)
        })
        .collect()
}

/// Selecting the active level again clears the filter.
pub fn toggle_level(current: Option<AlertLevel>, clicked: AlertLevel) -> Option<AlertLevel> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}
