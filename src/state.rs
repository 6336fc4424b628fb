use crate::catalog::Catalog;
use crate::config::Config;
use crate::events::{Event, Reply, Row, Selection};
use crate::matcher::FuzzyRanker;
use crate::model::Country;
use crate::nordvpn::VpnCli;
use crate::recency::RecencyStore;
use log::{debug, info};
use std::collections::HashSet;
use thiserror::Error;

/// Edit threshold for country queries; one typo is forgiven.
const MAX_EDIT_DISTANCE: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("approximate matching is unavailable in this build")]
    RankingUnavailable,
}

/// Owns everything the picker mutates: the catalog, the recency list, the
/// optional ranker and the dispatch handle for the external client. All
/// events funnel through `dispatch` on one thread.
pub struct AppState {
    pub config: Config,
    catalog: Catalog,
    recency: RecencyStore,
    ranker: Option<FuzzyRanker>,
    cli: Box<dyn VpnCli>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        ranker: Option<FuzzyRanker>,
        cli: Box<dyn VpnCli>,
    ) -> Self {
        Self {
            config,
            catalog,
            recency: RecencyStore::new(),
            ranker,
            cli,
        }
    }

    /// The whole catalog, deduplicated, recently connected countries
    /// first. Recency ids that no longer resolve are dropped here.
    fn working_sequence(&self) -> Vec<&Country> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut sequence: Vec<&Country> = Vec::with_capacity(self.catalog.len());

        for id in self.recency.list() {
            match self.catalog.get(id) {
                Some(country) => {
                    seen.insert(country.id.as_str());
                    sequence.push(country);
                }
                None => debug!("recency id {:?} not in catalog, skipping", id),
            }
        }

        for country in self.catalog.iter() {
            if !seen.contains(country.id.as_str()) {
                sequence.push(country);
            }
        }

        sequence
    }

    /// Up to `limit` candidate countries for `query`. An empty query lists
    /// the head of the recency-first ordering without ranking; a non-empty
    /// query requires the ranker.
    pub fn select(&self, query: &str, limit: usize) -> Result<Vec<&Country>, SelectError> {
        let working = self.working_sequence();

        if query.is_empty() {
            return Ok(working.into_iter().take(limit).collect());
        }

        let ranker = self.ranker.as_ref().ok_or(SelectError::RankingUnavailable)?;
        let ranked = ranker.rank(query, &working, MAX_EDIT_DISTANCE);
        debug!(
            "select: query={:?} matched {} of {}",
            query,
            ranked.len(),
            working.len()
        );

        Ok(ranked.into_iter().take(limit).map(|r| r.country).collect())
    }

    /// Record the choice and hand the connect intent to the external
    /// client. Recency is updated before the installed check: a pick is a
    /// pick even when the client binary has gone missing, only the
    /// dispatch is skipped.
    pub fn request_connect(&mut self, id: &str) {
        self.recency.touch(id);

        if !self.cli.is_installed() {
            debug!("connect {:?} requested but nordvpn is not installed", id);
            return;
        }
        if let Some(country) = self.catalog.get(id) {
            info!("connect: {}", country.label);
            self.cli.connect(country);
        }
    }

    /// Forward a disconnect intent. Leaves the recency list alone.
    pub fn request_disconnect(&self) {
        if !self.cli.is_installed() {
            debug!("disconnect requested but nordvpn is not installed");
            return;
        }
        info!("disconnect");
        self.cli.disconnect();
    }

    /// The single event dispatcher.
    pub fn dispatch(&mut self, event: Event) -> Reply {
        match event {
            Event::Query(argument) => self.handle_query(&argument),
            Event::Select(Selection::Country(id)) => {
                self.request_connect(&id);
                Reply::Done
            }
            Event::Select(Selection::Disconnect) => {
                self.request_disconnect();
                Reply::Done
            }
            Event::SetKeyword(keyword) => {
                info!("keyword changed to {:?}", keyword);
                self.config.keyword = keyword;
                Reply::Done
            }
        }
    }

    fn handle_query(&self, argument: &str) -> Reply {
        if self.ranker.is_none() {
            return Reply::RankingUnavailable;
        }
        if !self.cli.is_installed() {
            return Reply::CliMissing;
        }

        let argument = argument.trim();
        let mut parts = argument.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        if command == "connect" {
            return match self.select(rest, self.config.max_results) {
                Ok(countries) => {
                    Reply::Candidates(countries.into_iter().map(Row::from).collect())
                }
                Err(SelectError::RankingUnavailable) => Reply::RankingUnavailable,
            };
        }

        Reply::Menu {
            keyword: self.config.keyword.clone(),
        }
    }
}
