//! Session state for the explorer: catalog, selection, and the latest comparison.
//!
//! All mutation goes through `&mut self`, driven by UI events. Adapters read
//! state back through the view functions and drain queued [`Notice`]s.

use crate::api::{CatalogError, RatingsApi};
use crate::datefmt::DateLocale;
use crate::fetch::fetch_comparison;
use crate::models::{Country, CountryComparison};
use crate::selection::{MAX_SELECTED, Selection, Toggle};
use crate::view::{self, CatalogView, ComparisonView, SelectionView};
use std::fmt;

pub const SELECTION_FULL: &str = "You can only select up to 2 countries at a time.";
pub const SELECT_TWO: &str = "Please select 2 countries to compare.";

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warning(String),
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Warning(m) | Notice::Error(m) => f.write_str(m),
        }
    }
}

/// Handed out by [`Controller::begin_compare`]; identifies one compare request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareTicket {
    pub generation: u64,
    pub countries: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Controller {
    catalog: Vec<Country>,
    selection: Selection,
    filter: String,
    locale: DateLocale,
    generation: u64,
    loading: bool,
    results: Option<Vec<CountryComparison>>,
    notices: Vec<Notice>,
}

impl Controller {
    pub fn new(locale: DateLocale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &[Country] {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: DateLocale) {
        self.locale = locale;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> Option<&[CountryComparison]> {
        self.results.as_deref()
    }

    /// Queued notices, oldest first. Draining them is the adapter's job.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn warn(&mut self, msg: &str) {
        log::warn!("{msg}");
        self.notices.push(Notice::Warning(msg.to_string()));
    }

    /// Store a freshly loaded catalog, or surface why loading failed.
    ///
    /// On failure the previous catalog is kept.
    pub fn apply_catalog(&mut self, result: Result<Vec<Country>, CatalogError>) {
        match result {
            Ok(countries) => {
                log::info!("Loaded {} countries", countries.len());
                self.catalog = countries;
            }
            Err(e) => {
                log::error!("Error loading countries: {e}");
                self.notices.push(Notice::Error(e.user_message()));
            }
        }
    }

    pub fn load_catalog<A: RatingsApi + ?Sized>(&mut self, api: &A) {
        let result = api.countries();
        self.apply_catalog(result);
    }

    /// Toggle `name` in the selection; warns when the selection is full.
    pub fn toggle(&mut self, name: &str) -> Toggle {
        let outcome = self.selection.toggle(name);
        if outcome == Toggle::Rejected {
            self.warn(SELECTION_FULL);
        }
        outcome
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Start a compare request for the current selection.
    ///
    /// Returns `None` (and warns) unless the selection is full. Any previous
    /// comparison is dropped and the loading flag is raised.
    pub fn begin_compare(&mut self) -> Option<CompareTicket> {
        if self.selection.len() < MAX_SELECTED {
            self.warn(SELECT_TWO);
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.results = None;
        Some(CompareTicket {
            generation: self.generation,
            countries: self.selection.names().to_vec(),
        })
    }

    fn is_current(&self, ticket: &CompareTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Deliver results for `ticket`. Results of a superseded request are
    /// discarded and `false` is returned.
    pub fn finish_compare(&mut self, ticket: &CompareTicket, results: Vec<CountryComparison>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding stale comparison (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        log::info!("Compared {}", ticket.countries.join(" vs "));
        self.loading = false;
        self.results = Some(results);
        true
    }

    /// The request for `ticket` will never report back; stop showing progress.
    pub fn abort_compare(&mut self, ticket: &CompareTicket) -> bool {
        if !self.is_current(ticket) || !self.loading {
            return false;
        }
        log::error!("Error comparing countries: {}", ticket.countries.join(", "));
        self.loading = false;
        self.notices
            .push(Notice::Error("Error comparing countries. Please try again.".to_string()));
        true
    }

    /// Begin, fetch and finish in one blocking call.
    pub fn compare<A>(&mut self, api: &A) -> Option<ComparisonView>
    where
        A: RatingsApi + Sync + ?Sized,
    {
        let ticket = self.begin_compare()?;
        let results = fetch_comparison(api, &ticket.countries);
        self.finish_compare(&ticket, results);
        self.comparison_view()
    }

    pub fn catalog_view(&self) -> CatalogView {
        view::catalog_view(&self.catalog, &self.selection, &self.filter)
    }

    pub fn selection_view(&self) -> SelectionView {
        view::selection_view(&self.selection)
    }

    /// The latest comparison, or `None` while loading or before any compare.
    pub fn comparison_view(&self) -> Option<ComparisonView> {
        self.results
            .as_deref()
            .map(|r| view::comparison_view(r, self.locale))
    }
}
