//! Pure state -> view-model transformations.
//!
//! Nothing in here touches a rendering target. The terminal renderer
//! ([`crate::render`]), the exporters ([`crate::storage`]) and the GUI all paint
//! these structures.

use crate::datefmt::{DateLocale, NOT_AVAILABLE, format_date};
use crate::models::{Country, CountryComparison};
use crate::score::{Analysis, CreditBand, analyze, fmt_score, score_summary};
use crate::selection::Selection;
use serde::Serialize;
use std::collections::BTreeSet;

pub const NO_COUNTRIES: &str = "No countries available.";
pub const SELECT_PROMPT: &str = "Select two countries to compare.";
pub const NO_COMPARISON_DATA: &str = "No data available for comparison.";
pub const ANALYSIS_TITLE: &str = "Comparison Analysis";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub name: String,
    pub selected: bool,
    /// False when the item does not match the search filter.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub items: Vec<CatalogItem>,
    /// Set when there is nothing to list.
    pub placeholder: Option<&'static str>,
}

impl CatalogView {
    pub fn visible(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(|i| i.visible)
    }
}

pub fn matches_filter(name: &str, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    filter.is_empty() || name.to_lowercase().contains(&filter)
}

pub fn catalog_view(catalog: &[Country], selection: &Selection, filter: &str) -> CatalogView {
    if catalog.is_empty() {
        return CatalogView {
            items: Vec::new(),
            placeholder: Some(NO_COUNTRIES),
        };
    }
    let items = catalog
        .iter()
        .map(|c| CatalogItem {
            name: c.name.clone(),
            selected: selection.contains(&c.name),
            visible: matches_filter(&c.name, filter),
        })
        .collect();
    CatalogView {
        items,
        placeholder: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionView {
    /// Selected country names in selection order; each badge offers removal.
    pub badges: Vec<String>,
    pub placeholder: Option<&'static str>,
    pub compare_visible: bool,
}

pub fn selection_view(selection: &Selection) -> SelectionView {
    if selection.is_empty() {
        return SelectionView {
            badges: Vec::new(),
            placeholder: Some(SELECT_PROMPT),
            compare_visible: false,
        };
    }
    SelectionView {
        badges: selection.names().to_vec(),
        placeholder: None,
        compare_visible: selection.can_compare(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingRow {
    pub agency: String,
    pub rating: String,
    pub outlook: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCard {
    pub country: String,
    pub rows: Vec<RatingRow>,
    pub score: f64,
    /// `score` to one decimal, e.g. `72.5/100`.
    pub score_label: String,
    pub band: CreditBand,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub cards: Vec<CountryCard>,
    pub analysis_title: &'static str,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonView {
    NoData { message: &'static str },
    Ready(Comparison),
}

impl ComparisonView {
    pub fn as_ready(&self) -> Option<&Comparison> {
        match self {
            ComparisonView::Ready(c) => Some(c),
            ComparisonView::NoData { .. } => None,
        }
    }
}

fn country_card(data: &CountryComparison, agencies: &BTreeSet<&str>, locale: DateLocale) -> CountryCard {
    let rows = agencies
        .iter()
        .filter_map(|agency| {
            data.latest(agency).map(|entry| RatingRow {
                agency: (*agency).to_string(),
                rating: entry.rating.clone(),
                outlook: entry
                    .outlook
                    .clone()
                    .filter(|o| !o.trim().is_empty())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                updated: format_date(entry.date.as_deref(), locale),
            })
        })
        .collect();

    let score = score_summary(data).average;
    let band = CreditBand::from_score(score);
    CountryCard {
        country: data.country.clone(),
        rows,
        score,
        score_label: format!("{}/100", fmt_score(score)),
        band,
        summary: band.narrative(&data.country),
    }
}

/// Build the side-by-side comparison from fetched results.
pub fn comparison_view(results: &[CountryComparison], locale: DateLocale) -> ComparisonView {
    if results.is_empty() {
        return ComparisonView::NoData {
            message: NO_COMPARISON_DATA,
        };
    }

    let agencies: BTreeSet<&str> = results
        .iter()
        .flat_map(|r| r.ratings.keys().map(String::as_str))
        .collect();

    let cards = results
        .iter()
        .map(|r| country_card(r, &agencies, locale))
        .collect();

    ComparisonView::Ready(Comparison {
        cards,
        analysis_title: ANALYSIS_TITLE,
        analysis: analyze(results),
    })
}
