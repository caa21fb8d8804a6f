//! Locale-aware rendering of the `Date` field of a rating entry.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Shown when a value is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Date locales understood by [`format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateLocale {
    #[default]
    En,
    De,
    Fr,
    Es,
    It,
    Pt,
    Nl,
}

impl DateLocale {
    pub const ALL: [DateLocale; 7] = [
        DateLocale::En,
        DateLocale::De,
        DateLocale::Fr,
        DateLocale::Es,
        DateLocale::It,
        DateLocale::Pt,
        DateLocale::Nl,
    ];

    /// Map a user-provided locale tag; unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "de" | "de_de" | "de_at" | "de_ch" | "german" => DateLocale::De,
            "fr" | "fr_fr" | "fr_be" | "fr_ch" => DateLocale::Fr,
            "es" | "es_es" | "es_mx" => DateLocale::Es,
            "it" | "it_it" => DateLocale::It,
            "pt" | "pt_pt" | "pt_br" => DateLocale::Pt,
            "nl" | "nl_nl" | "nl_be" => DateLocale::Nl,
            _ => DateLocale::En,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            DateLocale::En => "en",
            DateLocale::De => "de",
            DateLocale::Fr => "fr",
            DateLocale::Es => "es",
            DateLocale::It => "it",
            DateLocale::Pt => "pt",
            DateLocale::Nl => "nl",
        }
    }

    /// Short numeric date pattern for this locale.
    pub fn pattern(self) -> &'static str {
        match self {
            DateLocale::En => "%m/%d/%Y",
            DateLocale::De => "%d.%m.%Y",
            DateLocale::Fr | DateLocale::Es | DateLocale::It | DateLocale::Pt => "%d/%m/%Y",
            DateLocale::Nl => "%d-%m-%Y",
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    None
}

/// Format a rating date for display.
///
/// Absent or blank input gives `N/A`; input that does not parse as a date is
/// returned unchanged.
pub fn format_date(raw: Option<&str>, locale: DateLocale) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return NOT_AVAILABLE.to_string(),
    };
    match parse_date(raw) {
        Some(d) => d.format(locale.pattern()).to_string(),
        None => raw.to_string(),
    }
}
