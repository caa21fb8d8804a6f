//! Blocking client for the **credit ratings backend**.
//!
//! Two endpoints are used:
//! - `GET /api/countries` returns the selectable country catalog.
//! - `GET /api/credit-ratings?country=<name>` returns ratings grouped by agency.
//!
//! ### Notes
//! - No retries. A failed catalog load is surfaced as a [`CatalogError`]; a failed
//!   ratings request is an error the caller is expected to downgrade (see
//!   [`crate::fetch::fetch_comparison`]).
//! - Network timeouts use a sane default (30s total, 10s connect).
//!
//! Typical usage:
//! ```no_run
//! # use cre_rs::{Client, api::DEFAULT_BASE_URL};
//! let client = Client::new(DEFAULT_BASE_URL)?;
//! let countries = client.fetch_countries()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{AgencyRatings, Country, parse_agency_ratings, parse_catalog};
use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Where the backend listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";

pub const COUNTRIES_PATH: &str = "/api/countries";
pub const RATINGS_PATH: &str = "/api/credit-ratings";

/// Why the country catalog could not be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend answered with `{ "error": "..." }`.
    #[error("api error: {0}")]
    Api(String),
    /// The payload was JSON but neither an array nor an error object.
    #[error("unexpected data format: {0}")]
    UnexpectedShape(String),
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode json: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Text for the blocking notification shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Api(msg) => format!("Failed to load countries: {msg}"),
            CatalogError::UnexpectedShape(_) => {
                "Failed to load countries. Unexpected data format.".to_string()
            }
            _ => "Failed to load countries. Please try again.".to_string(),
        }
    }
}

/// Source of catalog and ratings data.
///
/// [`Client`] talks HTTP; tests substitute an in-memory implementation.
pub trait RatingsApi {
    fn countries(&self) -> Result<Vec<Country>, CatalogError>;
    fn ratings(&self, country: &str) -> Result<AgencyRatings>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Same set `encodeURIComponent` leaves alone: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const QUERY_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single query parameter value.
pub fn encode_query_value(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, QUERY_SAFE).to_string()
}

impl Client {
    /// Build a client for the backend at `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("cre-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, http })
    }

    pub fn countries_url(&self) -> String {
        format!("{}{}", self.base_url, COUNTRIES_PATH)
    }

    pub fn ratings_url(&self, country: &str) -> String {
        format!(
            "{}{}?country={}",
            self.base_url,
            RATINGS_PATH,
            encode_query_value(country)
        )
    }

    /// Fetch the country catalog.
    ///
    /// ### Errors
    /// - Network/HTTP error, or a body that is not JSON
    /// - API-level `{ "error": ... }` payload
    /// - JSON that is neither of the expected shapes
    pub fn fetch_countries(&self) -> Result<Vec<Country>, CatalogError> {
        let url = self.countries_url();
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status()));
        }
        let body = resp.text()?;
        let v: Value = serde_json::from_str(&body)?;
        match v {
            Value::Array(items) => Ok(parse_catalog(&items)),
            Value::Object(ref obj) if obj.contains_key("error") => {
                let msg = match &obj["error"] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Err(CatalogError::Api(msg))
            }
            other => Err(CatalogError::UnexpectedShape(other.to_string())),
        }
    }

    /// Fetch ratings for one country, grouped by agency.
    ///
    /// ### Errors
    /// - Network error
    /// - Non-2xx status
    /// - Body that is not JSON
    pub fn fetch_ratings(&self, country: &str) -> Result<AgencyRatings> {
        let url = self.ratings_url(country);
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("GET {url}"))?;
        if !resp.status().is_success() {
            bail!("request failed with HTTP {}", resp.status());
        }
        let v: Value = resp.json().context("decode json")?;
        Ok(parse_agency_ratings(country, v))
    }
}

impl RatingsApi for Client {
    fn countries(&self) -> Result<Vec<Country>, CatalogError> {
        self.fetch_countries()
    }

    fn ratings(&self, country: &str) -> Result<AgencyRatings> {
        self.fetch_ratings(country)
    }
}
