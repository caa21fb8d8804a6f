//! cre_rs
//!
//! A small Rust library for comparing sovereign credit ratings served by a
//! ratings backend. Pairs with the `cre` CLI and the `cre-gui` desktop app.
//!
//! ### Features
//! - Load the country catalog and filter it by name
//! - Select up to two countries and fetch their ratings in parallel
//! - Derive an average credit score, a qualitative band and a comparison narrative
//! - Render comparisons as text, or save them as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use cre_rs::{Client, Controller, DateLocale};
//!
//! let client = Client::new(cre_rs::api::DEFAULT_BASE_URL)?;
//! let mut ctl = Controller::new(DateLocale::En);
//! ctl.load_catalog(&client);
//! ctl.toggle("Mexico");
//! ctl.toggle("Sweden");
//! if let Some(view) = ctl.compare(&client) {
//!     print!("{}", cre_rs::render::comparison_text(&view, 80));
//!     cre_rs::storage::save_json(&view, "comparison.json")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod controller;
pub mod datefmt;
pub mod fetch;
pub mod models;
pub mod render;
pub mod score;
pub mod selection;
pub mod storage;
pub mod view;

pub use api::{CatalogError, Client, RatingsApi};
pub use controller::{CompareTicket, Controller, Notice};
pub use datefmt::DateLocale;
pub use models::{AgencyRatings, Country, CountryComparison, RatingEntry};
pub use selection::{Selection, Toggle};
pub use view::ComparisonView;
