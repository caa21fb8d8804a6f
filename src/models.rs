use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A selectable country from the catalog endpoint. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "Country")]
    pub name: String,
    #[serde(rename = "CountryCode", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
        }
    }
}

/// Raw catalog item. Both fields are optional so a single bad item does not
/// poison the whole list.
#[derive(Debug, Clone, Deserialize)]
struct CatalogItem {
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "CountryCode")]
    code: Option<String>,
}

/// Turn the elements of a catalog array into countries.
///
/// Items that are not objects or that carry no non-empty `Country` are skipped.
pub fn parse_catalog(items: &[Value]) -> Vec<Country> {
    items
        .iter()
        .filter_map(|v| serde_json::from_value::<CatalogItem>(v.clone()).ok())
        .filter_map(|item| match item.country {
            Some(name) if !name.trim().is_empty() => Some(Country {
                name,
                code: item.code,
            }),
            _ => None,
        })
        .collect()
}

/// One rating published by an agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingEntry {
    #[serde(rename = "Rating", default)]
    pub rating: String,
    #[serde(rename = "Outlook", default)]
    pub outlook: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    /// Normalized 0-100 score. Some backends serialize it as a string;
    /// accept both and normalize to `f64`.
    #[serde(
        rename = "TE-Rating",
        default,
        deserialize_with = "de_opt_f64_from_string_or_number"
    )]
    pub te_rating: Option<f64>,
}

/// Agency name -> entries, most recent first.
pub type AgencyRatings = BTreeMap<String, Vec<RatingEntry>>;

/// Ratings fetched for one country. Empty `ratings` means the fetch failed
/// or the backend knows nothing about the country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryComparison {
    pub country: String,
    pub ratings: AgencyRatings,
}

impl CountryComparison {
    pub fn empty(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ratings: AgencyRatings::new(),
        }
    }

    /// The most recent entry for `agency`, if any.
    pub fn latest(&self, agency: &str) -> Option<&RatingEntry> {
        self.ratings.get(agency).and_then(|entries| entries.first())
    }
}

/// Parse a ratings payload: `{ agency: [entry, ...], ... }`.
///
/// Anything that is not an object yields no agencies, and agencies whose value
/// is not a list of entries are dropped. Both cases are logged.
pub fn parse_agency_ratings(country: &str, v: Value) -> AgencyRatings {
    let mut out = AgencyRatings::new();
    let obj = match v {
        Value::Object(obj) => obj,
        other => {
            log::warn!("ratings for {country}: expected an object, got {other}");
            return out;
        }
    };
    for (agency, entries) in obj {
        match serde_json::from_value::<Vec<RatingEntry>>(entries) {
            Ok(entries) => {
                out.insert(agency, entries);
            }
            Err(e) => log::warn!("ratings for {country}: skipping agency {agency}: {e}"),
        }
    }
    out
}

/// Serde helper: parse `Option<f64>` from a JSON number, a numeric string, or null.
fn de_opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a numeric string, or null")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.replace(',', "");
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>().map(Some).map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}
