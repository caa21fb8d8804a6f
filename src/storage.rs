use crate::score::fmt_score;
use crate::view::ComparisonView;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a comparison as CSV with header, one row per agency rating.
///
/// Countries without any rating still get a row with empty agency fields so
/// their score is not lost.
pub fn save_csv<P: AsRef<Path>>(view: &ComparisonView, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("country", "agency", "rating", "outlook", "updated", "score"))?;
    if let Some(cmp) = view.as_ready() {
        for card in &cmp.cards {
            let score = fmt_score(card.score);
            if card.rows.is_empty() {
                wtr.serialize((&card.country, "", "", "", "", &score))?;
            }
            for row in &card.rows {
                wtr.serialize((
                    &card.country,
                    &row.agency,
                    &row.rating,
                    &row.outlook,
                    &row.updated,
                    &score,
                ))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save a comparison view as pretty JSON.
pub fn save_json<P: AsRef<Path>>(view: &ComparisonView, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(view)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
