//! Plain-text rendering of view-models for the terminal.

use crate::view::{CatalogView, Comparison, ComparisonView, CountryCard};

/// Wrap text to at most `max_cols` characters per line, breaking on word
/// boundaries where possible.
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let max_cols = max_cols.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let candidate_len = if cur.is_empty() {
            word.chars().count()
        } else {
            cur.chars().count() + 1 + word.chars().count()
        };
        if candidate_len <= max_cols {
            if !cur.is_empty() {
                cur.push(' ');
            }
            cur.push_str(word);
            continue;
        }
        if !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
        }
        // Single long word: hard-break by characters
        let mut buf = String::new();
        for ch in word.chars() {
            if buf.chars().count() == max_cols {
                lines.push(std::mem::take(&mut buf));
            }
            buf.push(ch);
        }
        cur = buf;
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// One line per visible country; selected ones are marked with `*`.
pub fn catalog_text(view: &CatalogView) -> String {
    if let Some(placeholder) = view.placeholder {
        return format!("{placeholder}\n");
    }
    let mut out = String::new();
    for item in view.visible() {
        let mark = if item.selected { '*' } else { ' ' };
        out.push_str(&format!("{mark} {}\n", item.name));
    }
    out
}

fn card_text(out: &mut String, card: &CountryCard, cols: usize) {
    out.push_str(&format!("== {} ==\n", card.country));
    if card.rows.is_empty() {
        out.push_str("  (no agency ratings)\n");
    }
    for row in &card.rows {
        out.push_str(&format!(
            "  {:<20} {:<8} Outlook: {:<10} Updated: {}\n",
            row.agency, row.rating, row.outlook, row.updated
        ));
    }
    out.push_str(&format!("  Credit Score: {}\n", card.score_label));
    for line in wrap_text(&card.summary, cols.saturating_sub(2)) {
        out.push_str(&format!("  {line}\n"));
    }
}

fn analysis_text(out: &mut String, cmp: &Comparison, cols: usize) {
    out.push_str(cmp.analysis_title);
    out.push('\n');
    for line in wrap_text(&cmp.analysis.text, cols) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Render a comparison as cards followed by the analysis, wrapped at `cols`.
pub fn comparison_text(view: &ComparisonView, cols: usize) -> String {
    let cmp = match view {
        ComparisonView::NoData { message } => return format!("{message}\n"),
        ComparisonView::Ready(cmp) => cmp,
    };
    let mut out = String::new();
    for card in &cmp.cards {
        card_text(&mut out, card, cols);
        out.push('\n');
    }
    analysis_text(&mut out, cmp, cols);
    out
}
