use cre_rs::datefmt::DateLocale;
use cre_rs::models::{Country, CountryComparison, RatingEntry};
use cre_rs::render;
use cre_rs::score::CreditBand;
use cre_rs::selection::Selection;
use cre_rs::view::{
    ComparisonView, NO_COMPARISON_DATA, NO_COUNTRIES, SELECT_PROMPT, catalog_view,
    comparison_view, selection_view,
};

fn rated(name: &str, agency: &str, rating: &str, score: f64) -> CountryComparison {
    let mut c = CountryComparison::empty(name);
    c.ratings.insert(
        agency.into(),
        vec![RatingEntry {
            rating: rating.into(),
            outlook: Some("Stable".into()),
            date: Some("2024-05-01".into()),
            te_rating: Some(score),
        }],
    );
    c
}

#[test]
fn empty_results_give_no_data() {
    assert_eq!(
        comparison_view(&[], DateLocale::En),
        ComparisonView::NoData {
            message: NO_COMPARISON_DATA
        }
    );
}

#[test]
fn cards_show_latest_rating_per_agency() {
    let mut sweden = rated("Sweden", "S&P", "AAA", 100.0);
    sweden.ratings.insert(
        "Fitch".into(),
        vec![RatingEntry {
            rating: "AAA".into(),
            outlook: None,
            date: Some("garbled".into()),
            te_rating: Some(80.0),
        }],
    );
    let mexico = rated("Mexico", "S&P", "BBB", 50.0);

    let view = comparison_view(&[sweden, mexico], DateLocale::De);
    let cmp = view.as_ready().unwrap();
    assert_eq!(cmp.cards.len(), 2);

    let se = &cmp.cards[0];
    assert_eq!(se.country, "Sweden");
    let agencies: Vec<&str> = se.rows.iter().map(|r| r.agency.as_str()).collect();
    assert_eq!(agencies, ["Fitch", "S&P"]);
    assert_eq!(se.rows[0].outlook, "N/A");
    assert_eq!(se.rows[0].updated, "garbled");
    assert_eq!(se.rows[1].updated, "01.05.2024");
    assert_eq!(se.score_label, "90.0/100");
    assert_eq!(se.band, CreditBand::Excellent);
    assert_eq!(se.summary, "Sweden has excellent creditworthiness with minimal risk.");

    // Mexico has no Fitch entry, so only its own agency shows up
    let mx = &cmp.cards[1];
    assert_eq!(mx.rows.len(), 1);
    assert_eq!(mx.rows[0].rating, "BBB");
    assert_eq!(mx.summary, "Mexico has moderate creditworthiness with some risk concerns.");
}

#[test]
fn score_label_rounds_quarter_averages_up() {
    let mut aland = rated("Aland", "A", "AA", 80.0);
    let mut bland = rated("Bland", "A", "A", 70.0);
    for (agency, a, b) in [("B", 80.0, 70.0), ("C", 80.0, 70.0), ("D", 81.0, 73.0)] {
        aland.ratings.extend(rated("Aland", agency, "AA", a).ratings);
        bland.ratings.extend(rated("Bland", agency, "A", b).ratings);
    }
    let view = comparison_view(&[aland, bland], DateLocale::En);
    let cmp = view.as_ready().unwrap();
    assert_eq!(cmp.cards[0].score_label, "80.3/100");
    assert_eq!(cmp.cards[1].score_label, "70.8/100");
}

#[test]
fn failed_country_renders_without_rows() {
    let view = comparison_view(
        &[rated("Sweden", "S&P", "AAA", 85.0), CountryComparison::empty("Mexico")],
        DateLocale::En,
    );
    let cmp = view.as_ready().unwrap();
    let mx = &cmp.cards[1];
    assert!(mx.rows.is_empty());
    assert_eq!(mx.score, 0.0);
    assert_eq!(mx.score_label, "0.0/100");
    assert_eq!(mx.band, CreditBand::SignificantRisk);
    assert_eq!(cmp.analysis_title, "Comparison Analysis");
    assert!(cmp.analysis.text.contains("Mexico has the lower at 0.0/100"));
}

#[test]
fn catalog_highlights_selection_and_filters() {
    let catalog = vec![
        Country::new("Mexico"),
        Country::new("New Zealand"),
        Country::new("Sweden"),
    ];
    let mut sel = Selection::new();
    sel.toggle("Sweden");

    let view = catalog_view(&catalog, &sel, "");
    assert!(view.placeholder.is_none());
    assert_eq!(view.items.len(), 3);
    assert!(view.items[2].selected);
    assert!(!view.items[0].selected);
    assert_eq!(view.visible().count(), 3);

    let view = catalog_view(&catalog, &sel, "  ZEA ");
    let visible: Vec<&str> = view.visible().map(|i| i.name.as_str()).collect();
    assert_eq!(visible, ["New Zealand"]);
    // Filtered items keep their selection state
    assert!(view.items[2].selected);

    let text = render::catalog_text(&catalog_view(&catalog, &sel, ""));
    assert_eq!(text, "  Mexico\n  New Zealand\n* Sweden\n");
}

#[test]
fn empty_catalog_has_placeholder() {
    let view = catalog_view(&[], &Selection::new(), "");
    assert_eq!(view.placeholder, Some(NO_COUNTRIES));
    assert_eq!(render::catalog_text(&view), "No countries available.\n");
}

#[test]
fn selection_view_gates_compare() {
    let mut sel = Selection::new();
    let v = selection_view(&sel);
    assert_eq!(v.placeholder, Some(SELECT_PROMPT));
    assert!(!v.compare_visible);

    sel.toggle("Mexico");
    let v = selection_view(&sel);
    assert_eq!(v.badges, ["Mexico"]);
    assert!(v.placeholder.is_none());
    assert!(!v.compare_visible);

    sel.toggle("Sweden");
    assert!(selection_view(&sel).compare_visible);
}

#[test]
fn text_rendering_contains_cards_and_analysis() {
    let view = comparison_view(
        &[rated("Sweden", "S&P", "AAA", 85.0), rated("Mexico", "S&P", "BBB", 50.0)],
        DateLocale::En,
    );
    let text = render::comparison_text(&view, 60);
    assert!(text.contains("== Sweden =="));
    assert!(text.contains("Credit Score: 85.0/100"));
    assert!(text.contains("Updated: 05/01/2024"));
    assert!(text.contains("Comparison Analysis"));
    assert!(text.lines().all(|l| l.chars().count() <= 80));

    let none = render::comparison_text(&comparison_view(&[], DateLocale::En), 60);
    assert_eq!(none, "No data available for comparison.\n");
}

#[test]
fn text_rendering_of_card_without_ratings() {
    let view = comparison_view(&[CountryComparison::empty("Mexico")], DateLocale::En);
    assert_eq!(
        render::comparison_text(&view, 80),
        "== Mexico ==\n  (no agency ratings)\n  Credit Score: 0.0/100\n  \
         Mexico has significant credit risk concerns.\n\nComparison Analysis\n\
         Mexico has the higher average credit rating at 0.0/100.\n"
    );
}

#[test]
fn wrap_text_breaks_on_words() {
    let lines = render::wrap_text("Sweden has excellent creditworthiness with minimal risk.", 20);
    assert!(lines.iter().all(|l| l.chars().count() <= 20));
    assert_eq!(lines.join(" "), "Sweden has excellent creditworthiness with minimal risk.");
    assert_eq!(render::wrap_text("abcdefgh", 3), ["abc", "def", "gh"]);
}
