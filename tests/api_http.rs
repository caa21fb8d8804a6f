//! HTTP behaviour of the blocking client against a local mock backend.
//!
//! The mock server needs a tokio runtime for setup; the blocking client is
//! always called outside of it.

use cre_rs::api::CatalogError;
use cre_rs::fetch::fetch_comparison;
use cre_rs::{Client, Controller, DateLocale, Notice};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_backend(mocks: Vec<Mock>) -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        for m in mocks {
            m.mount(&server).await;
        }
        server
    });
    (rt, server)
}

fn countries(body: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/countries"))
        .respond_with(body)
}

fn ratings_for(country: &str, body: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/credit-ratings"))
        .and(query_param("country", country))
        .respond_with(body)
}

#[test]
fn ratings_url_is_percent_encoded() {
    let client = Client::new("http://localhost:5001/").unwrap();
    assert_eq!(
        client.ratings_url("New Zealand"),
        "http://localhost:5001/api/credit-ratings?country=New%20Zealand"
    );
    assert_eq!(
        client.ratings_url("Côte d'Ivoire & co"),
        "http://localhost:5001/api/credit-ratings?country=C%C3%B4te%20d'Ivoire%20%26%20co"
    );
    assert_eq!(client.countries_url(), "http://localhost:5001/api/countries");
}

#[test]
fn catalog_array_is_loaded() {
    let (_rt, server) = mock_backend(vec![countries(
        ResponseTemplate::new(200).set_body_json(json!([
            {"Country": "Mexico", "CountryCode": "MX"},
            {"Country": "New Zealand", "CountryCode": "NZ"}
        ])),
    )]);
    let client = Client::new(server.uri()).unwrap();
    let list = client.fetch_countries().unwrap();
    let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Mexico", "New Zealand"]);
    assert_eq!(list[1].code.as_deref(), Some("NZ"));
}

#[test]
fn catalog_error_payload_is_surfaced() {
    let (_rt, server) = mock_backend(vec![countries(
        ResponseTemplate::new(200).set_body_json(json!({"error": "upstream unavailable"})),
    )]);
    let client = Client::new(server.uri()).unwrap();

    let err = client.fetch_countries().unwrap_err();
    assert!(matches!(err, CatalogError::Api(ref m) if m == "upstream unavailable"));

    let mut ctl = Controller::default();
    ctl.load_catalog(&client);
    assert!(ctl.catalog().is_empty());
    assert_eq!(
        ctl.take_notices(),
        [Notice::Error(
            "Failed to load countries: upstream unavailable".into()
        )]
    );
}

#[test]
fn catalog_unexpected_shape_and_status() {
    let (_rt, server) = mock_backend(vec![countries(
        ResponseTemplate::new(200).set_body_json(json!({"countries": []})),
    )]);
    let client = Client::new(server.uri()).unwrap();
    assert!(matches!(
        client.fetch_countries(),
        Err(CatalogError::UnexpectedShape(_))
    ));

    let (_rt, server) = mock_backend(vec![countries(ResponseTemplate::new(503))]);
    let client = Client::new(server.uri()).unwrap();
    let err = client.fetch_countries().unwrap_err();
    assert!(matches!(err, CatalogError::Status(s) if s.as_u16() == 503));
    assert_eq!(err.user_message(), "Failed to load countries. Please try again.");
}

#[test]
fn catalog_non_json_body_is_a_failure() {
    let (_rt, server) = mock_backend(vec![countries(
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    )]);
    let client = Client::new(server.uri()).unwrap();
    assert!(matches!(
        client.fetch_countries(),
        Err(CatalogError::Decode(_))
    ));
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on port 9 (discard) on test machines.
    let client = Client::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(
        client.fetch_countries(),
        Err(CatalogError::Transport(_))
    ));
    let results = fetch_comparison(&client, &["Mexico".into()]);
    assert!(results[0].ratings.is_empty());
}

#[test]
fn one_failing_country_still_compares() {
    let (_rt, server) = mock_backend(vec![
        ratings_for(
            "New Zealand",
            ResponseTemplate::new(200).set_body_json(json!({
                "S&P": [{"Rating": "AA+", "Outlook": "Stable", "Date": "2024-01-15", "TE-Rating": 85}],
                "Fitch": [{"Rating": "AA+", "Outlook": "Negative", "TE-Rating": 85}]
            })),
        ),
        ratings_for("Mexico", ResponseTemplate::new(500)),
    ]);
    let client = Client::new(server.uri()).unwrap();

    let mut ctl = Controller::new(DateLocale::En);
    ctl.toggle("New Zealand");
    ctl.toggle("Mexico");
    let view = ctl.compare(&client).unwrap();
    let cmp = view.as_ready().unwrap();

    assert_eq!(cmp.cards[0].country, "New Zealand");
    assert_eq!(cmp.cards[0].rows.len(), 2);
    assert_eq!(cmp.cards[0].score_label, "85.0/100");

    assert_eq!(cmp.cards[1].country, "Mexico");
    assert!(cmp.cards[1].rows.is_empty());
    assert_eq!(cmp.cards[1].score, 0.0);

    assert_eq!(
        cmp.analysis.text,
        "New Zealand has the higher average credit rating at 85.0/100, while Mexico has the \
         lower at 0.0/100. There is a significant difference (85.0 points) between the two countries."
    );
}

#[test]
fn fan_out_preserves_input_order() {
    let body = |score: u32| {
        ResponseTemplate::new(200)
            .set_body_json(json!({"Moody's": [{"Rating": "Baa2", "TE-Rating": score}]}))
    };
    let (_rt, server) = mock_backend(vec![
        ratings_for("Sweden", body(100).set_delay(std::time::Duration::from_millis(200))),
        ratings_for("Thailand", body(55)),
    ]);
    let client = Client::new(server.uri()).unwrap();

    let results = fetch_comparison(&client, &["Sweden".into(), "Thailand".into()]);
    assert_eq!(results[0].country, "Sweden");
    assert_eq!(results[0].latest("Moody's").unwrap().te_rating, Some(100.0));
    assert_eq!(results[1].country, "Thailand");
    assert_eq!(results[1].latest("Moody's").unwrap().te_rating, Some(55.0));
}
