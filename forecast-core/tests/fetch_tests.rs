use forecast_core::{ClientConfig, FetchError, Phase, ViewState, WeatherApiClient, WeatherFetcher};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn london_body() -> serde_json::Value {
    json!({
        "location": { "name": "London", "region": "City of London, Greater London", "country": "United Kingdom" },
        "current": {
            "temp_c": 14.0,
            "feelslike_c": 13.2,
            "humidity": 72,
            "wind_kph": 19.8,
            "vis_km": 10.0,
            "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png", "code": 1003 }
        },
        "forecast": { "forecastday": [
            { "date": "2024-06-10", "day": { "avgtemp_c": 13.9, "condition": { "text": "Patchy rain nearby", "icon": "//cdn/176.png", "code": 1063 } } },
            { "date": "2024-06-11", "day": { "avgtemp_c": 14.6, "condition": { "text": "Sunny", "icon": "//cdn/113.png", "code": 1000 } } },
            { "date": "2024-06-12", "day": { "avgtemp_c": 15.1, "condition": { "text": "Overcast", "icon": "//cdn/122.png", "code": 1009 } } }
        ] }
    })
}

fn client_for(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::new(ClientConfig::new("TEST_KEY").with_base_url(format!("{}/v1", server.uri())))
}

#[tokio::test]
async fn fetch_sends_expected_query_and_parses_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "london"))
        .and(query_param("days", "5"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).fetch("london").await.expect("fetch should succeed");

    assert_eq!(report.location, "London");
    assert_eq!(report.current.condition.text, "Partly cloudy");
    assert_eq!(report.forecast.len(), 3);
    assert_eq!(report.forecast[2].avgtemp_c, 15.1);
}

#[tokio::test]
async fn provider_error_payload_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Atlantis").await.unwrap_err();

    assert_eq!(err, FetchError::Provider("No matching location found.".into()));
}

#[tokio::test]
async fn server_failure_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("London").await.unwrap_err();

    match err {
        FetchError::Transport(msg) => assert!(msg.contains("502"), "{msg}"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.fetch("London").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn view_round_trip_against_mock_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "london"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast.json"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut view = ViewState::new("Gwalior");

    view.edit_search(" london ");
    let query = view.submit_search().expect("non-empty search starts a fetch");
    view.fetch_with(&client, &query).await;

    assert_eq!(view.city(), "London");
    assert_eq!(view.phase(), &Phase::Idle);
    assert_eq!(view.forecast().len(), 3);

    view.edit_search("Atlantis");
    let query = view.submit_search().unwrap();
    view.fetch_with(&client, &query).await;

    assert_eq!(view.city(), "London");
    assert_eq!(view.phase(), &Phase::Idle);
    assert_eq!(view.current().map(|c| c.temp_c), Some(14.0));
}
