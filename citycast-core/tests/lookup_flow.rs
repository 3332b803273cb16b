//! End-to-end lookups against a mock geocoding + forecast server.

use citycast_core::{
    ApiConfig, ConditionGroup, ErrorKind, Lookup, LookupState, UnitPreference, WeatherClient,
    WeatherQuery,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherClient {
    let api = ApiConfig {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        timeout_secs: 5,
    };
    WeatherClient::new(&api).unwrap()
}

#[tokio::test]
async fn dublin_lookup_produces_view() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Dublin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"latitude": 53.35, "longitude": -6.26}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "53.35"))
        .and(query_param("longitude", "-6.26"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "temperature_2m": 14.7,
                "weather_code": 3,
                "wind_speed_10m": 15
            },
            "hourly": {
                "time": ["2025-05-25T17:00", "2025-05-25T18:00", "2025-05-25T19:00"],
                "temperature_2m": [14, 13, 12]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut lookup = Lookup::new();

    let ticket = lookup.begin();
    let result = client
        .lookup(&WeatherQuery::new("Dublin", UnitPreference::Metric))
        .await;
    assert!(lookup.finish(ticket, result));

    let LookupState::Loaded(view) = lookup.state() else {
        panic!("expected loaded state, got {:?}", lookup.state());
    };
    assert_eq!(view.city, "Dublin");
    assert_eq!(view.temperature, 15);
    assert_eq!(view.condition.group, ConditionGroup::Cloudy);
    assert_eq!(view.wind_speed, 15.0);
    assert_eq!(view.hourly[0].time, "17:00");
    assert_eq!(view.hourly[0].temperature, 14);
}

#[tokio::test]
async fn empty_city_is_not_found_and_skips_forecast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut lookup = Lookup::new();

    let ticket = lookup.begin();
    let result = client
        .lookup(&WeatherQuery::new("", UnitPreference::Metric))
        .await;
    lookup.finish(ticket, result);

    match lookup.state() {
        LookupState::Failed(failure) => {
            assert_eq!(failure.kind, ErrorKind::CityNotFound);
            assert_eq!(failure.message, "City not found.");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_failure_is_load_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"latitude": 48.85, "longitude": 2.35}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .lookup(&WeatherQuery::new("Paris", UnitPreference::Metric))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LoadFailed);
    assert!(err.to_string().contains("503"));
}
