//! Open-Meteo client and the full lookup flow against a mock HTTP server.

use std::sync::Arc;

use clima_core::{
    Config, DisplayMode, ErrorKind, ForecastProvider, Geocoder, KeyValueStore, LAST_CITY_KEY,
    LookupError, MemoryStore, OpenMeteoClient, WeatherApp, WeatherCode, WeatherResult,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn test_config(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        timeout_secs: Some(5),
        ..Config::default()
    }
}

#[allow(clippy::expect_used)]
fn client(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::from_config(&test_config(server)).expect("client must build")
}

fn berlin_geocoding() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2950159,
            "name": "Berlin",
            "latitude": 52.52,
            "longitude": 13.405,
            "country": "Alemanha",
            "admin1": "Berlin"
        }],
        "generationtime_ms": 0.9
    })
}

fn forecast_body(temperature: f64, code: i64) -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "current_units": { "temperature_2m": "°C", "weather_code": "wmo code" },
        "current": {
            "time": "2026-10-18T12:00",
            "interval": 900,
            "temperature_2m": temperature,
            "weather_code": code
        }
    })
}

async fn mount_geocoding(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Collaborator calls
// ============================================================================

#[tokio::test]
async fn geocoding_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .and(query_param("language", "pt"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_geocoding()))
        .expect(1)
        .mount(&server)
        .await;

    let places = client(&server).search("São Paulo").await.expect("geocoding ok");

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].name, "Berlin");
    assert_eq!(places[0].admin1.as_deref(), Some("Berlin"));
}

#[tokio::test]
async fn geocoding_without_results_is_empty() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "generationtime_ms": 0.3 })),
    )
    .await;

    let places = client(&server).search("Atlantis").await.expect("geocoding ok");
    assert!(places.is_empty());
}

#[tokio::test]
async fn forecast_sends_expected_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.405"))
        .and(query_param("current", "temperature_2m,weather_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(18.6, 3)))
        .expect(1)
        .mount(&server)
        .await;

    let current = client(&server).current(52.52, 13.405).await.expect("forecast ok");

    assert!((current.temperature_c - 18.6).abs() < f64::EPSILON);
    assert_eq!(current.weather_code, WeatherCode::Overcast);
}

#[tokio::test]
async fn non_success_status_is_an_upstream_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = client(&server).current(1.0, 2.0).await.unwrap_err();

    assert!(matches!(err, LookupError::Status { .. }), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::NetworkOrUpstream);
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn malformed_body_is_an_upstream_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_string("not valid json")).await;

    let err = client(&server).current(1.0, 2.0).await.unwrap_err();

    assert!(matches!(err, LookupError::Malformed(_)), "got {err:?}");
    assert!(err.user_message().contains("forecast JSON"));
}

#[tokio::test]
async fn missing_current_block_is_malformed() {
    let server = MockServer::start().await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "latitude": 1.0 })),
    )
    .await;

    let err = client(&server).current(1.0, 2.0).await.unwrap_err();
    assert!(matches!(err, LookupError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let config = Config {
        geocoding_url: format!("http://127.0.0.1:{port}/v1/search"),
        forecast_url: format!("http://127.0.0.1:{port}/v1/forecast"),
        timeout_secs: Some(5),
        ..Config::default()
    };

    #[allow(clippy::expect_used)]
    let client = OpenMeteoClient::from_config(&config).expect("client must build");
    let err = client.search("Berlin").await.unwrap_err();

    assert!(matches!(err, LookupError::Request(_)), "got {err:?}");
    assert_eq!(err.kind(), ErrorKind::NetworkOrUpstream);
    assert!(!err.user_message().is_empty());
}

// ============================================================================
// Full lookup flow
// ============================================================================

fn app(server: &MockServer, store: Arc<MemoryStore>) -> WeatherApp {
    #[allow(clippy::expect_used)]
    WeatherApp::with_store(&test_config(server), store).expect("app must build")
}

#[tokio::test]
async fn berlin_lookup_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoding(&server, ResponseTemplate::new(200).set_body_json(berlin_geocoding())).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body(18.6, 3))).await;

    let store = Arc::new(MemoryStore::new());
    let app = app(&server, store.clone());

    app.lookup(" Berlin ").await;

    let state = app.state();
    assert_eq!(
        state.mode(),
        DisplayMode::Result(&WeatherResult {
            location_label: "Berlin, Berlin".into(),
            temperature_c: 19,
            code: WeatherCode::Overcast,
        })
    );
    assert_eq!(
        store.get(LAST_CITY_KEY).await.expect("read").as_deref(),
        Some("Berlin")
    );
}

#[tokio::test]
async fn unknown_weather_code_shows_clear_sky() {
    let server = MockServer::start().await;
    mount_geocoding(&server, ResponseTemplate::new(200).set_body_json(berlin_geocoding())).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body(7.2, 999))).await;

    let app = app(&server, Arc::new(MemoryStore::new()));
    app.lookup("Berlin").await;

    let result = app.state().result.expect("result published");
    assert_eq!(result.code, WeatherCode::ClearSky);
    assert_eq!(result.code.descriptor().name, "Céu Limpo");
    assert_eq!(result.code.descriptor().icon, "weather-sunny");
}

#[tokio::test]
async fn non_numeric_weather_code_shows_clear_sky() {
    let server = MockServer::start().await;
    mount_geocoding(&server, ResponseTemplate::new(200).set_body_json(berlin_geocoding())).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temperature_2m": 11.3, "weather_code": "abc" }
        })),
    )
    .await;

    let app = app(&server, Arc::new(MemoryStore::new()));
    app.lookup("Berlin").await;

    let state = app.state();
    assert!(state.error.is_none(), "unexpected error: {:?}", state.error);
    let result = state.result.expect("result published");
    assert_eq!(result.code, WeatherCode::ClearSky);
    assert_eq!(result.temperature_c, 11);
}

#[tokio::test]
async fn empty_geocoding_shows_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let app = app(&server, store.clone());
    app.lookup("Cidade Inexistente").await;

    let state = app.state();
    assert_eq!(state.mode(), DisplayMode::Error("Cidade não encontrada"));
    assert!(state.result.is_none());
    assert_eq!(store.get(LAST_CITY_KEY).await.expect("read"), None);
}

#[tokio::test]
async fn startup_looks_up_stored_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_geocoding()))
        .expect(1)
        .mount(&server)
        .await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body(-3.5, 95))).await;

    let app = app(&server, Arc::new(MemoryStore::with_entry(LAST_CITY_KEY, "Berlin")));
    app.startup().await;

    let result = app.state().result.expect("restored result");
    assert_eq!(result.temperature_c, -3);
    assert_eq!(result.code, WeatherCode::Thunderstorm);
}
