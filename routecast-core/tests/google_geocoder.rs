//! GoogleGeocoder against a mock Geocoding API.

use std::time::Duration;

use routecast_core::Coordinate;
use routecast_core::geocode::{GoogleGeocoder, ReverseGeocoder};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CALGARY: Coordinate = Coordinate::new(51.0447, -114.0719);

fn component(name: &str, types: &[&str]) -> serde_json::Value {
    serde_json::json!({ "long_name": name, "short_name": name, "types": types })
}

async fn geocoder_for(server: &MockServer) -> GoogleGeocoder {
    GoogleGeocoder::with_base_url(server.uri(), Duration::from_secs(2)).unwrap()
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_resolves_locality_from_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("latlng", "51.0447,-114.0719"))
        .and(query_param("key", "G_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [
                { "address_components": [
                    component("Beltline", &["neighborhood", "political"]),
                    component("Calgary", &["locality", "political"]),
                    component("Division No. 6", &["administrative_area_level_2", "political"]),
                ]},
                { "address_components": [component("Somewhere Else", &["locality"])] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server).await;
    let city = geocoder.resolve_city(CALGARY, "G_KEY").await;

    assert_eq!(city.as_deref(), Some("Calgary"));
}

#[tokio::test]
async fn test_rural_point_falls_back_to_county() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "address_components": [
                component("Queen Elizabeth II Hwy", &["route"]),
                component("Ponoka County", &["administrative_area_level_2", "political"]),
                component("Alberta", &["administrative_area_level_1", "political"]),
            ]}]
        })),
    )
    .await;

    let geocoder = geocoder_for(&server).await;
    let city = geocoder.resolve_city(CALGARY, "G_KEY").await;

    assert_eq!(city.as_deref(), Some("Ponoka County"));
}

#[tokio::test]
async fn test_no_city_level_component() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "address_components": [component("Canada", &["country", "political"])] }]
        })),
    )
    .await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}

#[tokio::test]
async fn test_zero_results() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
    )
    .await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}

#[tokio::test]
async fn test_ok_with_empty_results() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": []
        })),
    )
    .await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}

#[tokio::test]
async fn test_request_denied_is_no_city() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })),
    )
    .await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "BAD").await, None);
}

#[tokio::test]
async fn test_server_error_is_no_city() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500).set_body_string("upstream exploded")).await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}

#[tokio::test]
async fn test_malformed_body_is_no_city() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("<html>not json</html>")).await;

    let geocoder = geocoder_for(&server).await;
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}

#[tokio::test]
async fn test_timeout_is_no_city() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200)
            .set_delay(Duration::from_secs(5))
            .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
    )
    .await;

    let geocoder = GoogleGeocoder::with_base_url(server.uri(), Duration::from_millis(200)).unwrap();
    assert_eq!(geocoder.resolve_city(CALGARY, "G_KEY").await, None);
}
