//! Tests for endpoint requests

use super::*;
use crate::client::build_request;
use crate::config::ClientConfig;
use crate::model::{FuelEventType, IdentifierType};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use reqwest::Request;
use serde_json::json;

fn config() -> ClientConfig {
    ClientConfig::builder()
        .base_url("https://api.example.test")
        .user_agent("test-agent/1.0")
        .build()
}

fn built<E: Endpoint>(endpoint: &E) -> Request {
    build_request(&config(), endpoint).unwrap()
}

fn query(request: &Request) -> Vec<(String, String)> {
    request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_format_time_is_utc_seconds() {
    let time = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        + chrono::Duration::milliseconds(750);
    assert_eq!(format_time(time), "2024-03-01T10:00:00Z");
}

#[test]
fn test_request_headers() {
    let request = built(&ListObjectsRequest);
    assert_eq!(*request.method(), reqwest::Method::GET);
    assert_eq!(request.headers()["user-agent"], "test-agent/1.0");
    assert_eq!(request.headers()["accept"], "application/json");
    assert_eq!(request.timeout(), Some(&std::time::Duration::from_secs(30)));
}

#[test]
fn test_list_objects_request() {
    let request = built(&ListObjectsRequest);
    assert_eq!(request.url().path(), "/objects");
    assert_eq!(query(&request), pairs(&[("version", "1")]));
}

#[test]
fn test_base_url_with_path_prefix() {
    let config = ClientConfig::builder()
        .base_url("https://proxy.example.test/trusttrack/")
        .build();
    let request = build_request(&config, &ListObjectsRequest).unwrap();
    assert_eq!(request.url().path(), "/trusttrack/objects");
}

#[test]
fn test_last_position_request_omits_empty_filters() {
    let request = built(&ListObjectsLastPositionRequest {
        limit: 0,
        continuation_token: Some(String::new()),
    });
    assert_eq!(request.url().path(), "/objects-last-coordinate");
    assert_eq!(query(&request), pairs(&[("version", "2")]));

    let request = built(&ListObjectsLastPositionRequest {
        limit: 50,
        continuation_token: Some("abc".to_string()),
    });
    assert_eq!(
        query(&request),
        pairs(&[("version", "2"), ("limit", "50"), ("continuation_token", "abc")])
    );
}

#[test]
fn test_get_object_group_escapes_id() {
    let request = built(&GetObjectGroupRequest::new("fleet/north 1"));
    assert_eq!(request.url().path(), "/object-groups/fleet%2Fnorth%201");
    assert_eq!(query(&request), pairs(&[("version", "1")]));
}

#[test]
fn test_coordinates_request() {
    let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();
    let mut endpoint = ListObjectCoordinatesRequest::new("veh-1").between(from, Some(to));
    endpoint.include_geozones = true;

    let request = built(&endpoint);

    assert_eq!(request.url().path(), "/objects/veh-1/coordinates");
    assert_eq!(
        query(&request),
        pairs(&[
            ("version", "2"),
            ("objectId", "veh-1"),
            ("from_datetime", "2024-03-01T00:00:00Z"),
            ("to_datetime", "2024-03-02T00:00:00Z"),
            ("limit", "1000"),
            ("include_geozones", "true"),
        ])
    );
}

#[test]
fn test_trips_request() {
    let from = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
    let endpoint = ListTripsRequest {
        limit: 10,
        continuation_token: Some("2024-03-01T07:00:00Z".to_string()),
        ..ListTripsRequest::new("veh 2").between(from, None)
    };

    let request = built(&endpoint);

    assert_eq!(request.url().path(), "/objects/veh%202/trips");
    assert_eq!(
        query(&request),
        pairs(&[
            ("version", "1"),
            ("from_datetime", "2024-03-01T06:30:00Z"),
            ("limit", "10"),
            ("continuation_token", "2024-03-01T07:00:00Z"),
        ])
    );
}

#[test]
fn test_fuel_events_request() {
    let endpoint = ListFuelEventsRequest {
        object_id: Some("veh-1".to_string()),
        ..Default::default()
    };
    let request = built(&endpoint);
    assert_eq!(request.url().path(), "/fuel-events");
    assert_eq!(
        query(&request),
        pairs(&[("version", "1"), ("object_id", "veh-1")])
    );
}

#[test]
fn test_drivers_request() {
    let endpoint = ListDriversRequest {
        identifier_type: Some(IdentifierType::Tachograph),
        identifier: Some("DRV42".to_string()),
        ..Default::default()
    };
    let request = built(&endpoint);
    assert_eq!(request.url().path(), "/drivers");
    assert_eq!(
        query(&request),
        pairs(&[
            ("version", "2"),
            ("identifier_type", "TACHOGRAPH"),
            ("identifier", "DRV42"),
        ])
    );
}

#[test]
fn test_decode_fuel_events_page() {
    let wire = serde_json::from_value(json!({
        "items": [{"object_id": "veh-1", "event_type": "REFUEL", "difference": 42.5}],
        "continuation_token": 1_700_000_000_000i64
    }))
    .unwrap();

    let page = ListFuelEventsRequest::decode(wire);

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].event_type, Some(FuelEventType::Refuel));
    assert_eq!(page.continuation_token.as_deref(), Some("1700000000000"));
}

#[test]
fn test_decode_coordinates_without_token() {
    let wire = serde_json::from_value(json!({
        "items": [{"object_id": "veh-1", "position": {"latitude": 54.68, "longitude": 25.27}}]
    }))
    .unwrap();

    let page = ListObjectCoordinatesRequest::decode(wire);

    assert!(page.is_last());
    let position = page.items[0].position.as_ref().unwrap();
    assert_eq!(position.latitude, Some(54.68));
}
