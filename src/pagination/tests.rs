//! Tests for pagination module

use super::*;
use crate::config::ClientConfig;
use crate::endpoints::{
    ListDriversRequest, ListObjectGroupsRequest, ListObjectsLastPositionRequest, ListTripsRequest,
};
use crate::http::testing::{ScriptedTransport, Step};
use crate::{CallOptions, Client};
use chrono::DateTime;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn client(scripted: &Arc<ScriptedTransport>) -> Client {
    let config = ClientConfig::builder()
        .base_url("https://api.example.test")
        .api_key("k")
        .max_retries(0)
        .transport(scripted.clone())
        .build();
    Client::new(config).unwrap()
}

// ============================================================================
// Page and token normalization
// ============================================================================

#[test]
fn test_page_treats_empty_token_as_last() {
    let page = Page::new(vec![1, 2], Some(String::new()));
    assert!(page.is_last());
    assert_eq!(page.continuation_token, None);

    let page = Page::new(vec![3], Some("next".to_string()));
    assert!(!page.is_last());
}

#[test]
fn test_token_formats() {
    assert_eq!(normalize_token(Some(&42i32)), Some("42".to_string()));
    assert_eq!(normalize_token(Some(&9_000_000_000i64)), Some("9000000000".to_string()));
    assert_eq!(normalize_token(Some(&"abc".to_string())), Some("abc".to_string()));
    assert_eq!(normalize_token(Some(&String::new())), None);
    assert_eq!(normalize_token::<i32>(None), None);

    let utc = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.250Z").unwrap();
    assert_eq!(normalize_token(Some(&utc)), Some("2024-03-01T10:00:00Z".to_string()));

    let local = DateTime::parse_from_rfc3339("2024-03-01T12:00:00+02:00").unwrap();
    assert_eq!(
        normalize_token(Some(&local)),
        Some("2024-03-01T12:00:00+02:00".to_string())
    );
}

#[test]
fn test_pagination_state_record_page() {
    let mut state = PaginationState::new();
    assert!(!state.done);

    state.record_page(10, Some("t1"));
    assert_eq!(state.pages, 1);
    assert_eq!(state.items, 10);
    assert_eq!(state.cursor.as_deref(), Some("t1"));
    assert!(!state.done);

    state.record_page(3, None);
    assert_eq!(state.pages, 2);
    assert_eq!(state.items, 13);
    assert_eq!(state.cursor, None);
    assert!(state.done);
}

// ============================================================================
// Paginator
// ============================================================================

#[tokio::test]
async fn test_collect_all_follows_timestamp_tokens() {
    let scripted = ScriptedTransport::new(vec![
        Step::json(json!({
            "trips": [{"object_id": "veh-1", "mileage": 1.5}, {"object_id": "veh-1"}],
            "continuation_token": "2024-03-01T10:00:00Z"
        })),
        Step::json(json!({
            "trips": [{"object_id": "veh-1", "mileage": 3.0}],
            "continuation_token": "2024-03-01T11:30:00+00:00"
        })),
        Step::json(json!({"trips": [{"object_id": "veh-1"}]})),
    ]);
    let client = client(&scripted);

    let trips = client
        .paginate(ListTripsRequest::new("veh-1"), CallOptions::new())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(trips.len(), 4);
    assert_eq!(trips[0].mileage, Some(1.5));
    assert_eq!(trips[2].mileage, Some(3.0));

    let tokens: Vec<Option<String>> = scripted
        .seen()
        .iter()
        .map(|seen| seen.query("continuation_token"))
        .collect();
    assert_eq!(
        tokens,
        vec![
            None,
            Some("2024-03-01T10:00:00Z".to_string()),
            Some("2024-03-01T11:30:00Z".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_next_page_tracks_state_and_stops() {
    let scripted = ScriptedTransport::new(vec![
        Step::json(json!({"items": [{"id": "g1"}], "continuation_token": 7})),
        Step::json(json!({"items": [{"id": "g2"}, {"id": "g3"}]})),
    ]);
    let client = client(&scripted);
    let mut pages = client.paginate(ListObjectGroupsRequest::default(), CallOptions::new());

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.continuation_token.as_deref(), Some("7"));
    assert_eq!(pages.state().pages, 1);

    let second = pages.next_page().await.unwrap().unwrap();
    assert!(second.is_last());
    assert_eq!(pages.state().items, 3);
    assert!(pages.state().done);

    assert!(pages.next_page().await.unwrap().is_none());
    assert_eq!(scripted.calls(), 2);
    assert_eq!(scripted.seen()[1].query("continuation_token").as_deref(), Some("7"));
}

#[tokio::test]
async fn test_empty_string_token_ends_pagination() {
    let scripted = ScriptedTransport::new(vec![
        Step::json(json!({"results": [{"id": "o1"}], "continuation_token": ""})),
        Step::json(json!({"results": [{"id": "unexpected"}]})),
    ]);
    let client = client(&scripted);

    let objects = client
        .paginate(ListObjectsLastPositionRequest::default(), CallOptions::new())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(objects.len(), 1);
    assert_eq!(scripted.calls(), 1);
}

#[tokio::test]
async fn test_starts_from_request_token() {
    let scripted = ScriptedTransport::new(vec![Step::json(json!({"items": []}))]);
    let client = client(&scripted);
    let request = ListDriversRequest {
        continuation_token: Some("100".to_string()),
        ..Default::default()
    };

    let paginator = client.paginate(request, CallOptions::new());
    assert_eq!(paginator.state().cursor.as_deref(), Some("100"));
    let drivers = paginator.collect_all().await.unwrap();

    assert!(drivers.is_empty());
    assert_eq!(scripted.seen()[0].query("continuation_token").as_deref(), Some("100"));
}

#[tokio::test]
async fn test_stream_ends_after_error() {
    let scripted = ScriptedTransport::new(vec![
        Step::json(json!({"items": [{"id": 1}], "continuation_token": 2})),
        Step::body(500, "boom"),
    ]);
    let client = client(&scripted);

    let mut stream = Box::pin(
        client
            .paginate(ListDriversRequest::default(), CallOptions::new())
            .into_stream(),
    );

    let page = stream.next().await.unwrap().unwrap();
    assert_eq!(page.items[0].id, Some(1));

    let err = stream.next().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "list drivers: HTTP 500: boom");

    assert!(stream.next().await.is_none());
}
