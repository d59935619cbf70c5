use axum::http::StatusCode;
use coursegrid_core::models::search::FilterResponse;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::{PAGE_SIZE, TestContext};

fn ids(response: &FilterResponse) -> Vec<&str> {
    response.items.iter().map(|l| l.id.as_str()).collect()
}

#[tokio::test]
async fn test_search_without_options_returns_whole_catalog() {
    let server = TestContext::new().server().await;

    let response = server.post("/api/search").json(&json!({})).await;

    response.assert_status_ok();
    let body = response.json::<FilterResponse>();
    assert_eq!(body.total, 5);
    assert_eq!(ids(&body), vec!["CS101", "CS201", "MA110", "GE130", "GE140"]);
    assert!(body.items.len() <= PAGE_SIZE);
}

#[rstest]
#[case(json!({"grades": [2]}), vec!["CS201", "GE140"])]
#[case(json!({"query": "calc"}), vec!["MA110"])]
#[case(json!({"days": ["Fri"]}), vec!["GE140"])]
#[case(json!({"days": ["월"], "times": [2]}), vec!["CS101"])]
#[case(json!({"majors": ["General Education"], "credits": 3}), vec!["GE140"])]
#[tokio::test]
async fn test_search_filters(#[case] options: serde_json::Value, #[case] expected: Vec<&str>) {
    let server = TestContext::new().server().await;

    let response = server
        .post("/api/search")
        .json(&json!({ "searchOptions": options }))
        .await;

    response.assert_status_ok();
    let body = response.json::<FilterResponse>();
    assert_eq!(ids(&body), expected);
    assert_eq!(body.total, expected.len());
}

#[tokio::test]
async fn test_search_pages() {
    let server = TestContext::new().server().await;

    let response = server
        .post("/api/search")
        .json(&json!({ "page": 2, "pageSize": 2 }))
        .await;

    let body = response.json::<FilterResponse>();
    assert_eq!(ids(&body), vec!["MA110", "GE130"]);
    assert_eq!(body.total, 5);

    let response = server
        .post("/api/search")
        .json(&json!({ "page": 4, "pageSize": 2 }))
        .await;
    let body = response.json::<FilterResponse>();
    assert!(body.items.is_empty());
    assert_eq!(body.total, 5);
}

#[tokio::test]
async fn test_search_request_ids_increase() {
    let server = TestContext::new().server().await;

    let first = server.post("/api/search").json(&json!({})).await.json::<FilterResponse>();
    let second = server.post("/api/search").json(&json!({})).await.json::<FilterResponse>();

    assert!(second.request_id > first.request_id);
}

#[rstest]
#[case(json!({ "page": 0 }))]
#[case(json!({ "pageSize": 0 }))]
#[tokio::test]
async fn test_search_invalid_paging(#[case] body: serde_json::Value) {
    let server = TestContext::new().server().await;

    let response = server.post("/api/search").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
