use axum::http::StatusCode;
use coursegrid_api::load_seed_tables;
use coursegrid_core::models::search::{CatalogReloadResponse, MajorsResponse};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::atomic::Ordering;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_majors_in_first_seen_order() {
    let server = TestContext::new().server().await;

    let response = server.get("/api/majors").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<MajorsResponse>().majors,
        vec!["Computer Science", "Mathematics", "General Education"]
    );
}

#[tokio::test]
async fn test_health_reports_catalog() {
    let server = TestContext::new().server().await;

    let body = server.get("/health").await.json::<Value>();

    assert_eq!(body, json!({ "status": "ok", "catalog": "ready", "tables": 1 }));
}

#[tokio::test]
async fn test_version() {
    let server = TestContext::new().server().await;

    let body = server.get("/version").await.json::<Value>();

    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[test_log::test(tokio::test)]
async fn test_failed_load_answers_503_until_reload() {
    let ctx = TestContext::new().offline();
    let online = ctx.online.clone();
    let server = ctx.server().await;

    let health = server.get("/health").await.json::<Value>();
    assert_eq!(health["catalog"], "unavailable");

    server.get("/api/majors").await.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    server
        .post("/api/search")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let response = server
        .post("/api/tables/schedule-1/lectures")
        .json(&json!({ "lectureId": "CS101" }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("catalog host unreachable"));

    // Table routes do not depend on the catalog
    server.get("/api/tables").await.assert_status_ok();

    // Still offline: the reload fails too
    server
        .post("/api/catalog/reload")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    online.store(true, Ordering::SeqCst);
    let response = server.post("/api/catalog/reload").await;
    response.assert_status_ok();
    assert_eq!(response.json::<CatalogReloadResponse>().lectures, 5);

    server.get("/api/majors").await.assert_status_ok();
}

#[tokio::test]
async fn test_seed_tables_keep_file_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    let lecture = json!({
        "id": "CS101",
        "title": "Intro to Programming",
        "grade": 1,
        "credits": "3",
        "major": "Computer Science",
        "schedule": "월1~2"
    });
    std::fs::write(
        &path,
        json!({
            "schedule-9": [{ "day": "Tue", "range": [2, 3], "lecture": lecture }],
            "schedule-1": []
        })
        .to_string(),
    )
    .unwrap();

    let store = load_seed_tables(&path).await.unwrap();

    assert_eq!(store.ids().collect::<Vec<_>>(), vec!["schedule-9", "schedule-1"]);
    assert_eq!(store.get("schedule-9")[0].range, vec![2, 3]);
}

#[tokio::test]
async fn test_seed_tables_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();

    assert!(load_seed_tables(&dir.path().join("absent.json")).await.is_err());
}

#[tokio::test]
async fn test_seed_tables_with_empty_range_are_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tables.json");
    std::fs::write(
        &path,
        json!({
            "schedule-1": [{
                "day": "Mon",
                "range": [],
                "lecture": {
                    "id": "CS101",
                    "title": "Intro to Programming",
                    "grade": 1,
                    "credits": "3",
                    "major": "Computer Science"
                }
            }]
        })
        .to_string(),
    )
    .unwrap();

    let err = load_seed_tables(&path).await.unwrap_err();

    assert!(format!("{:#}", err).contains("covers no periods"));
}
