use axum::http::StatusCode;
use coursegrid_core::{
    models::{
        schedule::Day,
        table::{
            AddLectureResponse, DeleteCellResponse, DropResponse, DuplicateTableResponse,
            TableListResponse, TableResponse,
        },
    },
    store::DEFAULT_TABLE_ID,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::test_utils::TestContext;

async fn add(server: &axum_test::TestServer, table: &str, lecture_id: &str) -> usize {
    let response = server
        .post(&format!("/api/tables/{}/lectures", table))
        .json(&json!({ "lectureId": lecture_id }))
        .await;
    response.assert_status_ok();
    response.json::<AddLectureResponse>().added
}

async fn table(server: &axum_test::TestServer, id: &str) -> TableResponse {
    server.get(&format!("/api/tables/{}", id)).await.json()
}

#[tokio::test]
async fn test_list_default_table() {
    let server = TestContext::new().server().await;

    let response = server.get("/api/tables").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<TableListResponse>().ids,
        vec![DEFAULT_TABLE_ID.to_string()]
    );
}

#[tokio::test]
async fn test_get_missing_table_is_empty() {
    let server = TestContext::new().server().await;

    let response = server.get("/api/tables/nope").await;

    response.assert_status_ok();
    let body = response.json::<TableResponse>();
    assert_eq!(body.id, "nope");
    assert!(body.slots.is_empty());
}

#[tokio::test]
async fn test_add_lecture_places_each_block() {
    let server = TestContext::new().server().await;

    assert_eq!(add(&server, DEFAULT_TABLE_ID, "CS101").await, 2);

    let body = table(&server, DEFAULT_TABLE_ID).await;
    assert_eq!(body.slots.len(), 2);
    assert_eq!(body.slots[0].day, Day::Mon);
    assert_eq!(body.slots[1].day, Day::Wed);
    assert_eq!(body.slots[1].range, vec![1, 2]);
    assert_eq!(body.slots[0].room.as_deref(), Some("C-103"));
}

#[tokio::test]
async fn test_add_lecture_with_empty_schedule() {
    let server = TestContext::new().server().await;

    assert_eq!(add(&server, DEFAULT_TABLE_ID, "GE130").await, 0);
    assert!(table(&server, DEFAULT_TABLE_ID).await.slots.is_empty());
}

#[rstest]
#[case(DEFAULT_TABLE_ID, "XX999")]
#[case("missing", "CS101")]
#[tokio::test]
async fn test_add_lecture_not_found(#[case] table_id: &str, #[case] lecture_id: &str) {
    let server = TestContext::new().server().await;

    let response = server
        .post(&format!("/api/tables/{}/lectures", table_id))
        .json(&json!({ "lectureId": lecture_id }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_and_remove() {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS201").await;

    let response = server
        .post(&format!("/api/tables/{}/duplicate", DEFAULT_TABLE_ID))
        .await;
    response.assert_status(StatusCode::CREATED);
    let copy = response.json::<DuplicateTableResponse>().id;
    assert!(copy.starts_with("schedule-"));

    let ids = server.get("/api/tables").await.json::<TableListResponse>().ids;
    assert_eq!(ids, vec![DEFAULT_TABLE_ID.to_string(), copy.clone()]);
    assert_eq!(
        table(&server, &copy).await.slots,
        table(&server, DEFAULT_TABLE_ID).await.slots
    );

    server
        .delete(&format!("/api/tables/{}", DEFAULT_TABLE_ID))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let ids = server.get("/api/tables").await.json::<TableListResponse>().ids;
    assert_eq!(ids, vec![copy]);
}

#[tokio::test]
async fn test_remove_last_table_conflicts() {
    let server = TestContext::new().server().await;

    let response = server
        .delete(&format!("/api/tables/{}", DEFAULT_TABLE_ID))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let ids = server.get("/api/tables").await.json::<TableListResponse>().ids;
    assert_eq!(ids.len(), 1);
}

#[tokio::test]
async fn test_duplicate_missing_table() {
    let server = TestContext::new().server().await;

    server
        .post("/api/tables/missing/duplicate")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_table() {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS101").await;
    let mut slots = table(&server, DEFAULT_TABLE_ID).await.slots;
    slots.truncate(1);

    let response = server
        .put(&format!("/api/tables/{}", DEFAULT_TABLE_ID))
        .json(&json!({ "slots": slots }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<TableResponse>().slots, slots);
    assert_eq!(table(&server, DEFAULT_TABLE_ID).await.slots.len(), 1);

    server
        .put("/api/tables/missing")
        .json(&json!({ "slots": [] }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case(vec![0, 1])]
#[case(vec![])]
#[case(vec![24, 25])]
#[tokio::test]
async fn test_update_rejects_slots_off_the_grid(#[case] range: Vec<u32>) {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS201").await;
    let mut slots = table(&server, DEFAULT_TABLE_ID).await.slots;
    slots[0].range = range;

    let response = server
        .put(&format!("/api/tables/{}", DEFAULT_TABLE_ID))
        .json(&json!({ "slots": slots }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(table(&server, DEFAULT_TABLE_ID).await.slots[0].range, vec![3, 4]);
}

#[rstest]
#[case("Mon", 1, 1)]
#[case("wed", 2, 1)]
#[case("Tue", 1, 0)]
#[tokio::test]
async fn test_delete_cell(#[case] day: &str, #[case] period: u32, #[case] removed: usize) {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS101").await;

    let response = server
        .delete(&format!("/api/tables/{}/cells/{}/{}", DEFAULT_TABLE_ID, day, period))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<DeleteCellResponse>().removed, removed);
    assert_eq!(table(&server, DEFAULT_TABLE_ID).await.slots.len(), 2 - removed);
}

#[tokio::test]
async fn test_delete_cell_unknown_day() {
    let server = TestContext::new().server().await;

    server
        .delete(&format!("/api/tables/{}/cells/sat/1", DEFAULT_TABLE_ID))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_drop_moves_slot() {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS201").await;

    let response = server
        .post(&format!("/api/tables/{}/slots/0/drop", DEFAULT_TABLE_ID))
        .json(&json!({ "dx": 160.0, "dy": 30.0 }))
        .await;

    response.assert_status_ok();
    let body = response.json::<DropResponse>();
    assert!(body.moved);
    let placement = body.placement.unwrap();
    assert_eq!(placement.day, Day::Thu);
    assert_eq!(placement.range, vec![4, 5]);

    let slot = &table(&server, DEFAULT_TABLE_ID).await.slots[0];
    assert_eq!((slot.day, slot.range.clone()), (Day::Thu, vec![4, 5]));
}

#[rstest]
#[case(0, -400.0, 0.0)]
#[case(0, 0.0, -300.0)]
#[case(7, 80.0, 0.0)]
#[tokio::test]
async fn test_rejected_drop_leaves_slot(#[case] index: usize, #[case] dx: f64, #[case] dy: f64) {
    let server = TestContext::new().server().await;
    add(&server, DEFAULT_TABLE_ID, "CS201").await;

    let response = server
        .post(&format!("/api/tables/{}/slots/{}/drop", DEFAULT_TABLE_ID, index))
        .json(&json!({ "dx": dx, "dy": dy }))
        .await;

    response.assert_status_ok();
    let body = response.json::<DropResponse>();
    assert!(!body.moved);
    assert!(body.placement.is_none());
    assert!(body.reason.is_some());

    let slot = &table(&server, DEFAULT_TABLE_ID).await.slots[0];
    assert_eq!((slot.day, slot.range.clone()), (Day::Tue, vec![3, 4]));
}
