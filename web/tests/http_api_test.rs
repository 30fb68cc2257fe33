//! HTTP API integration tests.
//!
//! Drives the full router (handlers, error mapping, middleware) through
//! `axum-test` against in-memory and file-backed repositories.

#![allow(clippy::expect_used)] // Integration tests can use expect for setup
#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use ticket_desk_core::{JsonDocumentFile, TicketDocument, TicketRepository, TicketStatus};
use ticket_desk_testing::{
    FIXED_STATUS_CHANGE, TicketBuilder, message, sample_document, sample_repository, store_with,
    test_environment,
};
use ticket_desk_web::{AppState, build_router, cors_layer};

fn server_for(repository: TicketRepository) -> TestServer {
    let app = build_router(
        AppState::new(repository),
        cors_layer("http://localhost:3000").expect("valid origin"),
    );
    TestServer::new(app).expect("test server starts")
}

fn server() -> TestServer {
    server_for(sample_repository())
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|item| item["id"].as_str().expect("string id"))
        .collect()
}

#[tokio::test]
async fn healthz_returns_ok_string() {
    let response = server().get("/healthz").await;

    response.assert_status_ok();
    response.assert_json(&json!("OK"));
}

#[tokio::test]
async fn moderator_flow_end_to_end() {
    let server = server();

    // List: t1 with its originating message embedded
    let response = server.get("/tickets").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), ["t1"]);
    assert_eq!(body[0]["msg"]["id"], "m1");
    assert_eq!(body[0]["status"], "open");

    // Resolve
    let response = server
        .put("/tickets/resolve")
        .add_query_param("ticket_id", "t1")
        .await;
    response.assert_status_ok();
    let ticket: Value = response.json();
    assert_eq!(ticket["status"], "resolved");
    assert_eq!(ticket["resolved_by"], "moderator_id");
    assert_eq!(ticket["ts_last_status_change"], FIXED_STATUS_CHANGE);
    assert!(ticket.get("msg").is_none());

    // Resolving again is rejected
    let response = server
        .put("/tickets/resolve")
        .add_query_param("ticket_id", "t1")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "detail": "Ticket not found" }));

    // Context messages in message-store order
    let response = server
        .get("/tickets/get_messages")
        .add_query_param("ticket_id", "t1")
        .await;
    response.assert_status_ok();
    assert_eq!(ids(&response.json()), ["m1", "m2"]);

    // Delete, then the list is empty
    let response = server
        .delete("/tickets/delete")
        .add_query_param("ticket_id", "t1")
        .await;
    response.assert_status_ok();
    let removed: Value = response.json();
    assert_eq!(removed["id"], "t1");

    let response = server.get("/tickets").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn unknown_ticket_is_not_found_everywhere() {
    let server = server();

    for response in [
        server
            .put("/tickets/resolve")
            .add_query_param("ticket_id", "nope")
            .await,
        server
            .delete("/tickets/delete")
            .add_query_param("ticket_id", "nope")
            .await,
        server
            .get("/tickets/get_messages")
            .add_query_param("ticket_id", "nope")
            .await,
    ] {
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "detail": "Ticket not found" }));
    }
}

#[tokio::test]
async fn delete_twice_fails_second_time() {
    let server = server();

    server
        .delete("/tickets/delete")
        .add_query_param("ticket_id", "t1")
        .await
        .assert_status_ok();
    server
        .delete("/tickets/delete")
        .add_query_param("ticket_id", "t1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_ticket_id_is_bad_request() {
    server()
        .put("/tickets/resolve")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn limit_truncates_in_store_order() {
    let document = TicketDocument {
        tickets: vec![
            TicketBuilder::new("t1", "m1").build(),
            TicketBuilder::new("t2", "m2").build(),
            TicketBuilder::new("t3", "gone").build(),
        ],
        messages: vec![message("m1"), message("m2")],
    };
    let server = server_for(TicketRepository::new(store_with(document)));

    let response = server.get("/tickets").add_query_param("limit", 2).await;
    response.assert_status_ok();
    assert_eq!(ids(&response.json()), ["t1", "t2"]);

    let body: Value = server.get("/tickets").await.json();
    assert_eq!(ids(&body), ["t1", "t2", "t3"]);
    assert!(body[2]["msg"].is_null());

    server
        .get("/tickets")
        .add_query_param("limit", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/tickets")
        .add_query_param("limit", "many")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn write_back_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let file = JsonDocumentFile::new(dir.path().join("awesome_tickets.json"));
    file.save(&sample_document()).await.unwrap();

    let repository = TicketRepository::open(file.clone(), test_environment(), true)
        .await
        .unwrap();
    let server = server_for(repository);

    server
        .put("/tickets/resolve")
        .add_query_param("ticket_id", "t1")
        .await
        .assert_status_ok();

    let reloaded = file.load().await.unwrap();
    assert_eq!(reloaded.tickets[0].status, TicketStatus::Resolved);
    assert_eq!(
        reloaded.tickets[0].ts_last_status_change.as_deref(),
        Some(FIXED_STATUS_CHANGE)
    );
}

#[tokio::test]
async fn failed_write_back_is_500_and_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = JsonDocumentFile::new(dir.path().join("awesome_tickets.json"));
    file.save(&sample_document()).await.unwrap();

    let repository = TicketRepository::open(file, test_environment(), true)
        .await
        .unwrap();
    let server = server_for(repository);
    dir.close().unwrap();

    server
        .put("/tickets/resolve")
        .add_query_param("ticket_id", "t1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    server
        .delete("/tickets/delete")
        .add_query_param("ticket_id", "t1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = server.get("/tickets").await.json();
    assert_eq!(ids(&body), ["t1"]);
    assert_eq!(body[0]["status"], "open");
}
