//! HTTP-level integration tests for the cycle and assignment endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};
use fullcircle_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use sqlx::PgPool;

fn cycle_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "start_date": "2026-01-01T00:00:00Z",
        "end_date": "2026-03-31T00:00:00Z",
    })
}

/// Admins create cycles; they start in draft status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_cycle(pool: PgPool) {
    let admin = common::create_user(&pool, "root", None, ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/cycles", cycle_body("Q1 2026"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Q1 2026");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["created_by"], admin.id);
}

/// Employees cannot create cycles.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_cycle_forbidden_for_employee(pool: PgPool) {
    let employee = common::create_user(&pool, "emp", Some("Sales"), ROLE_EMPLOYEE).await;
    let token = common::auth_token(&employee);
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/cycles", cycle_body("Q1 2026"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A cycle whose end date precedes its start date is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_cycle_bad_dates(pool: PgPool) {
    let admin = common::create_user(&pool, "root", None, ROLE_ADMIN).await;
    let token = common::auth_token(&admin);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Backwards",
        "start_date": "2026-03-31T00:00:00Z",
        "end_date": "2026-01-01T00:00:00Z",
    });
    let response = post_json_auth(app, "/api/v1/cycles", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// Full cycle lifecycle over HTTP: create, assign, activate, complete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cycle_lifecycle(pool: PgPool) {
    let admin = common::create_user(&pool, "root", None, ROLE_ADMIN).await;
    let alice = common::create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let bob = common::create_user(&pool, "bob", Some("Engineering"), ROLE_EMPLOYEE).await;
    let token = common::auth_token(&admin);

    // Create.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/cycles",
        cycle_body("Q1 2026"),
        &token,
    )
    .await;
    let cycle_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Assign while in draft.
    let body = serde_json::json!({
        "reviewer_id": alice.id,
        "reviewee_id": bob.id,
        "relationship_type": "peer",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cycles/{cycle_id}/assignments"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    // Due date is copied from the cycle's end date.
    assert_eq!(json["data"]["due_date"], "2026-03-31T00:00:00Z");

    // Activate.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cycles/{cycle_id}/activate"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "active");

    // Assigning to an active cycle conflicts.
    let body = serde_json::json!({
        "reviewer_id": bob.id,
        "reviewee_id": alice.id,
        "relationship_type": "peer",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cycles/{cycle_id}/assignments"),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_STATE");

    // The reviewer sees the pending assignment.
    let alice_token = common::auth_token(&alice);
    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/assignments/pending",
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["reviewee_name"], "Test bob");
    assert_eq!(json["data"][0]["cycle_name"], "Q1 2026");

    // Complete.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cycles/{cycle_id}/complete"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "completed");

    // Completing twice is an invalid transition.
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/cycles/{cycle_id}/complete"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INVALID_TRANSITION");
}

/// Any authenticated user can list and fetch cycles.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_get_cycles(pool: PgPool) {
    let admin = common::create_user(&pool, "root", None, ROLE_ADMIN).await;
    let employee = common::create_user(&pool, "emp", None, ROLE_EMPLOYEE).await;
    let admin_token = common::auth_token(&admin);
    let employee_token = common::auth_token(&employee);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/cycles",
        cycle_body("Q1 2026"),
        &admin_token,
    )
    .await;
    let cycle_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/cycles",
        &employee_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/cycles/{cycle_id}"),
        &employee_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown ids are 404.
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/cycles/999999",
        &employee_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Self-review assignments are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_assignment_rejects_self_review(pool: PgPool) {
    let admin = common::create_user(&pool, "root", None, ROLE_ADMIN).await;
    let alice = common::create_user(&pool, "alice", Some("Engineering"), ROLE_EMPLOYEE).await;
    let token = common::auth_token(&admin);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/cycles",
        cycle_body("Q1 2026"),
        &token,
    )
    .await;
    let cycle_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = serde_json::json!({
        "reviewer_id": alice.id,
        "reviewee_id": alice.id,
        "relationship_type": "peer",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/cycles/{cycle_id}/assignments"),
        body,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
