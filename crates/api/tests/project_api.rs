//! HTTP-level integration tests for the `/api/projects` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Tests that need realistic data run
//! against the seeded demo store.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json};
use taskdeck_store::MemoryStore;

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_project_returns_201() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = post_json(
        app,
        "/api/projects",
        serde_json::json!({"name": "Test Project"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Test Project");
    assert_eq!(json["status"], "active");
    assert!(json["id"].is_string());
    assert!(json["createdAt"].is_string());
    // No description was sent, so the field is omitted entirely.
    assert!(json.get("description").is_none());
}

#[tokio::test]
async fn test_create_project_with_description() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = post_json(
        app,
        "/api/projects",
        serde_json::json!({"name": "Documented", "description": "Has a description"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["description"], "Has a description");
}

#[tokio::test]
async fn test_get_project_by_id() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp = post_json(app, "/api/projects", serde_json::json!({"name": "Get Me"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store);
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Get Me");
}

#[tokio::test]
async fn test_get_nonexistent_project_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Project with id 999999 not found");
}

#[tokio::test]
async fn test_update_project() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp =
        post_json(app, "/api/projects", serde_json::json!({"name": "Original"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store);
    let response = patch_json(
        app,
        &format!("/api/projects/{id}"),
        serde_json::json!({"name": "Updated"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Updated");
    // Fields not present in the patch are untouched.
    assert_eq!(json["status"], "active");
}

#[tokio::test]
async fn test_update_project_status() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp =
        post_json(app, "/api/projects", serde_json::json!({"name": "Ship It"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store);
    let response = patch_json(
        app,
        &format!("/api/projects/{id}"),
        serde_json::json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["name"], "Ship It");
}

#[tokio::test]
async fn test_update_nonexistent_project_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = patch_json(
        app,
        "/api/projects/999999",
        serde_json::json!({"name": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_returns_success_body() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp =
        post_json(app, "/api/projects", serde_json::json!({"name": "Delete Me"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store.clone());
    let response = delete(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    // Subsequent GET should 404.
    let app = common::build_test_app(store);
    let response = get(app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_nonexistent_project_returns_404() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = delete(app, "/api/projects/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_cascades_to_its_tasks() {
    let store = Arc::new(MemoryStore::seeded().await);

    // Project 1 carries seeded tasks 101..104.
    let app = common::build_test_app(store.clone());
    let response = get(app, "/api/tasks/101").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(store.clone());
    let response = delete(app, "/api/projects/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(store.clone());
    let response = get(app, "/api/tasks/101").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Tasks of other projects survive.
    let app = common::build_test_app(store);
    let response = get(app, "/api/tasks/105").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Listing, filtering, pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_projects_paginates_with_defaults() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["projects"].as_array().unwrap().len(), 10);
    assert_eq!(json["total"], 12);
    assert_eq!(json["page"], 1);
    assert_eq!(json["pageSize"], 10);
    assert_eq!(json["totalPages"], 2);
}

#[tokio::test]
async fn test_list_projects_second_page_holds_the_remainder() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?page=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["projects"].as_array().unwrap().len(), 2);
    assert_eq!(json["page"], 2);
    assert_eq!(json["total"], 12);
}

#[tokio::test]
async fn test_list_projects_page_past_the_end_is_empty() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?page=99").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["projects"].as_array().unwrap().is_empty());
    assert_eq!(json["total"], 12);
    assert_eq!(json["page"], 99);
}

#[tokio::test]
async fn test_list_projects_custom_page_size() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?pageSize=5").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["projects"].as_array().unwrap().len(), 5);
    assert_eq!(json["pageSize"], 5);
    assert_eq!(json["totalPages"], 3);
}

#[tokio::test]
async fn test_list_projects_preserves_insertion_order() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?pageSize=3").await;

    let json = body_json(response).await;
    let projects = json["projects"].as_array().unwrap();
    assert_eq!(projects[0]["name"], "Website Redesign");
    assert_eq!(projects[1]["name"], "Mobile App Development");
    assert_eq!(projects[2]["name"], "API Integration");
}

#[tokio::test]
async fn test_list_projects_filters_by_status() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?status=completed").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 4);
    let projects = json["projects"].as_array().unwrap();
    assert!(projects.iter().all(|p| p["status"] == "completed"));
}

#[tokio::test]
async fn test_list_projects_status_all_matches_everything() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?status=all").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 12);
}

#[tokio::test]
async fn test_list_projects_searches_name_and_description() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    // "migration" appears in the "Database Migration" name and in the
    // "API Integration" description.
    let response = get(app, "/api/projects?search=migration").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    let names: Vec<&str> = json["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"API Integration"));
    assert!(names.contains(&"Database Migration"));
}

#[tokio::test]
async fn test_list_projects_combines_search_and_status() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?search=migration&status=active").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["projects"][0]["name"], "Database Migration");
}

#[tokio::test]
async fn test_list_projects_rejects_unknown_status() {
    let store = Arc::new(MemoryStore::seeded().await);
    let app = common::build_test_app(store);
    let response = get(app, "/api/projects?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Invalid project status"));
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_project_rejects_short_name() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = post_json(app, "/api/projects", serde_json::json!({"name": "A"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Project name must be at least 2 characters");
}

#[tokio::test]
async fn test_create_project_rejects_missing_name() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = post_json(app, "/api/projects", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_project_rejects_oversized_description() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store);
    let response = post_json(
        app,
        "/api/projects",
        serde_json::json!({"name": "Valid", "description": "x".repeat(501)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("must not exceed 500"));
}

#[tokio::test]
async fn test_update_project_rejects_invalid_status() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp = post_json(app, "/api/projects", serde_json::json!({"name": "Patchy"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store);
    let response = patch_json(
        app,
        &format!("/api/projects/{id}"),
        serde_json::json!({"status": "paused"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Invalid project status"));
}

#[tokio::test]
async fn test_update_project_rejects_short_name() {
    let store = Arc::new(MemoryStore::new());
    let app = common::build_test_app(store.clone());
    let create_resp = post_json(app, "/api/projects", serde_json::json!({"name": "Patchy"})).await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(store);
    let response = patch_json(
        app,
        &format!("/api/projects/{id}"),
        serde_json::json!({"name": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
