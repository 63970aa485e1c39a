//! HTTP management API.
//!
//! Provides endpoints for:
//! - Node registration and health (`/nodes`, `/nodes/:id`)
//! - Task submission and status (`/tasks`, `/tasks/:id`)
//! - Ad-hoc placement (`/schedule`)
//! - Health check (`/health`)
//! - Prometheus metrics (`/metrics`)

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod handlers;
pub mod responses;

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Node routes
        .route("/nodes", get(handlers::list_nodes).post(handlers::register_node))
        .route("/nodes/:id", put(handlers::update_node))
        // Task routes
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/tasks/:id",
            get(handlers::get_task).put(handlers::update_task),
        )
        .route("/schedule", post(handlers::schedule_task))
        // Observability routes
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use orchestrator_core::{FirstAvailable, RoundRobin, SchedulingPolicy};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app_with(policy: Arc<dyn SchedulingPolicy>) -> Router {
        create_router(AppState::in_memory(policy))
    }

    fn app() -> Router {
        app_with(Arc::new(FirstAvailable))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_and_list_nodes() {
        let app = app();
        let (status, body) =
            call(&app, Method::POST, "/nodes", Some(json!({ "id": "node-2" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["healthy"], true);

        call(&app, Method::POST, "/nodes", Some(json!({ "id": "node-1", "healthy": false }))).await;

        let (status, body) = call(&app, Method::GET, "/nodes", None).await;
        assert_eq!(status, StatusCode::OK);
        let nodes = body.as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["id"], "node-1");
        assert_eq!(nodes[0]["healthy"], false);
    }

    #[tokio::test]
    async fn test_duplicate_node_is_conflict() {
        let app = app();
        call(&app, Method::POST, "/nodes", Some(json!({ "id": "node-1" }))).await;
        let (status, body) =
            call(&app, Method::POST, "/nodes", Some(json!({ "id": "node-1" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("node-1"));
    }

    #[tokio::test]
    async fn test_empty_node_id_is_bad_request() {
        let (status, _) = call(&app(), Method::POST, "/nodes", Some(json!({ "id": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_node_health() {
        let app = app();
        call(&app, Method::POST, "/nodes", Some(json!({ "id": "node-1" }))).await;

        let (status, body) = call(
            &app,
            Method::PUT,
            "/nodes/node-1",
            Some(json!({ "healthy": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], false);

        let (status, _) = call(
            &app,
            Method::PUT,
            "/nodes/missing",
            Some(json!({ "healthy": true })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_node_ids_are_trimmed_on_every_route() {
        let app = app();
        let (status, body) =
            call(&app, Method::POST, "/nodes", Some(json!({ "id": " node-1 " }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "node-1");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/nodes/node-1",
            Some(json!({ "healthy": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &app,
            Method::PUT,
            "/nodes/%20node-1%20",
            Some(json!({ "healthy": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "node-1");
        assert_eq!(body["healthy"], true);

        let (status, _) = call(
            &app,
            Method::PUT,
            "/nodes/%20",
            Some(json!({ "healthy": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_ids_are_trimmed_on_every_route() {
        let app = app();
        call(&app, Method::POST, "/tasks", Some(json!({ "id": " task-1 " }))).await;

        let (status, body) = call(&app, Method::GET, "/tasks/%20task-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "task-1");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/tasks/task-1%20",
            Some(json!({ "status": "failed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            call(&app, Method::POST, "/schedule", Some(json!({ "id": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let app = app();
        let (status, body) =
            call(&app, Method::POST, "/tasks", Some(json!({ "id": "task-1" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");

        let (status, body) = call(
            &app,
            Method::PUT,
            "/tasks/task-1",
            Some(json!({ "status": "completed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");

        let (status, body) = call(&app, Method::GET, "/tasks/task-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "completed");

        let (status, _) = call(&app, Method::GET, "/tasks/task-2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_task_generates_id() {
        let app = app();
        let (status, body) = call(&app, Method::POST, "/tasks", Some(json!({}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(!body["id"].as_str().unwrap().is_empty());

        let (_, body) = call(&app, Method::GET, "/tasks", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected() {
        let (status, _) = call(
            &app(),
            Method::POST,
            "/tasks",
            Some(json!({ "id": "task-1", "status": "exploded" })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_schedule_without_nodes_is_unavailable() {
        let (status, body) =
            call(&app(), Method::POST, "/schedule", Some(json!({ "id": "task-1" }))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("task-1"));
    }

    #[tokio::test]
    async fn test_schedule_uses_injected_policy() {
        let app = app_with(Arc::new(RoundRobin::new()));
        for id in ["node-1", "node-2", "node-3"] {
            call(&app, Method::POST, "/nodes", Some(json!({ "id": id }))).await;
        }
        call(
            &app,
            Method::PUT,
            "/nodes/node-2",
            Some(json!({ "healthy": false })),
        )
        .await;

        let mut picked = Vec::new();
        for _ in 0..3 {
            let (status, body) =
                call(&app, Method::POST, "/schedule", Some(json!({ "id": "task-1" }))).await;
            assert_eq!(status, StatusCode::OK);
            picked.push(body["assigned_node"].as_str().unwrap().to_string());
        }
        assert_eq!(picked, ["node-1", "node-3", "node-1"]);

        // Ad-hoc placement leaves the task registry untouched.
        let (_, body) = call(&app, Method::GET, "/tasks", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = app();
        call(&app, Method::POST, "/tasks", Some(json!({ "id": "task-1" }))).await;

        let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("orchestrator_tasks{status=\"pending\"} 1"));
    }
}
