use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::models::{HealthResponse, SolveRequest, SolveResponse};
use crate::service::SolveService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SolveService>,
    pub solver_path: String,
}

/// Any origin unless one is configured.
pub fn cors_layer(allow_origin: Option<HeaderValue>) -> CorsLayer {
    match allow_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([axum::http::header::CONTENT_TYPE])
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/solve", post(solve))
        .with_state(state)
        .layer(cors)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        solver_path: state.solver_path.clone(),
    })
}

/// Always answers 200; failures travel in the `solution` field.
pub async fn solve(
    State(state): State<AppState>,
    payload: Result<Json<SolveRequest>, JsonRejection>,
) -> Json<SolveResponse> {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected solve payload");
            return Json(SolveResponse::error(rejection.body_text()));
        }
    };

    let outcome = state.service.solve(request.facelets()).await;
    Json(SolveResponse::from(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineStatus;
    use crate::service::tests::MockEngine;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const SOLVER_PATH: &str = "/opt/solver/rubiks_solver";

    fn app(engine: Arc<MockEngine>) -> Router {
        let state = AppState {
            service: Arc::new(SolveService::new(engine)),
            solver_path: SOLVER_PATH.to_string(),
        };
        router(state, cors_layer(None))
    }

    fn post_solve(body: &str) -> Request<Body> {
        Request::post("/solve")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_solver_path() {
        let request = Request::get("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app(Arc::new(MockEngine::replying("U")))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "online", "solver_path": SOLVER_PATH}));
    }

    #[tokio::test]
    async fn solve_end_to_end_with_stub_engine() {
        let engine = Arc::new(MockEngine::replying("U\n"));
        let body = json!({ "state": vec![0; 54] }).to_string();

        let (status, value) = send(app(engine.clone()), post_solve(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(engine.seen.lock().unwrap().as_slice(), ["W".repeat(54)]);
        assert_eq!(value["solution"], "U");
        assert_eq!(value["depth"], 1);
        assert_eq!(value["nodes"], "15");
        assert!(value["time"].is_f64());
    }

    #[tokio::test]
    async fn engine_failure_is_still_success_shaped() {
        let engine = MockEngine::with_output(EngineStatus::Exited(Some(0)), "[DEBUG] test scramble\n");
        let body = json!({ "state": vec![2; 54] }).to_string();

        let (status, value) = send(app(Arc::new(engine)), post_solve(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({"solution": "Error: Invalid Output from Solver"}));
    }

    #[tokio::test]
    async fn invalid_json_is_folded_into_solution() {
        let engine = Arc::new(MockEngine::replying("U"));

        let (status, value) = send(app(engine.clone()), post_solve("{\"state\": [0, 1")).await;

        assert_eq!(status, StatusCode::OK);
        let solution = value["solution"].as_str().unwrap();
        assert!(solution.starts_with("Error: "), "got {solution}");
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert!(engine.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_content_type_is_folded_into_solution() {
        let request = Request::post("/solve")
            .body(Body::from(r#"{"state": [0]}"#))
            .unwrap();

        let (status, value) = send(app(Arc::new(MockEngine::replying("U"))), request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(value["solution"].as_str().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn non_integer_state_elements_become_white() {
        let engine = Arc::new(MockEngine::replying("R"));

        let (status, value) = send(
            app(engine.clone()),
            post_solve(r#"{"state": [1, "x", null, 3.0, true, 9]}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(engine.seen.lock().unwrap().as_slice(), ["GWWBGW".to_string()]);
        assert_eq!(value["solution"], "R");
    }

    #[tokio::test]
    async fn missing_state_sends_empty_argument() {
        let engine = Arc::new(MockEngine::replying("Error: bad cube"));

        let (status, value) = send(app(engine.clone()), post_solve("{}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(engine.seen.lock().unwrap().as_slice(), [String::new()]);
        assert_eq!(value, json!({"solution": "Error: Invalid Output from Solver"}));
    }
}
