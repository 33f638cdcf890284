//! # API REST
//!
//! REST API for MetaRisk.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Mapping engine and store errors onto status codes
//!
//! Uses `api-shared` for the request and response bodies. The engine is called synchronously
//! inside the handlers; one assessment is a handful of table lookups.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AssessmentRes, CalculateAssessmentReq, CreateAssessmentReq, HealthGuideRes, HealthRes,
    HealthService, ListAssessmentsQuery, ListAssessmentsRes, Pagination,
};
use metarisk_core::{AssessmentResult, RiskEngine};
use metarisk_store::{FileAssessmentStore, RecordId, StoreError, DEFAULT_PAGE_LIMIT};
use metarisk_types::CustomerId;

/// Status code plus plain-text message returned by failing handlers.
pub type ApiError = (StatusCode, String);

/// Shared state for the REST handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RiskEngine>,
    store: Arc<FileAssessmentStore>,
}

impl AppState {
    pub fn new(engine: RiskEngine, store: FileAssessmentStore) -> Self {
        Self {
            engine: Arc::new(engine),
            store: Arc::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        create_assessment,
        calculate_assessment,
        get_assessment,
        list_customer_assessments,
        create_health_guide,
    ),
    components(schemas(
        HealthRes,
        CreateAssessmentReq,
        CalculateAssessmentReq,
        AssessmentRes,
        ListAssessmentsRes,
        Pagination,
        HealthGuideRes,
    ))
)]
pub struct ApiDoc;

/// Builds the application router, Swagger UI included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assessments", post(create_assessment))
        .route("/assessments/calculate", post(calculate_assessment))
        .route("/assessments/:id", get(get_assessment))
        .route("/assessments/:id/guide", post(create_health_guide))
        .route(
            "/customers/:customer_id/assessments",
            get(list_customer_assessments),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves the router until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Starting MetaRisk REST API on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/assessments",
    request_body = CreateAssessmentReq,
    responses(
        (status = 201, description = "Assessment calculated and stored", body = AssessmentRes),
        (status = 400, description = "Invalid patient input or customer id"),
        (status = 500, description = "Internal server error")
    )
)]
/// Scores the submitted record and persists the result.
///
/// The customer id, when present, is validated before anything is scored.
#[axum::debug_handler]
async fn create_assessment(
    State(state): State<AppState>,
    Json(req): Json<CreateAssessmentReq>,
) -> Result<(StatusCode, Json<AssessmentRes>), ApiError> {
    let customer_id = req.customer_id.as_deref().map(parse_customer_id).transpose()?;

    let result = state
        .engine
        .assess(&req.input_data)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let stored = state
        .store
        .save(result, customer_id)
        .map_err(|e| store_error("create_assessment", e))?;

    tracing::info!(
        assessment_id = %stored.assessment_id,
        level = %stored.output_data.overall_level,
        "assessment stored"
    );

    Ok((StatusCode::CREATED, Json(stored.into())))
}

#[utoipa::path(
    post,
    path = "/assessments/calculate",
    request_body = CalculateAssessmentReq,
    responses(
        (status = 200, description = "Assessment result; nothing is stored"),
        (status = 400, description = "Invalid patient input")
    )
)]
/// Scores the submitted record without persisting it.
#[axum::debug_handler]
async fn calculate_assessment(
    State(state): State<AppState>,
    Json(req): Json<CalculateAssessmentReq>,
) -> Result<Json<AssessmentResult>, ApiError> {
    state
        .engine
        .assess(&req.input_data)
        .map(Json)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

#[utoipa::path(
    get,
    path = "/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment id, 32 lowercase hex characters")
    ),
    responses(
        (status = 200, description = "Stored assessment", body = AssessmentRes),
        (status = 400, description = "Malformed assessment id"),
        (status = 404, description = "Assessment not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetches one stored assessment.
#[axum::debug_handler]
async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssessmentRes>, ApiError> {
    let id = parse_assessment_id(&id)?;
    let stored = state
        .store
        .load(&id)
        .map_err(|e| store_error("get_assessment", e))?;
    Ok(Json(stored.into()))
}

#[utoipa::path(
    get,
    path = "/customers/{customer_id}/assessments",
    params(
        ("customer_id" = String, Path, description = "Customer id"),
        ListAssessmentsQuery
    ),
    responses(
        (status = 200, description = "Customer assessments, newest first", body = ListAssessmentsRes),
        (status = 400, description = "Malformed customer id"),
        (status = 500, description = "Internal server error")
    )
)]
/// Lists a customer's assessments, newest first.
#[axum::debug_handler]
async fn list_customer_assessments(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Query(query): Query<ListAssessmentsQuery>,
) -> Result<Json<ListAssessmentsRes>, ApiError> {
    let customer_id = parse_customer_id(&customer_id)?;
    let (limit, skip) = query.resolve(DEFAULT_PAGE_LIMIT);
    let page = state
        .store
        .list_for_customer(&customer_id, limit, skip)
        .map_err(|e| store_error("list_customer_assessments", e))?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/assessments/{id}/guide",
    params(
        ("id" = String, Path, description = "Assessment id, 32 lowercase hex characters")
    ),
    responses(
        (status = 201, description = "Health guide rendered and stored", body = HealthGuideRes),
        (status = 400, description = "Malformed assessment id"),
        (status = 404, description = "Assessment not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Renders the Markdown health guide for a stored assessment.
#[axum::debug_handler]
async fn create_health_guide(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<HealthGuideRes>), ApiError> {
    let id = parse_assessment_id(&id)?;
    let guide = state
        .store
        .create_guide(&id)
        .map_err(|e| store_error("create_health_guide", e))?;
    Ok((StatusCode::CREATED, Json(guide.into())))
}

fn parse_assessment_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    CustomerId::new(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid customer id: {e}"),
        )
    })
}

fn store_error(operation: &str, err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            format!("Assessment not found: {id}"),
        ),
        StoreError::InvalidId(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        other => {
            tracing::error!("{} error: {:?}", operation, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app() -> (TempDir, Router) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileAssessmentStore::open(temp_dir.path()).unwrap();
        let state = AppState::new(RiskEngine::default(), store);
        (temp_dir, router(state))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn as_json(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_alive() {
        let (_dir, app) = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body)["ok"], json!(true));
    }

    #[tokio::test]
    async fn calculate_returns_result_without_storing() {
        let (dir, app) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/assessments/calculate",
            Some(json!({ "inputData": { "age": 40, "sex": "male" } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = as_json(&body);
        assert_eq!(result["overallRiskLevel"], json!("LOW"));
        assert_eq!(result["calculationVersion"], json!("v4.0.0"));

        let stored = std::fs::read_dir(dir.path().join("assessments"))
            .unwrap()
            .count();
        assert_eq!(stored, 0);
    }

    #[tokio::test]
    async fn create_then_fetch_assessment() {
        let (_dir, app) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/assessments",
            Some(json!({
                "customerId": "cust-1",
                "inputData": { "age": 60, "sex": "female", "systolicBP": 150, "diastolicBP": 95 }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created = as_json(&body);
        let id = created["assessmentId"].as_str().unwrap().to_string();
        assert_eq!(id.len(), 32);
        assert_eq!(created["customerId"], json!("cust-1"));

        let (status, body) = send(&app, "GET", &format!("/assessments/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(as_json(&body), created);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request_with_message() {
        let (_dir, app) = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/assessments",
            Some(json!({ "inputData": { "age": 150, "sex": "male" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("between 0 and 120"));

        let (status, _) = send(
            &app,
            "POST",
            "/assessments/calculate",
            Some(json!({ "inputData": { "age": 40 } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_customer_id_is_rejected() {
        let (_dir, app) = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/assessments",
            Some(json!({ "customerId": "  ", "inputData": { "age": 40, "sex": "male" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_and_unknown_ids() {
        let (_dir, app) = test_app();
        let (status, _) = send(&app, "GET", "/assessments/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/assessments/550e8400e29b41d4a716446655440000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/assessments/550e8400e29b41d4a716446655440000/guide",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_customer_assessments_with_pagination() {
        let (_dir, app) = test_app();
        for age in [30, 45, 60] {
            let (status, _) = send(
                &app,
                "POST",
                "/assessments",
                Some(json!({
                    "customerId": "cust-7",
                    "inputData": { "age": age, "sex": "male" }
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        send(
            &app,
            "POST",
            "/assessments",
            Some(json!({
                "customerId": "someone-else",
                "inputData": { "age": 50, "sex": "female" }
            })),
        )
        .await;

        let (status, body) = send(
            &app,
            "GET",
            "/customers/cust-7/assessments?limit=2&skip=0",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let page = as_json(&body);
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["pagination"], json!({ "total": 3, "limit": 2, "skip": 0 }));

        let (_, body) = send(
            &app,
            "GET",
            "/customers/cust-7/assessments?skip=2",
            None,
        )
        .await;
        let page = as_json(&body);
        assert_eq!(page["items"].as_array().unwrap().len(), 1);
        assert_eq!(page["pagination"]["limit"], json!(10));
    }

    #[tokio::test]
    async fn guide_is_rendered_for_stored_assessment() {
        let (_dir, app) = test_app();
        let (_, body) = send(
            &app,
            "POST",
            "/assessments",
            Some(json!({ "inputData": { "age": 55, "sex": "male", "hasDiabetes": true } })),
        )
        .await;
        let id = as_json(&body)["assessmentId"].as_str().unwrap().to_string();

        let uri = format!("/assessments/{id}/guide");
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::CREATED);
        let guide = as_json(&body);
        assert_eq!(guide["assessmentId"], json!(id));
        assert_eq!(guide["title"], json!("Personal Health Management Guide"));
        assert!(guide["content"].as_str().unwrap().contains(&id));
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/assessments",
            "/assessments/calculate",
            "/assessments/{id}",
            "/assessments/{id}/guide",
            "/customers/{customer_id}/assessments",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
