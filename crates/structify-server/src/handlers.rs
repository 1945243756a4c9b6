//! HTTP request handlers for the structuring service.
//!
//! Implements the structuring, schema-synthesis, and health endpoints
//! using axum. Every request gets a v7 UUID that tags its tracing span
//! and any error body, so failures in logs line up with client reports.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use structify_engine::{Engine, EngineError, StructureMetadata, StructureRequest};
use structify_llm::CompletionProvider;
use structify_validator::ValidatorError;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// Shared application state
pub struct AppState<P: CompletionProvider> {
    /// The extraction engine
    pub engine: Arc<Engine<P>>,
}

impl<P: CompletionProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

/// Structuring request body
#[derive(Debug, Deserialize)]
pub struct StructureBody {
    /// Unstructured text to extract from
    pub text: String,

    /// Template document describing the desired output shape
    pub template: Value,

    /// Optional separator-delimited examples document
    #[serde(default)]
    pub examples: Option<String>,

    /// Optional schema name override
    #[serde(default)]
    pub schema_name: Option<String>,
}

/// Structuring response body
#[derive(Debug, Serialize, Deserialize)]
pub struct StructureResponse {
    /// Request identifier, matching the server logs
    pub request_id: String,

    /// The validated structured document
    pub document: Value,

    /// Metadata about the run
    pub metadata: StructureMetadata,
}

/// Schema synthesis request body
#[derive(Debug, Deserialize)]
pub struct SchemaBody {
    /// Template document to convert
    pub template: Value,

    /// Optional schema name override
    #[serde(default)]
    pub schema_name: Option<String>,
}

/// Schema synthesis response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaResponse {
    /// Request identifier, matching the server logs
    pub request_id: String,

    /// The synthesized response format envelope
    pub response_format: Value,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall service status
    pub status: String,

    /// Model configured for extraction
    pub model: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Request identifier, matching the server logs
    pub request_id: String,

    /// Error message
    pub error: String,
}

/// Application error carrying the request id for the error body
pub struct AppError {
    request_id: Uuid,
    error: EngineError,
}

impl AppError {
    fn new(request_id: Uuid, error: EngineError) -> Self {
        Self { request_id, error }
    }

    fn status(&self) -> StatusCode {
        match &self.error {
            // The caller can fix the template or feed the violation
            // detail into a retry.
            EngineError::Template(_) | EngineError::TextTooLong(_, _) => StatusCode::BAD_REQUEST,
            EngineError::Validation(ValidatorError::InvalidDocument { .. }) => {
                StatusCode::BAD_REQUEST
            }
            // InvalidSchema/Unexpected mean the synthesizer or validator
            // misbehaved, not the caller.
            EngineError::Validation(_) | EngineError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            EngineError::Llm(_) | EngineError::MalformedDocument(_) => StatusCode::BAD_GATEWAY,
            EngineError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.error.to_string();
        error!(request_id = %self.request_id, "Request failed: {}", message);

        let body = Json(ErrorResponse {
            request_id: self.request_id.to_string(),
            error: message,
        });
        (status, body).into_response()
    }
}

/// POST /v1/structure - run the full extraction pipeline
async fn structure_text<P: CompletionProvider + 'static>(
    State(state): State<AppState<P>>,
    Json(body): Json<StructureBody>,
) -> Result<Json<StructureResponse>, AppError> {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("structure", %request_id);

    let request = StructureRequest {
        text: body.text,
        template: body.template,
        examples: body.examples,
        schema_name: body.schema_name,
    };

    let outcome = state
        .engine
        .structure(request)
        .instrument(span)
        .await
        .map_err(|e| AppError::new(request_id, e))?;

    info!(%request_id, "Structured document produced");

    Ok(Json(StructureResponse {
        request_id: request_id.to_string(),
        document: outcome.document,
        metadata: outcome.metadata,
    }))
}

/// POST /v1/schema - synthesize a response format without calling the LLM
async fn synthesize_schema<P: CompletionProvider + 'static>(
    State(state): State<AppState<P>>,
    Json(body): Json<SchemaBody>,
) -> Result<Json<SchemaResponse>, AppError> {
    let request_id = Uuid::now_v7();

    let format = state
        .engine
        .response_format_for(&body.template, body.schema_name.as_deref())
        .map_err(|e| AppError::new(request_id, e))?;

    let response_format =
        serde_json::to_value(&format).map_err(|e| AppError::new(request_id, e.into()))?;

    Ok(Json(SchemaResponse {
        request_id: request_id.to_string(),
        response_format,
    }))
}

/// GET /health - liveness check
async fn health_check<P: CompletionProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.engine.model_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<P: CompletionProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health_check::<P>))
        .route("/v1/structure", post(structure_text::<P>))
        .route("/v1/schema", post(synthesize_schema::<P>))
        .with_state(state)
}
