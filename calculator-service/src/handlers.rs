use crate::dtos::{OperandQuery, ResultEnvelope};
use crate::error::CalcError;
use crate::journal::JournalEvent;
use crate::operation::Operation;
use crate::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};

pub const USAGE_BANNER: &str = "Welcome to the Calculator Microservice. Use /add, /subtract, /multiply, or /divide with ?num1=number&num2=number";

/// Usage banner
///
/// Plain-text description of how to call the service.
#[utoipa::path(
    get,
    path = "/",
    tag = "Calculator",
    responses(
        (status = 200, description = "Usage banner", body = String, content_type = "text/plain")
    )
)]
pub async fn usage() -> &'static str {
    USAGE_BANNER
}

/// Apply an arithmetic operation
///
/// Validates `num1` and `num2`, then applies the operation named by the path.
#[utoipa::path(
    get,
    path = "/{operation}",
    tag = "Calculator",
    params(
        ("operation" = Operation, Path, description = "One of add, subtract, multiply, divide"),
        OperandQuery
    ),
    responses(
        (status = 200, description = "Computed value", body = ResultEnvelope),
        (status = 400, description = "num1 or num2 is not a valid number", body = ResultEnvelope),
        (status = 404, description = "Unknown operation", body = ResultEnvelope),
        (status = 500, description = "The computation failed, e.g. division by zero", body = ResultEnvelope)
    )
)]
pub async fn calculate(
    State(state): State<AppState>,
    operation: Result<Path<String>, PathRejection>,
    uri: Uri,
    RawQuery(query): RawQuery,
) -> Response {
    // A segment that does not decode to UTF-8 cannot name an operation; keep it raw.
    let operation = match operation {
        Ok(Path(operation)) => operation,
        Err(_) => uri.path().trim_matches('/').to_string(),
    };
    let operands = OperandQuery::from_query_string(query.as_deref());
    match state.evaluate(&operation, &operands) {
        Ok(value) => ResultEnvelope::success(value).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Anything that is not `/` or a single operation segment.
pub async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    state
        .journal()
        .record(&JournalEvent::OperationNotFound { operation: path });
    CalcError::UnknownOperation(path.to_string()).into_response()
}
