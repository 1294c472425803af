//! # Calculator Service
//!
//! A small HTTP service that applies one of four arithmetic operations to two
//! query-string operands:
//!
//! ```text
//! GET /add?num1=2&num2=3      -> 200 {"statuscode":200,"data":5}
//! GET /divide?num1=1&num2=0   -> 500 {"statuscode":500,"msg":"Cannot divide by zero"}
//! ```
//!
//! Each request flows through [`validation::validate`] and then
//! [`dispatch::dispatch`]; both report to the [`journal::OperationJournal`]
//! held by [`AppState`].

use axum::{routing::get, Router};
use service_kit::{default_cors_layer, swagger_router};
use std::sync::Arc;
use utoipa::OpenApi;

pub mod dispatch;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod journal;
pub mod openapi;
pub mod operation;
pub mod validation;

use dtos::OperandQuery;
use error::OperationOutcome;
use journal::OperationJournal;

pub const SERVICE_NAME: &str = "calculator-microservice";

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    journal: Arc<dyn OperationJournal>,
}

impl AppState {
    pub fn new(journal: Arc<dyn OperationJournal>) -> Self {
        Self { journal }
    }

    pub fn journal(&self) -> &dyn OperationJournal {
        self.journal.as_ref()
    }

    /// Validates the operands, then dispatches. Validation always runs first,
    /// so bad operands are reported as such even for an unknown operation.
    pub fn evaluate(&self, operation: &str, operands: &OperandQuery) -> OperationOutcome {
        let request = validation::validate(operands, self.journal())?;
        dispatch::dispatch(operation, request, self.journal())
    }
}

/// Builds the full application: calculator routes, Swagger UI and CORS.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/", get(handlers::usage))
        .route("/{operation}", get(handlers::calculate))
        .route("/{operation}/", get(handlers::calculate))
        .fallback(handlers::not_found)
        .with_state(state);

    api.merge(swagger_router(openapi::ApiDoc::openapi()))
        .layer(default_cors_layer())
}
