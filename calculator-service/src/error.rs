use crate::dtos::ResultEnvelope;
use crate::operation::ComputationError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const INVALID_INPUT_MSG: &str = "Both num1 and num2 must be valid numbers";
pub const OPERATION_NOT_FOUND_MSG: &str =
    "Operation not found. Use add, subtract, multiply, or divide.";

/// Every way a calculation request can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// `num1` or `num2` was missing or not a finite number.
    #[error("Both num1 and num2 must be valid numbers")]
    InvalidInput {
        num1: Option<String>,
        num2: Option<String>,
    },

    #[error("Operation not found. Use add, subtract, multiply, or divide.")]
    UnknownOperation(String),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

pub type OperationOutcome = std::result::Result<f64, CalcError>;

impl CalcError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CalcError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            CalcError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            CalcError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_envelope(&self) -> ResultEnvelope {
        ResultEnvelope::error(self.status_code(), self.to_string())
    }
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        self.to_envelope().into_response()
    }
}
