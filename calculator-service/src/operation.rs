//! The fixed table of arithmetic operations.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// One of the four operations the service exposes, selected by path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// A failure raised while computing, as opposed to a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputationError {
    #[error("Cannot divide by zero")]
    DivisionByZero,
}

/// The path segment did not name any known operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Applies the operation to `a` and `b`.
    ///
    /// Only `Divide` can fail; a zero divisor (either sign) never yields a number.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ComputationError> {
        match self {
            Operation::Add => Ok(a + b),
            Operation::Subtract => Ok(a - b),
            Operation::Multiply => Ok(a * b),
            Operation::Divide => {
                if b == 0.0 {
                    Err(ComputationError::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
