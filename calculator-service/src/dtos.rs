use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

/// Largest magnitude below which every integer is exactly representable in an `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Raw operands as they arrived in the query string.
///
/// Values are kept as text so that rejections can be logged verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OperandQuery {
    /// First operand, e.g. `2` or `-1.5e3`.
    pub num1: Option<String>,
    /// Second operand.
    pub num2: Option<String>,
}

impl OperandQuery {
    /// Extracts `num1`/`num2` from a raw query string.
    ///
    /// A key given more than once keeps all of its values joined with `,`
    /// (so `num1=1&num1=2` becomes `"1,2"`, which never parses as a number).
    /// An undecodable query yields no operands at all.
    pub fn from_query_string(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = match query {
            Some(q) => serde_urlencoded::from_str(q).unwrap_or_default(),
            None => Vec::new(),
        };

        let mut operands = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "num1" => &mut operands.num1,
                "num2" => &mut operands.num2,
                _ => continue,
            };
            if let Some(existing) = slot.as_mut() {
                existing.push(',');
                existing.push_str(&value);
            } else {
                *slot = Some(value);
            }
        }
        operands
    }
}

/// The result envelope returned for every operation request.
///
/// Exactly one of `data` (success) and `msg` (failure) is present.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultEnvelope {
    /// Mirrors the HTTP status code of the response.
    #[schema(example = 200)]
    pub statuscode: u16,
    /// Computed value.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_number"
    )]
    #[schema(value_type = Option<f64>, example = 5)]
    pub data: Option<f64>,
    /// Error description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ResultEnvelope {
    pub fn success(value: f64) -> Self {
        Self {
            statuscode: StatusCode::OK.as_u16(),
            data: Some(value),
            msg: None,
        }
    }

    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            statuscode: status.as_u16(),
            data: None,
            msg: Some(msg.into()),
        }
    }
}

impl IntoResponse for ResultEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.statuscode).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// Integral values go out as JSON integers (`5`, not `5.0`); non-finite ones become `null`.
fn serialize_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER => {
            serializer.serialize_i64(v as i64)
        }
        Some(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => serializer.serialize_none(),
    }
}
