//! Callback body extraction.
//!
//! Operators post either JSON or URL-encoded forms, and the same field may
//! arrive as a string in one and a number in the other (`"rssi": "-120.00"`
//! vs `"rssi": -120`). Fields are coerced rather than rejected: text fields
//! take any scalar, integer fields take anything that parses as a number and
//! fall back to null otherwise.

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};

use sigbox_domain::record::Telemetry;

use crate::error::ErrorBody;

/// Largest callback body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Extractor turning a JSON or form body into [`Telemetry`].
///
/// An empty body, or one in any other format, yields empty telemetry.
#[derive(Debug)]
pub struct CallbackPayload(pub Telemetry);

impl<S> FromRequest<S> for CallbackPayload
where
    S: Send + Sync,
{
    type Rejection = CallbackRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body_kind = BodyKind::of(
            req.headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(CallbackRejection::Body)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Telemetry::default()));
        }

        let req = axum::http::Request::from_parts(parts, Body::from(bytes));
        let wire = match body_kind {
            BodyKind::Json => {
                let Json(wire) = Json::<WireTelemetry>::from_request(req, state).await?;
                wire
            }
            BodyKind::Form => {
                let Form(wire) = Form::<WireTelemetry>::from_request(req, state).await?;
                wire
            }
            BodyKind::Other => {
                tracing::warn!(
                    content_type = ?req.headers().get(header::CONTENT_TYPE),
                    "callback body in an unsupported format, storing it without fields"
                );
                WireTelemetry::default()
            }
        };

        Ok(Self(wire.into()))
    }
}

/// How a callback body is decoded, decided by its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|value| value.split(';').next())
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if mime == "application/json" || mime.ends_with("+json") {
            Self::Json
        } else if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

/// Reasons a callback body could not be decoded.
#[derive(Debug)]
pub enum CallbackRejection {
    /// The body could not be read (connection error or too large).
    Body(axum::Error),
    /// The body claimed to be JSON but was not a JSON object.
    Json(JsonRejection),
    /// The body was not a valid URL-encoded form.
    Form(FormRejection),
}

impl From<JsonRejection> for CallbackRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self::Json(rejection)
    }
}

impl From<FormRejection> for CallbackRejection {
    fn from(rejection: FormRejection) -> Self {
        Self::Form(rejection)
    }
}

impl IntoResponse for CallbackRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Body(err) => (
                StatusCode::BAD_REQUEST,
                format!("failed to read request body: {err}"),
            ),
            Self::Json(rejection) => (rejection.status(), rejection.body_text()),
            Self::Form(rejection) => (rejection.status(), rejection.body_text()),
        };
        tracing::warn!(%status, reason = %message, "callback rejected");

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Callback fields as they appear on the wire.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTelemetry {
    #[serde(default, deserialize_with = "lenient_text")]
    device: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    station: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    data: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    rssi: Option<i64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    seq_number: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    device_type_id: Option<String>,
}

impl From<WireTelemetry> for Telemetry {
    fn from(wire: WireTelemetry) -> Self {
        Self {
            device: wire.device,
            time: wire.time,
            station: wire.station,
            data: wire.data,
            rssi: wire.rssi,
            seq_number: wire.seq_number,
            device_type_id: wire.device_type_id,
        }
    }
}

/// Any scalar a JSON document or a form field can carry.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Integer(i64),
    Float(f64),
    Flag(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Flag(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }

    fn into_integer(self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(value),
            Self::Float(value) => truncate(value),
            Self::Flag(_) => None,
            Self::Text(value) => {
                let value = value.trim();
                value
                    .parse::<i64>()
                    .ok()
                    .or_else(|| value.parse::<f64>().ok().and_then(truncate))
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && in_range).then(|| value.trunc() as i64)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_integer))
}
