//! Problem details payload.
//!
//! # Responsibilities
//! - Carry status, type, title, detail and instance of a failed exchange
//! - Render as `application/problem+json`
//! - Keep a diagnostic cause for logs without ever serializing it
//!
//! # Design Decisions
//! - Immutable once built: builders consume `self`
//! - All five public fields are always serialized, empty ones as `""`

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::negotiation::NegotiationError;

/// Media type of every problem response.
pub const PROBLEM_JSON: &str = "application/problem+json";

const CONTENT_TYPE_HEADER: &str = "Content-Type";
const ACCEPT_HEADER: &str = "Accept";

type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// A structured description of an HTTP failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    status: u16,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    instance: String,
    #[serde(skip)]
    cause: Option<Cause>,
}

impl Problem {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            kind: String::new(),
            title: String::new(),
            detail: String::new(),
            instance: String::new(),
            cause: None,
        }
    }

    /// 400 with the given title.
    pub fn bad_request(title: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST).with_title(title)
    }

    /// 500 wrapping an arbitrary error. The error is kept as the cause and
    /// never reaches the client.
    pub fn internal<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_cause(err)
    }

    /// The body sent when a request payload cannot be deserialized.
    pub fn unparseable_body<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::bad_request("request body could not be parsed").with_cause(err)
    }

    /// 413 for a request body over the configured limit.
    pub fn body_too_large<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE)
            .with_title("request body is too large")
            .with_cause(err)
    }

    pub fn with_type(self, kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), ..self }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self { title: title.into(), ..self }
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self { detail: detail.into(), ..self }
    }

    pub fn with_instance(self, instance: impl Into<String>) -> Self {
        Self { instance: instance.into(), ..self }
    }

    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self { cause: Some(Arc::new(cause)), ..self }
    }

    /// Raw status number as it appears in the payload.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Status used on the wire; numbers outside 100..=999 become 500.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&json))
    }
}

impl StdError for Problem {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}

impl From<StatusCode> for Problem {
    fn from(status: StatusCode) -> Self {
        Self::new(status)
    }
}

impl From<NegotiationError> for Problem {
    fn from(err: NegotiationError) -> Self {
        let problem = match &err {
            NegotiationError::UnsupportedContentType(raw) => Problem::new(StatusCode::NOT_ACCEPTABLE)
                .with_title(format!(
                    "The request type is not supported (header '{}')",
                    CONTENT_TYPE_HEADER
                ))
                .with_detail(format!("A request of type '{}' is not supported.", raw)),
            NegotiationError::UnsupportedAccept(raw) => Problem::new(StatusCode::UNSUPPORTED_MEDIA_TYPE)
                .with_title(format!(
                    "The accepted types are not supported (header '{}')",
                    ACCEPT_HEADER
                ))
                .with_detail(format!("A request that accepts type(s) '{}' is not supported.", raw)),
        };
        problem.with_cause(err)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.to_json() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize problem");
                format!(r#"{{"status":{},"type":"","title":"","detail":"","instance":""}}"#, status.as_u16())
                    .into_bytes()
            }
        };
        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
            body,
        )
            .into_response()
    }
}

/// Conversion of foreign errors into problems, for use with `?` in handlers.
pub trait IntoProblem<T> {
    /// Wrap any error as a 500 problem.
    fn or_internal(self) -> Result<T, Problem>;

    /// Wrap any error as a problem with the given status and title.
    fn or_problem(self, status: StatusCode, title: &str) -> Result<T, Problem>;
}

impl<T, E> IntoProblem<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn or_internal(self) -> Result<T, Problem> {
        self.map_err(Problem::internal)
    }

    fn or_problem(self, status: StatusCode, title: &str) -> Result<T, Problem> {
        self.map_err(|e| Problem::new(status).with_title(title).with_cause(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_all_public_fields_in_order() {
        let problem = Problem::new(StatusCode::NOT_FOUND).with_title("gone");
        assert_eq!(
            problem.to_string(),
            r#"{"status":404,"type":"","title":"gone","detail":"","instance":""}"#
        );
    }

    #[test]
    fn test_cause_is_never_serialized() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let problem = Problem::internal(io);
        assert_eq!(problem.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!problem.to_string().contains("disk on fire"));
        assert!(problem.source().is_some());
        assert_eq!(problem.cause().map(|c| c.to_string()), Some("disk on fire".into()));
    }

    #[test]
    fn test_negotiation_errors_map_to_406_and_415() {
        let p: Problem = NegotiationError::UnsupportedContentType("foo/bar".into()).into();
        assert_eq!(p.status_code(), 406);
        assert_eq!(p.title(), "The request type is not supported (header 'Content-Type')");
        assert_eq!(p.detail(), "A request of type 'foo/bar' is not supported.");

        let p: Problem = NegotiationError::UnsupportedAccept("foo/bar".into()).into();
        assert_eq!(p.status_code(), 415);
        assert_eq!(p.title(), "The accepted types are not supported (header 'Accept')");
        assert_eq!(p.detail(), "A request that accepts type(s) 'foo/bar' is not supported.");
    }

    #[test]
    fn test_invalid_status_falls_back_to_500() {
        let p: Problem = serde_json::from_str(r#"{"status":42}"#).unwrap();
        assert_eq!(p.status_code(), 42);
        assert_eq!(p.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_sets_problem_content_type() {
        let response = Problem::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], PROBLEM_JSON);
    }

    #[test]
    fn test_or_internal() {
        let res: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let problem = res.or_internal().unwrap_err();
        assert_eq!(problem.status_code(), 500);
    }
}
