//! The three-stage exchange pipeline.
//!
//! # Responsibilities
//! - Resolve the consumed type from `Content-Type` (406 on failure)
//! - Resolve the produced type from `Accept` (415 on failure)
//! - Run the user handler and write its conclusion or problem
//!
//! # Design Decisions
//! - Each stage short-circuits; later stages never run after a failure
//! - Problems are always `application/problem+json`, whatever the route format
//! - A conclusion that cannot be serialized becomes a 500 problem

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::{Conclusion, Exchange, Outcome};
use crate::materializer::ContentMaterializer;
use crate::negotiation::{resolve_accept, resolve_content_type, MediaType};
use crate::observability::metrics;
use crate::problem::Problem;

/// Handle one request with `materializer` and the user `handler`.
pub async fn dispatch<M, F, Fut, T>(materializer: M, handler: F, request: Request) -> Response
where
    M: ContentMaterializer,
    F: FnOnce(Exchange<M>) -> Fut,
    Fut: Future<Output = Result<Outcome<T>, Problem>>,
    T: Serialize,
{
    let (parts, body) = request.into_parts();

    // 1. Request content type
    let content_type = header_value(&parts.headers, &header::CONTENT_TYPE);
    let consumed = match resolve_content_type(content_type.as_deref(), materializer.consumed_types()) {
        Ok(mt) => mt,
        Err(e) => {
            tracing::debug!(content_type = ?content_type, "Request content type not supported");
            metrics::record_negotiation_failure("content-type");
            return answer_with_problem(e.into());
        }
    };

    // 2. Accepted response type
    let accept = header_value(&parts.headers, &header::ACCEPT);
    let produced = match resolve_accept(accept.as_deref(), materializer.produced_types()) {
        Ok(mt) => mt,
        Err(e) => {
            tracing::debug!(accept = ?accept, "Accepted types not supported");
            metrics::record_negotiation_failure("accept");
            return answer_with_problem(e.into());
        }
    };

    tracing::trace!(
        consumed = %consumed,
        produced = ?produced.as_ref().map(ToString::to_string),
        "Exchange negotiated"
    );

    // 3. Handler
    let exchange = Exchange::new(parts, body, consumed, produced.clone(), materializer.clone());
    match handler(exchange).await {
        Err(problem) => answer_with_problem(problem),
        Ok(Outcome::Handled(response)) => {
            metrics::record_outcome("handled");
            response
        }
        Ok(Outcome::Concluded(conclusion)) => write_conclusion(&materializer, produced, conclusion),
    }
}

/// All values of a header joined with `", "`, or `None` if it is absent.
fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let values: Vec<String> = headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

fn write_conclusion<M, T>(materializer: &M, produced: Option<MediaType>, conclusion: Conclusion<T>) -> Response
where
    M: ContentMaterializer,
    T: Serialize,
{
    let media_type = match produced.or_else(|| materializer.default_produced_type().cloned()) {
        Some(mt) => mt,
        None => {
            return answer_with_problem(
                Problem::new(StatusCode::INTERNAL_SERVER_ERROR).with_title("No response media type is configured"),
            );
        }
    };

    let body = match &conclusion.body {
        Some(value) => match materializer.write(&media_type, value) {
            Ok(bytes) => bytes,
            Err(e) => {
                return answer_with_problem(
                    Problem::internal(e).with_title("The response could not be serialized"),
                );
            }
        },
        None => Vec::new(),
    };

    let content_type = match HeaderValue::from_str(&media_type.to_string()) {
        Ok(value) => value,
        Err(e) => {
            return answer_with_problem(
                Problem::internal(e).with_title("The response could not be serialized"),
            );
        }
    };

    metrics::record_outcome("concluded");
    (conclusion.status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

/// Write `problem` as the response, logging server-side failures.
pub(crate) fn answer_with_problem(problem: Problem) -> Response {
    let status = problem.status();
    let cause = problem.cause().map(ToString::to_string).unwrap_or_default();
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), title = %problem.title(), error = %cause, "Exchange failed");
    } else {
        tracing::debug!(status = status.as_u16(), title = %problem.title(), error = %cause, "Exchange rejected");
    }
    metrics::record_outcome("problem");
    problem.into_response()
}

/// A route handler backed by a materializer, usable with axum's routing
/// functions.
pub struct ExchangeRoute<M, F, T> {
    materializer: M,
    handler: F,
    _body: PhantomData<fn() -> T>,
}

impl<M: Clone, F: Clone, T> Clone for ExchangeRoute<M, F, T> {
    fn clone(&self) -> Self {
        Self {
            materializer: self.materializer.clone(),
            handler: self.handler.clone(),
            _body: PhantomData,
        }
    }
}

impl<M, F, Fut, T, S> axum::handler::Handler<(), S> for ExchangeRoute<M, F, T>
where
    M: ContentMaterializer,
    F: FnOnce(Exchange<M>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Outcome<T>, Problem>> + Send + 'static,
    T: Serialize + Send + 'static,
{
    type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

    fn call(self, req: Request, _state: S) -> Self::Future {
        Box::pin(dispatch(self.materializer, self.handler, req))
    }
}

/// Entry points for running exchanges with a materializer.
///
/// Implemented for every [`ContentMaterializer`].
pub trait ExchangeHandler: ContentMaterializer {
    /// Wrap `handler` into an axum route handler.
    fn handler<F, Fut, T>(&self, handler: F) -> ExchangeRoute<Self, F, T>
    where
        F: FnOnce(Exchange<Self>) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<Outcome<T>, Problem>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        ExchangeRoute {
            materializer: self.clone(),
            handler,
            _body: PhantomData,
        }
    }

    /// Run a single request through `handler`.
    fn handle<F, Fut, T>(&self, request: Request, handler: F) -> impl Future<Output = Response> + Send
    where
        F: FnOnce(Exchange<Self>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Outcome<T>, Problem>> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        dispatch(self.clone(), handler, request)
    }
}

impl<M: ContentMaterializer> ExchangeHandler for M {}
