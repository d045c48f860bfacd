//! Content negotiation and problem details for axum.
//!
//! Routes are built from a [`ContentMaterializer`] (one per wire format) and
//! an async handler receiving an [`Exchange`]. Before the handler runs, the
//! request `Content-Type` is matched against the materializer's consumed
//! types (406 on failure) and `Accept` against its produced types (415 on
//! failure). The handler's [`Conclusion`] is then serialized in the
//! negotiated format; failures are answered with a [`Problem`] as
//! `application/problem+json`.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use content_exchange::{Conclusion, Exchange, ExchangeHandler, ExchangeResult, Json};
//!
//! async fn ping(_xc: Exchange<Json>) -> ExchangeResult<&'static str> {
//!     Ok(Conclusion::ok("pong").into())
//! }
//!
//! let app: Router = Router::new().route("/ping", get(Json::new().handler(ping)));
//! ```

pub mod config;
pub mod demo;
pub mod exchange;
pub mod http;
pub mod lifecycle;
pub mod materializer;
pub mod negotiation;
pub mod observability;
pub mod problem;

pub use config::ServerConfig;
pub use exchange::{Conclusion, Exchange, ExchangeHandler, ExchangeResult, Outcome};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal};
pub use materializer::{ContentMaterializer, Either, Json, Yaml, DEFAULT_BODY_LIMIT};
pub use negotiation::{MediaType, NegotiationError};
pub use problem::{IntoProblem, Problem, PROBLEM_JSON};
