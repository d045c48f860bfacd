//! What a handler hands back to the dispatcher.

use axum::http::StatusCode;
use axum::response::Response;

/// Status and optional body to be materialized in the negotiated format.
#[derive(Debug, Clone, PartialEq)]
pub struct Conclusion<T> {
    pub status: StatusCode,
    pub body: Option<T>,
}

impl<T> Conclusion<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body: Some(body) }
    }

    /// A conclusion without a body.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }
}

/// Result of a handler that succeeded.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Let the dispatcher serialize the conclusion.
    Concluded(Conclusion<T>),

    /// The handler built the response itself; it is sent untouched.
    Handled(Response),
}

impl<T> From<Conclusion<T>> for Outcome<T> {
    fn from(conclusion: Conclusion<T>) -> Self {
        Outcome::Concluded(conclusion)
    }
}

impl<T> From<Response> for Outcome<T> {
    fn from(response: Response) -> Self {
        Outcome::Handled(response)
    }
}
