//! Content negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Content-Type header (optional)
//!     → media_type.rs (parse type/subtype[;params])
//!     → content_type.rs (first compatible consumed type)
//!     → Return: consumed MediaType or UnsupportedContentType
//!
//! Accept header (optional)
//!     → accept.rs (split ranges, q-values, rank)
//!     → Return: produced MediaType, None (no header) or UnsupportedAccept
//! ```
//!
//! # Design Decisions
//! - Supported lists are ordered by priority; first match wins
//! - Missing or wildcard Content-Type falls back to the first consumed type
//! - Missing Accept performs no negotiation at all
//! - Pure functions: same headers and lists always give the same answer

pub mod accept;
pub mod content_type;
pub mod media_type;

use thiserror::Error;

pub use accept::{resolve_accept, AcceptHeader};
pub use content_type::resolve_content_type;
pub use media_type::{MediaType, MediaTypeError};

/// Reasons a request cannot be negotiated.
///
/// Both variants carry the raw header value for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// The `Content-Type` header matches none of the consumed types.
    #[error("unsupported request content type '{0}'")]
    UnsupportedContentType(String),

    /// The `Accept` header matches none of the produced types.
    #[error("unsupported accept type(s) '{0}'")]
    UnsupportedAccept(String),
}
