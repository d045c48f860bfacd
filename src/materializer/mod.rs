//! Content materializers: one wire format each.
//!
//! # Data Flow
//! ```text
//! request bytes + negotiated consumed type
//!     → ContentMaterializer::read (serde_json / serde_yaml)
//!     → handler input
//!
//! Conclusion body + negotiated produced type
//!     → ContentMaterializer::write
//!     → response bytes
//! ```
//!
//! # Design Decisions
//! - Static dispatch: materializers are cheap `Clone` values captured by routes
//! - Supported media types are attached at construction, never global
//! - `Either` composes two formats on one route without runtime type tests

pub mod either;
pub mod json;
pub mod yaml;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::negotiation::MediaType;

pub use either::Either;
pub use json::Json;
pub use yaml::Yaml;

/// Request bodies larger than this are refused unless a materializer sets
/// its own limit. Matches axum's `DefaultBodyLimit`.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Errors raised while reading or writing a body.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The negotiated type is not handled by this materializer.
    #[error("no materializer for media type '{0}'")]
    Unsupported(String),
}

/// Reads request bodies and writes response bodies for a set of media types.
pub trait ContentMaterializer: Clone + Send + Sync + 'static {
    /// Media types that can be deserialized from a request, by priority.
    fn consumed_types(&self) -> &[MediaType];

    /// Media types that can be serialized to a response, by priority.
    fn produced_types(&self) -> &[MediaType];

    /// Deserialize `bytes`, negotiated as `media_type`, into a value.
    fn read<T: DeserializeOwned>(&self, media_type: &MediaType, bytes: &[u8]) -> Result<T, MaterializeError>;

    /// Serialize `value` as `media_type`.
    fn write<T: Serialize>(&self, media_type: &MediaType, value: &T) -> Result<Vec<u8>, MaterializeError>;

    /// Type used for responses when the client sent no `Accept` header.
    fn default_produced_type(&self) -> Option<&MediaType> {
        self.produced_types().first()
    }

    /// Maximum number of request body bytes `Exchange::bind` will read.
    fn body_limit(&self) -> usize {
        DEFAULT_BODY_LIMIT
    }

    /// Whether this materializer declares a consumed type compatible with
    /// `media_type`.
    fn consumes(&self, media_type: &MediaType) -> bool {
        self.consumed_types().iter().any(|t| t.is_compatible(media_type))
    }

    /// Whether this materializer declares a produced type compatible with
    /// `media_type`.
    fn produces(&self, media_type: &MediaType) -> bool {
        self.produced_types().iter().any(|t| t.is_compatible(media_type))
    }

    /// Combine with another format; `self` has priority.
    fn or<B: ContentMaterializer>(self, other: B) -> Either<Self, B> {
        Either::new(self, other)
    }
}

/// Parse a static list of media types at construction time.
///
/// Entries that fail to parse are skipped and logged.
pub(crate) fn media_types(list: &[&str]) -> Arc<[MediaType]> {
    list.iter()
        .filter_map(|raw| match MediaType::parse(raw) {
            Ok(mt) => Some(mt),
            Err(e) => {
                tracing::warn!(media_type = %raw, error = %e, "Ignoring invalid media type");
                None
            }
        })
        .collect()
}
