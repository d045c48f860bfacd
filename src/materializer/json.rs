//! JSON bodies via `serde_json`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{media_types, ContentMaterializer, MaterializeError, DEFAULT_BODY_LIMIT};
use crate::negotiation::MediaType;

/// Reads `*/json`, writes `application/json`.
#[derive(Debug, Clone)]
pub struct Json {
    consumed: Arc<[MediaType]>,
    produced: Arc<[MediaType]>,
    body_limit: usize,
}

impl Json {
    pub fn new() -> Self {
        Self {
            consumed: media_types(&["*/json"]),
            produced: media_types(&["application/json"]),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// JSON with custom media type lists, e.g. `application/vnd.api+json`.
    pub fn with_types(consumed: Vec<MediaType>, produced: Vec<MediaType>) -> Self {
        Self {
            consumed: consumed.into(),
            produced: produced.into(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Refuse request bodies larger than `limit` bytes.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentMaterializer for Json {
    fn consumed_types(&self) -> &[MediaType] {
        &self.consumed
    }

    fn produced_types(&self) -> &[MediaType] {
        &self.produced
    }

    fn body_limit(&self) -> usize {
        self.body_limit
    }

    fn read<T: DeserializeOwned>(&self, _media_type: &MediaType, bytes: &[u8]) -> Result<T, MaterializeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn write<T: Serialize>(&self, _media_type: &MediaType, value: &T) -> Result<Vec<u8>, MaterializeError> {
        Ok(serde_json::to_vec(value)?)
    }
}
