//! Two formats on one route.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ContentMaterializer, MaterializeError};
use crate::negotiation::MediaType;

/// Serves the formats of `A` and `B`, `A` first.
///
/// Reads and writes are delegated to whichever side declares a type
/// compatible with the negotiated one, checking `A` before `B`.
#[derive(Debug, Clone)]
pub struct Either<A, B> {
    left: A,
    right: B,
    consumed: Arc<[MediaType]>,
    produced: Arc<[MediaType]>,
    body_limit: usize,
}

impl<A: ContentMaterializer, B: ContentMaterializer> Either<A, B> {
    pub fn new(left: A, right: B) -> Self {
        let consumed = left
            .consumed_types()
            .iter()
            .chain(right.consumed_types())
            .cloned()
            .collect();
        let produced = left
            .produced_types()
            .iter()
            .chain(right.produced_types())
            .cloned()
            .collect();
        let body_limit = left.body_limit().max(right.body_limit());
        Self { left, right, consumed, produced, body_limit }
    }
}

impl<A: ContentMaterializer, B: ContentMaterializer> ContentMaterializer for Either<A, B> {
    fn consumed_types(&self) -> &[MediaType] {
        &self.consumed
    }

    fn produced_types(&self) -> &[MediaType] {
        &self.produced
    }

    fn body_limit(&self) -> usize {
        self.body_limit
    }

    fn read<T: DeserializeOwned>(&self, media_type: &MediaType, bytes: &[u8]) -> Result<T, MaterializeError> {
        if self.left.consumes(media_type) {
            self.left.read(media_type, bytes)
        } else if self.right.consumes(media_type) {
            self.right.read(media_type, bytes)
        } else {
            Err(MaterializeError::Unsupported(media_type.to_string()))
        }
    }

    fn write<T: Serialize>(&self, media_type: &MediaType, value: &T) -> Result<Vec<u8>, MaterializeError> {
        if self.left.produces(media_type) {
            self.left.write(media_type, value)
        } else if self.right.produces(media_type) {
            self.right.write(media_type, value)
        } else {
            Err(MaterializeError::Unsupported(media_type.to_string()))
        }
    }
}
