//! Per-request exchange context.

use std::error::Error as StdError;

use axum::body::{Body, Bytes};
use axum::http::{request::Parts, Extensions, HeaderMap, Method, Uri};
use http_body_util::LengthLimitError;
use serde::de::DeserializeOwned;

use crate::materializer::ContentMaterializer;
use crate::negotiation::MediaType;
use crate::observability::metrics;
use crate::problem::Problem;

/// Request body, collected on first use.
enum Payload {
    Pending(Body),
    Buffered(Bytes),
}

/// One negotiated request, owned by the handler for its duration.
pub struct Exchange<M> {
    parts: Parts,
    payload: Payload,
    consumed_type: MediaType,
    produced_type: Option<MediaType>,
    materializer: M,
}

impl<M: ContentMaterializer> Exchange<M> {
    pub(crate) fn new(
        parts: Parts,
        body: Body,
        consumed_type: MediaType,
        produced_type: Option<MediaType>,
        materializer: M,
    ) -> Self {
        Self {
            parts,
            payload: Payload::Pending(body),
            consumed_type,
            produced_type,
            materializer,
        }
    }

    /// The supported type the request body is read as.
    pub fn consumed_type(&self) -> &MediaType {
        &self.consumed_type
    }

    /// The type negotiated from `Accept`, `None` if the header was absent.
    pub fn produced_type(&self) -> Option<&MediaType> {
        self.produced_type.as_ref()
    }

    /// The type the response will be written as.
    pub fn response_type(&self) -> Option<&MediaType> {
        self.produced_type
            .as_ref()
            .or_else(|| self.materializer.default_produced_type())
    }

    pub fn materializer(&self) -> &M {
        &self.materializer
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// Deserialize the request body with the materializer for the consumed
    /// type.
    ///
    /// Failures become a 400 problem; the parser error is kept only as the
    /// problem's cause. The body is buffered, so binding twice reads the
    /// same bytes.
    pub async fn bind<T: DeserializeOwned>(&mut self) -> Result<T, Problem> {
        let bytes = self.body_bytes().await?;
        self.materializer
            .read(&self.consumed_type, &bytes)
            .map_err(|e| {
                tracing::debug!(
                    consumed_type = %self.consumed_type,
                    error = %e,
                    "Unable to bind request body"
                );
                metrics::record_bind_failure();
                Problem::unparseable_body(e)
            })
    }

    /// Raw request body, at most `materializer.body_limit()` bytes.
    ///
    /// An oversized body is a 413 problem; any other read failure is a 400.
    pub async fn body_bytes(&mut self) -> Result<Bytes, Problem> {
        let body = match std::mem::replace(&mut self.payload, Payload::Buffered(Bytes::new())) {
            Payload::Buffered(bytes) => {
                self.payload = Payload::Buffered(bytes.clone());
                return Ok(bytes);
            }
            Payload::Pending(body) => body,
        };

        let limit = self.materializer.body_limit();
        let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
            metrics::record_bind_failure();
            if exceeds_length_limit(&e) {
                tracing::debug!(limit, "Request body too large");
                Problem::body_too_large(e)
            } else {
                tracing::debug!(error = %e, "Unable to read request body");
                Problem::unparseable_body(e)
            }
        })?;
        self.payload = Payload::Buffered(bytes.clone());
        Ok(bytes)
    }
}

/// Whether a body read failed on a length limit, ours or an outer
/// `RequestBodyLimitLayer`.
fn exceeds_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
