//! YAML bodies via `serde_yaml`.
//!
//! JSON documents are valid YAML flow mappings, so a YAML route also reads
//! JSON request bodies.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{media_types, ContentMaterializer, MaterializeError, DEFAULT_BODY_LIMIT};
use crate::negotiation::MediaType;

/// Reads `*/yaml`, writes `application/yaml`.
#[derive(Debug, Clone)]
pub struct Yaml {
    consumed: Arc<[MediaType]>,
    produced: Arc<[MediaType]>,
    body_limit: usize,
}

impl Yaml {
    pub fn new() -> Self {
        Self {
            consumed: media_types(&["*/yaml"]),
            produced: media_types(&["application/yaml"]),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

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

impl Default for Yaml {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentMaterializer for Yaml {
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
        Ok(serde_yaml::from_slice(bytes)?)
    }

    fn write<T: Serialize>(&self, _media_type: &MediaType, value: &T) -> Result<Vec<u8>, MaterializeError> {
        Ok(serde_yaml::to_string(value)?.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Person {
        id: i64,
        birth_date: String,
    }

    #[test]
    fn test_write_then_read_back() {
        let yaml = Yaml::new();
        let mt = MediaType::new("application", "yaml");
        let person = Person { id: 4573098657423896, birth_date: "1967-12-29".into() };

        let bytes = yaml.write(&mt, &person).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("id: 4573098657423896\n"));
        let back: Person = yaml.read(&mt, &bytes).unwrap();
        assert_eq!(back, person);
    }

    #[test]
    fn test_reads_json_documents() {
        let yaml = Yaml::new();
        let back: Person = yaml
            .read(&MediaType::new("*", "yaml"), br#"{"id":1,"birth_date":"1965-06-21"}"#)
            .unwrap();
        assert_eq!(back, Person { id: 1, birth_date: "1965-06-21".into() });
    }

    #[test]
    fn test_read_rejects_wrong_shape() {
        let yaml = Yaml::new();
        let err = yaml.read::<Person>(&MediaType::new("*", "yaml"), b"- just\n- a list\n");
        assert!(matches!(err, Err(MaterializeError::Yaml(_))));
    }
}
