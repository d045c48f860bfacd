//! Media type parsing and matching.
//!
//! # Design Decisions
//! - Only `type/subtype` takes part in matching; parameters are kept verbatim
//! - Type and subtype compare ASCII case-insensitively
//! - `*` on either side of a comparison matches anything

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a media type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaTypeError {
    #[error("empty media type")]
    Empty,

    #[error("malformed media type '{0}'")]
    Malformed(String),
}

/// A parsed `type/subtype[;parameters]` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    main_type: String,
    subtype: String,
    parameters: String,
}

impl MediaType {
    /// Parse a raw header value.
    ///
    /// Everything after the first `;` is stored as the parameter string. The
    /// remainder must split on `/` into exactly two non-empty segments.
    pub fn parse(source: &str) -> Result<Self, MediaTypeError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(MediaTypeError::Empty);
        }

        let (essence, parameters) = match source.split_once(';') {
            Some((essence, parameters)) => (essence, parameters.trim()),
            None => (source, ""),
        };

        let mut segments = essence.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(main_type), Some(subtype), None) => {
                let main_type = main_type.trim();
                let subtype = subtype.trim();
                if main_type.is_empty() || subtype.is_empty() {
                    return Err(MediaTypeError::Malformed(source.to_string()));
                }
                Ok(Self {
                    main_type: main_type.to_string(),
                    subtype: subtype.to_string(),
                    parameters: parameters.to_string(),
                })
            }
            _ => Err(MediaTypeError::Malformed(source.to_string())),
        }
    }

    /// Build a media type from its two segments, without parameters.
    pub fn new(main_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            subtype: subtype.into(),
            parameters: String::new(),
        }
    }

    /// The top-level type (`application` in `application/json`).
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Raw parameter string after the `;`, empty when absent.
    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    /// Look up a single parameter by name (case-insensitive).
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .split(';')
            .filter_map(|p| p.split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().trim_matches('"'))
    }

    /// True for `*/*`.
    pub fn is_wildcard(&self) -> bool {
        self.main_type == "*" && self.subtype == "*"
    }

    /// Returns true if both segments match exactly or are wildcarded on
    /// either side.
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        segment_matches(&self.main_type, &other.main_type)
            && segment_matches(&self.subtype, &other.subtype)
    }

    /// How specific this range is: 2 for `type/subtype`, 1 for `type/*`,
    /// 0 for `*/*`.
    pub fn specificity(&self) -> u8 {
        match (self.main_type.as_str(), self.subtype.as_str()) {
            ("*", _) => 0,
            (_, "*") => 1,
            _ => 2,
        }
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.main_type, self.subtype)
    }
}

fn segment_matches(a: &str, b: &str) -> bool {
    a == "*" || b == "*" || a.eq_ignore_ascii_case(b)
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.subtype)?;
        if !self.parameters.is_empty() {
            write!(f, ";{}", self.parameters)?;
        }
        Ok(())
    }
}
