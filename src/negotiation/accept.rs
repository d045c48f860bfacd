//! `Accept` header parsing and weighted matching.
//!
//! # Design Decisions
//! - Ranges that fail to parse are skipped, not fatal
//! - Each produced type takes the quality of its most specific matching range,
//!   so `application/json;q=0, */*` excludes JSON
//! - Ties go to the higher specificity, then to the produced list order

use super::media_type::MediaType;
use super::NegotiationError;

/// One entry of an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptRange {
    pub media_type: MediaType,
    pub quality: f32,
}

/// A parsed `Accept` header, in header order.
#[derive(Debug, Clone, Default)]
pub struct AcceptHeader {
    ranges: Vec<AcceptRange>,
}

impl AcceptHeader {
    /// Parses an `Accept` header value.
    ///
    /// ```
    /// use content_exchange::negotiation::AcceptHeader;
    ///
    /// let accept = AcceptHeader::parse("application/json, text/html; q=0.9, nonsense");
    /// assert_eq!(accept.ranges().len(), 2);
    /// assert_eq!(accept.ranges()[1].quality, 0.9);
    /// ```
    pub fn parse(header: &str) -> Self {
        let ranges = header
            .split(',')
            .filter_map(|s| MediaType::parse(s).ok())
            .map(|media_type| {
                let quality = media_type
                    .parameter("q")
                    .and_then(|q| q.parse::<f32>().ok())
                    .filter(|q| q.is_finite())
                    .map(|q| q.clamp(0.0, 1.0))
                    .unwrap_or(1.0);
                AcceptRange { media_type, quality }
            })
            .collect();

        Self { ranges }
    }

    pub fn ranges(&self) -> &[AcceptRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Quality and specificity of the most specific range accepting
    /// `candidate`, or `None` when no range does.
    fn weigh(&self, candidate: &MediaType) -> Option<(f32, u8)> {
        let mut best: Option<&AcceptRange> = None;
        for range in self.ranges.iter().filter(|r| r.media_type.is_compatible(candidate)) {
            let more_specific = best
                .map(|b| range.media_type.specificity() > b.media_type.specificity())
                .unwrap_or(true);
            if more_specific {
                best = Some(range);
            }
        }
        best.map(|r| (r.quality, r.media_type.specificity()))
    }

    /// Finds the best acceptable entry of `available`.
    pub fn find_best_match<'a>(&self, available: &'a [MediaType]) -> Option<&'a MediaType> {
        available
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                self.weigh(candidate)
                    .filter(|(quality, _)| *quality > 0.0)
                    .map(|(quality, specificity)| (quality, specificity, index, candidate))
            })
            .max_by(|a, b| {
                a.0.total_cmp(&b.0)
                    .then(a.1.cmp(&b.1))
                    .then(b.2.cmp(&a.2))
            })
            .map(|(_, _, _, candidate)| candidate)
    }
}

/// Pick the produced media type for a request.
///
/// Returns `Ok(None)` when no `Accept` header was sent; the materializer
/// then uses its default.
pub fn resolve_accept(
    header: Option<&str>,
    produced: &[MediaType],
) -> Result<Option<MediaType>, NegotiationError> {
    let raw = match header.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    AcceptHeader::parse(raw)
        .find_best_match(produced)
        .cloned()
        .map(Some)
        .ok_or_else(|| NegotiationError::UnsupportedAccept(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<MediaType> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_parse_quality() {
        let accept = AcceptHeader::parse("text/html;q=0.5, application/json, */*;q=abc, image/*;q=7");
        let q: Vec<f32> = accept.ranges().iter().map(|r| r.quality).collect();
        assert_eq!(q, vec![0.5, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_no_header_means_no_negotiation() {
        let produced = types(&["application/json"]);
        assert_eq!(resolve_accept(None, &produced), Ok(None));
        assert_eq!(resolve_accept(Some("  "), &produced), Ok(None));
    }

    #[test]
    fn test_exact_and_wildcard() {
        let produced = types(&["application/json", "application/yaml"]);
        assert_eq!(
            resolve_accept(Some("application/yaml"), &produced).unwrap(),
            Some(produced[1].clone())
        );
        assert_eq!(
            resolve_accept(Some("*/*"), &produced).unwrap(),
            Some(produced[0].clone())
        );
        assert_eq!(
            resolve_accept(Some("application/*"), &produced).unwrap(),
            Some(produced[0].clone())
        );
    }

    #[test]
    fn test_quality_ordering() {
        let produced = types(&["application/json", "application/yaml"]);
        let resolved = resolve_accept(Some("application/json;q=0.2, application/yaml;q=0.8"), &produced);
        assert_eq!(resolved.unwrap(), Some(produced[1].clone()));
    }

    #[test]
    fn test_zero_quality_excludes() {
        let produced = types(&["application/json", "application/yaml"]);
        let resolved = resolve_accept(Some("application/json;q=0, */*"), &produced);
        assert_eq!(resolved.unwrap(), Some(produced[1].clone()));

        let err = resolve_accept(Some("application/json;q=0"), &types(&["application/json"]));
        assert!(err.is_err());
    }

    #[test]
    fn test_unsupported_carries_raw_value() {
        let produced = types(&["application/json"]);
        assert_eq!(
            resolve_accept(Some("foo/bar"), &produced),
            Err(NegotiationError::UnsupportedAccept("foo/bar".into()))
        );
        assert_eq!(
            resolve_accept(Some("not a type"), &produced),
            Err(NegotiationError::UnsupportedAccept("not a type".into()))
        );
    }
}
