//! Request `Content-Type` resolution.

use super::media_type::MediaType;
use super::NegotiationError;

/// Pick the consumed media type for a request.
///
/// A missing (or blank) header and a `*/*` header both resolve to the first
/// consumed type. Otherwise the first consumed type compatible with the
/// header wins. The returned value is the supported entry, not the header.
pub fn resolve_content_type(
    header: Option<&str>,
    consumed: &[MediaType],
) -> Result<MediaType, NegotiationError> {
    let raw = header.map(str::trim).unwrap_or_default();
    let unsupported = || NegotiationError::UnsupportedContentType(raw.to_string());

    if raw.is_empty() {
        return consumed.first().cloned().ok_or_else(unsupported);
    }

    let requested = MediaType::parse(raw).map_err(|_| unsupported())?;
    if requested.is_wildcard() {
        return consumed.first().cloned().ok_or_else(unsupported);
    }

    consumed
        .iter()
        .find(|supported| supported.is_compatible(&requested))
        .cloned()
        .ok_or_else(unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<MediaType> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_missing_header_takes_first() {
        let consumed = types(&["*/json", "*/yaml"]);
        assert_eq!(resolve_content_type(None, &consumed).unwrap(), consumed[0]);
        assert_eq!(resolve_content_type(Some(""), &consumed).unwrap(), consumed[0]);
    }

    #[test]
    fn test_wildcard_takes_first_in_any_order() {
        let forward = types(&["*/json", "*/yaml"]);
        let reverse = types(&["*/yaml", "*/json"]);
        assert_eq!(resolve_content_type(Some("*/*"), &forward).unwrap(), forward[0]);
        assert_eq!(resolve_content_type(Some("*/*"), &reverse).unwrap(), reverse[0]);
    }

    #[test]
    fn test_first_compatible_wins() {
        let consumed = types(&["text/plain", "*/json", "application/json"]);
        let resolved = resolve_content_type(Some("application/json; charset=utf-8"), &consumed).unwrap();
        assert_eq!(resolved, consumed[1]);

        let resolved = resolve_content_type(Some("text/*"), &consumed).unwrap();
        assert_eq!(resolved, consumed[0]);
    }

    #[test]
    fn test_unsupported_carries_raw_value() {
        let consumed = types(&["*/json"]);
        let err = resolve_content_type(Some("foo/bar"), &consumed).unwrap_err();
        assert_eq!(err, NegotiationError::UnsupportedContentType("foo/bar".into()));

        let err = resolve_content_type(Some("garbage"), &consumed).unwrap_err();
        assert_eq!(err, NegotiationError::UnsupportedContentType("garbage".into()));
    }

    #[test]
    fn test_empty_consumed_list_never_matches() {
        assert!(resolve_content_type(None, &[]).is_err());
        assert!(resolve_content_type(Some("*/*"), &[]).is_err());
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let consumed = types(&["*/json", "*/yaml"]);
        let first = resolve_content_type(Some("application/yaml"), &consumed);
        let second = resolve_content_type(Some("application/yaml"), &consumed);
        assert_eq!(first, second);
    }
}
