//! Locator parsing and canonical scheme extraction.
//!
//! A locator is a URL whose scheme names a service type and whose
//! remaining components carry backend-specific configuration. Some
//! providers are addressed through their native webhook URL instead of
//! the canonical form; those locators carry a composite scheme
//! (`canonical+transport`, e.g. `teams+https://…`) and the canonical
//! part is everything before the first `+`. Translation of the rest of
//! the URL is the service's job, not ours.

use url::Url;

use crate::error::TannoyError;

/// Parse a locator and extract its canonical service scheme.
///
/// Returns the canonical scheme and the parsed URL. The URL keeps its
/// literal (possibly composite) scheme so a custom-shaped locator can
/// later be handed to the service for translation.
pub fn extract_service_name(raw: &str) -> Result<(String, Url), TannoyError> {
    let url = Url::parse(raw).map_err(|source| TannoyError::LocatorParse {
        locator: raw.to_string(),
        source,
    })?;

    let scheme = match url.scheme().split_once('+') {
        Some((canonical, _)) => canonical.to_string(),
        None => url.scheme().to_string(),
    };

    Ok((scheme, url))
}

/// True when the locator is custom-shaped: its literal scheme differs
/// from the canonical service scheme.
#[must_use]
pub fn is_custom(canonical: &str, url: &Url) -> bool {
    url.scheme() != canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_scheme() {
        let (scheme, url) = extract_service_name("slack://token@channel").unwrap();
        assert_eq!(scheme, "slack");
        assert_eq!(url.scheme(), "slack");
        assert!(!is_custom(&scheme, &url));
    }

    #[test]
    fn composite_scheme_yields_canonical_prefix() {
        let (scheme, url) = extract_service_name("teams+https://host/path").unwrap();
        assert_eq!(scheme, "teams");
        // The literal scheme is preserved for the translation step.
        assert_eq!(url.scheme(), "teams+https");
        assert_eq!(url.path(), "/path");
        assert!(is_custom(&scheme, &url));
    }

    #[test]
    fn only_first_plus_splits() {
        let (scheme, url) = extract_service_name("a+b+c://host").unwrap();
        assert_eq!(scheme, "a");
        assert_eq!(url.scheme(), "a+b+c");
    }

    #[test]
    fn malformed_locator_is_a_parse_error() {
        let err = extract_service_name("not a url").unwrap_err();
        assert!(matches!(err, TannoyError::LocatorParse { .. }));
    }

    #[test]
    fn query_and_path_survive_parsing() {
        let (_, url) = extract_service_name("generic://example.com/hook?title=hi").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("title=hi"));
    }
}
