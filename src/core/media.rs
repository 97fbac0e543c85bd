//! Media-type based action selection
//!
//! One route + verb can have several handler variants distinguished by a
//! request header value (`Accept` for the response envelope, `Content-Type`
//! for the payload shape). A [`MediaTypeSelector`] is the explicit dispatch
//! table: guarded candidates declare the media types they claim, and at most
//! one unguarded candidate acts as the default. The table is built once at
//! startup; overlapping claims fail construction.

use axum::http::HeaderMap;

use crate::core::error::ConfigError;

/// Vendor media type selecting the hypermedia (linked) representation
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.biblio.hateoas+json";

/// Vendor media type for the richer author-creation payload
pub const AUTHOR_FULL_MEDIA_TYPE: &str =
    "application/vnd.biblio.authorwithdateofdeath.full+json";

/// Response envelope chosen from the `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Bare shaped payload; pagination metadata (with page URLs) in a header
    Plain,
    /// Linked envelope with per-resource and collection links in the body
    Hateoas,
}

#[derive(Debug, Clone)]
struct Candidate<K> {
    media_types: Vec<String>,
    key: K,
}

/// Dispatch table from a header value to a handler key
#[derive(Debug, Clone)]
pub struct MediaTypeSelector<K> {
    header_name: String,
    candidates: Vec<Candidate<K>>,
    default_key: Option<K>,
}

impl<K: Clone> MediaTypeSelector<K> {
    pub fn builder(header_name: impl Into<String>) -> MediaTypeSelectorBuilder<K> {
        MediaTypeSelectorBuilder {
            header_name: header_name.into(),
            candidates: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Select a handler key for the incoming headers
    ///
    /// A guarded candidate is eligible only when the header is present and
    /// its value matches one of the claimed media types case-insensitively.
    /// In every other case the unguarded default is selected; `None` means
    /// the route has no variant for this request.
    pub fn resolve(&self, headers: &HeaderMap) -> Option<K> {
        let value = headers
            .get(self.header_name.as_str())
            .and_then(|v| v.to_str().ok());
        self.resolve_value(value)
    }

    /// Header-value form of [`resolve`](Self::resolve)
    pub fn resolve_value(&self, value: Option<&str>) -> Option<K> {
        if let Some(value) = value {
            for candidate in &self.candidates {
                if candidate
                    .media_types
                    .iter()
                    .any(|claimed| claimed.eq_ignore_ascii_case(value.trim()))
                {
                    return Some(candidate.key.clone());
                }
            }
        }
        self.default_key.clone()
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }
}

/// Builder validating the dispatch table before use
pub struct MediaTypeSelectorBuilder<K> {
    header_name: String,
    candidates: Vec<Candidate<K>>,
    defaults: Vec<K>,
}

impl<K: Clone> MediaTypeSelectorBuilder<K> {
    /// Add a guarded candidate claiming the given media types
    pub fn candidate(mut self, media_types: &[&str], key: K) -> Self {
        self.candidates.push(Candidate {
            media_types: media_types.iter().map(|m| m.to_string()).collect(),
            key,
        });
        self
    }

    /// Register the unguarded default candidate
    pub fn default_candidate(mut self, key: K) -> Self {
        self.defaults.push(key);
        self
    }

    /// Validate and build the selector
    ///
    /// Two candidates claiming the same media type, or two defaults, make
    /// the table ambiguous; that is a configuration error, not something to
    /// recover from at request time.
    pub fn build(self) -> Result<MediaTypeSelector<K>, ConfigError> {
        let mut claimed: Vec<String> = Vec::new();
        for candidate in &self.candidates {
            for media_type in &candidate.media_types {
                let normalized = media_type.to_lowercase();
                if claimed.contains(&normalized) {
                    return Err(ConfigError::AmbiguousMediaType {
                        value: media_type.clone(),
                    });
                }
                claimed.push(normalized);
            }
        }

        if self.defaults.len() > 1 {
            return Err(ConfigError::AmbiguousMediaType {
                value: "<default>".to_string(),
            });
        }

        Ok(MediaTypeSelector {
            header_name: self.header_name,
            candidates: self.candidates,
            default_key: self.defaults.into_iter().next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::ACCEPT;

    fn representation_selector() -> MediaTypeSelector<Representation> {
        MediaTypeSelector::builder("accept")
            .candidate(&[HATEOAS_MEDIA_TYPE], Representation::Hateoas)
            .default_candidate(Representation::Plain)
            .build()
            .expect("selector should build")
    }

    #[test]
    fn test_matching_header_selects_guarded_candidate() {
        let selector = representation_selector();
        assert_eq!(
            selector.resolve_value(Some(HATEOAS_MEDIA_TYPE)),
            Some(Representation::Hateoas)
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let selector = representation_selector();
        assert_eq!(
            selector.resolve_value(Some("Application/VND.Biblio.HATEOAS+json")),
            Some(Representation::Hateoas)
        );
    }

    #[test]
    fn test_missing_header_selects_default_never_guarded() {
        let selector = representation_selector();
        assert_eq!(selector.resolve_value(None), Some(Representation::Plain));
    }

    #[test]
    fn test_unmatched_value_falls_back_to_default() {
        let selector = representation_selector();
        assert_eq!(
            selector.resolve_value(Some("application/xml")),
            Some(Representation::Plain)
        );
    }

    #[test]
    fn test_no_default_and_no_match_selects_nothing() {
        let selector: MediaTypeSelector<Representation> = MediaTypeSelector::builder("accept")
            .candidate(&[HATEOAS_MEDIA_TYPE], Representation::Hateoas)
            .build()
            .expect("selector should build");
        assert_eq!(selector.resolve_value(None), None);
        assert_eq!(selector.resolve_value(Some("application/xml")), None);
    }

    #[test]
    fn test_resolve_reads_header_map() {
        let selector = representation_selector();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HATEOAS_MEDIA_TYPE.parse().unwrap());
        assert_eq!(selector.resolve(&headers), Some(Representation::Hateoas));

        let empty = HeaderMap::new();
        assert_eq!(selector.resolve(&empty), Some(Representation::Plain));
    }

    #[test]
    fn test_overlapping_claims_fail_construction() {
        let result = MediaTypeSelector::builder("accept")
            .candidate(&[HATEOAS_MEDIA_TYPE], Representation::Hateoas)
            .candidate(&[HATEOAS_MEDIA_TYPE.to_uppercase().as_str()], Representation::Plain)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::AmbiguousMediaType { .. })
        ));
    }

    #[test]
    fn test_two_defaults_fail_construction() {
        let result = MediaTypeSelector::builder("accept")
            .default_candidate(Representation::Plain)
            .default_candidate(Representation::Hateoas)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::AmbiguousMediaType { .. })
        ));
    }
}
