//! Hypermedia links: typed link values and per-resource link building

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::query::AuthorsResourceParameters;

/// A hypermedia link: where, what relation, which verb
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceLink {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl ResourceLink {
    pub fn new(
        href: impl Into<String>,
        rel: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// Which page a reconstructed collection URI should point at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageShift {
    Current,
    Previous,
    Next,
}

/// Builds relation links for authors and their collections
///
/// Links are recomputed per request; they are cheap string construction and
/// never cached. URIs are rooted at the configured base path so the service
/// can be mounted behind a prefix.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_path: String,
}

impl LinkBuilder {
    pub fn new(base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        while base_path.ends_with('/') {
            base_path.pop();
        }
        Self { base_path }
    }

    /// Canonical URI of a single author
    pub fn author_uri(&self, id: Uuid) -> String {
        format!("{}/authors/{}", self.base_path, id)
    }

    /// Canonical URI of a book under its author
    pub fn book_uri(&self, author_id: Uuid, book_id: Uuid) -> String {
        format!("{}/authors/{}/books/{}", self.base_path, author_id, book_id)
    }

    /// Relation links for a single author
    ///
    /// The `self` link repeats the caller's `fields` parameter so following
    /// it reproduces the same projection; when no fields were requested the
    /// parameter is omitted entirely, keeping the canonical URL stable.
    pub fn author_links(&self, id: Uuid, fields: Option<&str>) -> Vec<ResourceLink> {
        let item_uri = self.author_uri(id);
        let books_uri = format!("{}/books", item_uri);

        let self_href = match fields.map(str::trim).filter(|f| !f.is_empty()) {
            Some(fields) => format!("{}?fields={}", item_uri, encode_component(fields)),
            None => item_uri.clone(),
        };

        vec![
            ResourceLink::new(self_href, "self", "GET"),
            ResourceLink::new(item_uri, "delete_author", "DELETE"),
            ResourceLink::new(books_uri.clone(), "create_book_for_author", "POST"),
            ResourceLink::new(books_uri, "books", "GET"),
        ]
    }

    /// Page links for the authors collection
    pub fn collection_links(
        &self,
        params: &AuthorsResourceParameters,
        has_next: bool,
        has_previous: bool,
    ) -> Vec<ResourceLink> {
        let mut links = vec![ResourceLink::new(
            self.authors_page_uri(params, PageShift::Current),
            "self",
            "GET",
        )];

        if has_previous {
            links.push(ResourceLink::new(
                self.authors_page_uri(params, PageShift::Previous),
                "previousPage",
                "GET",
            ));
        }

        if has_next {
            links.push(ResourceLink::new(
                self.authors_page_uri(params, PageShift::Next),
                "nextPage",
                "GET",
            ));
        }

        links
    }

    /// Reconstruct the collection URI for the given page
    ///
    /// All filter, sort and shape parameters are carried over unchanged;
    /// only the page number shifts. Absent parameters are omitted.
    pub fn authors_page_uri(
        &self,
        params: &AuthorsResourceParameters,
        shift: PageShift,
    ) -> String {
        let page = match shift {
            PageShift::Current => params.page(),
            PageShift::Previous => params.page().saturating_sub(1).max(1),
            PageShift::Next => params.page() + 1,
        };

        let mut query = String::new();
        let mut push = |name: &str, value: &str| {
            query.push(if query.is_empty() { '?' } else { '&' });
            query.push_str(name);
            query.push('=');
            query.push_str(&encode_component(value));
        };

        if let Some(order_by) = params.order_by.as_deref().filter(|s| !s.is_empty()) {
            push("orderBy", order_by);
        }
        if let Some(search) = params.search_query.as_deref().filter(|s| !s.is_empty()) {
            push("searchQuery", search);
        }
        if let Some(genre) = params.genre.as_deref().filter(|s| !s.is_empty()) {
            push("genre", genre);
        }
        if let Some(fields) = params.fields.as_deref().filter(|s| !s.is_empty()) {
            push("fields", fields);
        }
        push("pageNumber", &page.to_string());
        push("pageSize", &params.size().to_string());

        format!("{}/authors{}", self.base_path, query)
    }
}

/// Percent-encode a query component
///
/// No crate in this stack covers URL encoding, so unreserved characters
/// (RFC 3986) pass through and everything else is escaped byte-wise.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LinkBuilder {
        LinkBuilder::new("/api")
    }

    fn find<'a>(links: &'a [ResourceLink], rel: &str) -> &'a ResourceLink {
        links
            .iter()
            .find(|l| l.rel == rel)
            .unwrap_or_else(|| panic!("missing rel '{}'", rel))
    }

    #[test]
    fn test_author_links_relations_and_methods() {
        let id = Uuid::nil();
        let links = builder().author_links(id, None);

        assert_eq!(links.len(), 4);
        assert_eq!(find(&links, "self").method, "GET");
        assert_eq!(find(&links, "delete_author").method, "DELETE");
        assert_eq!(find(&links, "create_book_for_author").method, "POST");
        assert_eq!(find(&links, "books").method, "GET");

        assert_eq!(
            find(&links, "books").href,
            format!("/api/authors/{}/books", id)
        );
    }

    #[test]
    fn test_self_link_omits_absent_fields_parameter() {
        let links = builder().author_links(Uuid::nil(), None);
        assert!(!find(&links, "self").href.contains('?'));

        let links = builder().author_links(Uuid::nil(), Some("  "));
        assert!(!find(&links, "self").href.contains('?'));
    }

    #[test]
    fn test_self_link_carries_requested_fields() {
        let id = Uuid::nil();
        let links = builder().author_links(id, Some("id,name"));
        assert_eq!(
            find(&links, "self").href,
            format!("/api/authors/{}?fields=id%2Cname", id)
        );
        // Only the self link repeats the projection.
        assert!(!find(&links, "delete_author").href.contains("fields"));
    }

    #[test]
    fn test_page_uri_carries_all_parameters() {
        let params = AuthorsResourceParameters {
            page_number: Some(2),
            page_size: Some(10),
            order_by: Some("name desc".to_string()),
            fields: Some("id,name".to_string()),
            genre: Some("Fantasy".to_string()),
            search_query: Some("king".to_string()),
        };

        let uri = builder().authors_page_uri(&params, PageShift::Current);
        assert_eq!(
            uri,
            "/api/authors?orderBy=name%20desc&searchQuery=king&genre=Fantasy&fields=id%2Cname&pageNumber=2&pageSize=10"
        );
    }

    #[test]
    fn test_page_uri_shifts_only_page_number() {
        let params = AuthorsResourceParameters {
            page_number: Some(2),
            page_size: Some(10),
            genre: Some("Fantasy".to_string()),
            ..Default::default()
        };

        let previous = builder().authors_page_uri(&params, PageShift::Previous);
        let next = builder().authors_page_uri(&params, PageShift::Next);
        assert!(previous.contains("pageNumber=1"));
        assert!(next.contains("pageNumber=3"));
        assert!(previous.contains("genre=Fantasy"));
        assert!(next.contains("pageSize=10"));
    }

    #[test]
    fn test_page_uri_omits_absent_parameters() {
        let params = AuthorsResourceParameters {
            page_number: Some(1),
            page_size: Some(10),
            ..Default::default()
        };
        let uri = builder().authors_page_uri(&params, PageShift::Current);
        assert_eq!(uri, "/api/authors?pageNumber=1&pageSize=10");
    }

    #[test]
    fn test_collection_links_conditional_prev_next() {
        let params = AuthorsResourceParameters::default().clamped(&crate::config::PaginationConfig {
            default_page_size: 10,
            max_page_size: 20,
        });

        let links = builder().collection_links(&params, true, false);
        assert!(links.iter().any(|l| l.rel == "self"));
        assert!(links.iter().any(|l| l.rel == "nextPage"));
        assert!(!links.iter().any(|l| l.rel == "previousPage"));

        let links = builder().collection_links(&params, false, true);
        assert!(links.iter().any(|l| l.rel == "previousPage"));
        assert!(!links.iter().any(|l| l.rel == "nextPage"));
    }

    #[test]
    fn test_base_path_trailing_slash_is_trimmed() {
        let links = LinkBuilder::new("/api/").author_links(Uuid::nil(), None);
        assert!(find(&links, "self").href.starts_with("/api/authors/"));
    }
}
