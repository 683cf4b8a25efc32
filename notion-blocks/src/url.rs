//! Notion page URL → canonical page id resolution.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

/// Ordered URL patterns, each capturing a trailing 32-character lowercase
/// hex run, optionally preceded by a human-readable slug and followed by a
/// trailing slash. Covers both hosting domains.
static URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // Standard format: https://notion.so/page-title-32chars
        Regex::new(r"notion\.so/[^/]*?([a-f0-9]{32})/?$").unwrap(),
        // Direct id format: https://notion.so/32chars
        Regex::new(r"notion\.so/([a-f0-9]{32})/?$").unwrap(),
        // Workspace subdomain: https://workspace.notion.site/page-title-32chars
        Regex::new(r"notion\.site/[^/]*?([a-f0-9]{32})/?$").unwrap(),
    ]
});

/// Extract the page id from a Notion page URL.
///
/// Strips any query string and fragment, then tries the patterns in order;
/// the first 32-hex match is reformatted into the canonical hyphenated
/// 8-4-4-4-12 form. Total: always terminates, and a URL matching no pattern
/// fails with [`Error::InvalidUrl`] carrying the input for diagnostics.
pub fn resolve_page_url(url: &str) -> Result<String, Error> {
    let stripped = url.split(['?', '#']).next().unwrap_or(url);

    for pattern in URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(stripped) {
            return Ok(hyphenate(&captures[1]));
        }
    }

    Err(Error::InvalidUrl {
        url: url.to_string(),
    })
}

/// `16132a3709e4816cb512e4d73d345003` → `16132a37-09e4-816c-b512-e4d73d345003`.
fn hyphenate(id: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &id[..8],
        &id[8..12],
        &id[12..16],
        &id[16..20],
        &id[20..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE_ID: &str = "16132a37-09e4-816c-b512-e4d73d345003";

    #[test]
    fn resolves_slug_url() {
        let id =
            resolve_page_url("https://notion.so/My-Page-16132a3709e4816cb512e4d73d345003").unwrap();
        assert_eq!(id, PAGE_ID);
    }

    #[test]
    fn resolves_bare_id_url() {
        let id = resolve_page_url("https://www.notion.so/16132a3709e4816cb512e4d73d345003").unwrap();
        assert_eq!(id, PAGE_ID);
    }

    #[test]
    fn resolves_workspace_subdomain() {
        let id = resolve_page_url(
            "https://acme.notion.site/launch-plan-16132a3709e4816cb512e4d73d345003",
        )
        .unwrap();
        assert_eq!(id, PAGE_ID);
    }

    #[test]
    fn resolves_with_trailing_slash() {
        let id =
            resolve_page_url("https://notion.so/16132a3709e4816cb512e4d73d345003/").unwrap();
        assert_eq!(id, PAGE_ID);
    }

    #[test]
    fn strips_query_and_fragment() {
        let id = resolve_page_url(
            "https://notion.so/My-Page-16132a3709e4816cb512e4d73d345003?pvs=4#section",
        )
        .unwrap();
        assert_eq!(id, PAGE_ID);
    }

    #[test]
    fn rejects_short_id() {
        let err = resolve_page_url("https://notion.so/tooshort123").unwrap_err();
        match err {
            Error::InvalidUrl { url } => assert_eq!(url, "https://notion.so/tooshort123"),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_host() {
        let err =
            resolve_page_url("https://example.com/16132a3709e4816cb512e4d73d345003").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let err = resolve_page_url("https://notion.so/16132A3709E4816CB512E4D73D345003")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
