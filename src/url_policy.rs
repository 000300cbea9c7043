// src/url_policy.rs
// =============================================================================
// Pure predicates that gate every link before it becomes a crawl task.
//
// Both functions swallow parse errors and answer `false`: a malformed link
// is simply not followed, it never fails the crawl.
// =============================================================================

use url::Url;

/// True when `candidate` parses as an absolute URL with a host.
///
/// `data:` and `mailto:` URLs parse but have no host, so they are rejected.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// True when both URLs parse and their hosts match, ignoring ASCII case.
pub fn is_same_domain(a: &str, b: &str) -> bool {
    let (Ok(a), Ok(b)) = (Url::parse(a), Url::parse(b)) else {
        return false;
    };

    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
