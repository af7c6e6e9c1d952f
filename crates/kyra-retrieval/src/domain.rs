//! Source-domain allow-listing.

/// Lower-cased host of a URL-ish string, without scheme, credentials, or port.
pub fn host_of(url: &str) -> Option<String> {
    let rest = url.trim();
    let rest = rest.split_once("://").map_or(rest, |(_, r)| r);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = authority.split(':').next().unwrap_or("").trim_end_matches('.');
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// True when `url`'s host is one of `domains` or a subdomain of one.
/// `domains` are expected lower-cased.
pub fn is_allowed(url: &str, domains: &[String]) -> bool {
    let Some(host) = host_of(url) else {
        return false;
    };
    domains.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
