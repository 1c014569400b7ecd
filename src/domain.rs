//! Domain string normalization
//!
//! Terminal domains arrive from the upstream terminal-management system in
//! inconsistent shapes: mixed case, stray whitespace, occasionally a full URL
//! pasted straight from a browser. Customer domains are typed by hand in the
//! back office and have the same problems. Every comparison in the matching
//! engine happens on the normalized form produced here, so a terminal
//! reported as `HTTPS://Shop.Example.com/` and a customer entered as
//! `shop.example.com` resolve to the same key.

/// Normalize a domain string for comparison.
///
/// Lowercases, trims surrounding whitespace, strips a leading `http://` or
/// `https://`, and strips a single trailing `/`. Absent or empty input yields
/// the empty string. Total over all inputs; never panics.
pub fn normalize(domain: Option<&str>) -> String {
    let Some(raw) = domain else {
        return String::new();
    };
    let mut d = raw.trim().to_lowercase();
    if let Some(rest) = d.strip_prefix("https://") {
        d = rest.to_string();
    } else if let Some(rest) = d.strip_prefix("http://") {
        d = rest.to_string();
    }
    if let Some(rest) = d.strip_suffix('/') {
        d = rest.to_string();
    }
    d
}

/// Whether two domain strings refer to the same domain.
///
/// True iff both normalize to the same non-empty string. Two absent/empty
/// domains are NOT the same domain; a missing domain never identifies
/// anything.
pub fn same_domain(a: Option<&str>, b: Option<&str>) -> bool {
    let na = normalize(a);
    !na.is_empty() && na == normalize(b)
}
