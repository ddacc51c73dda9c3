//! Validation of submitted URLs.

use url::Url;

/// Returns true if `candidate` is an absolute web URL.
///
/// Accepted URLs have an `http` or `https` scheme written with an explicit
/// `//` authority and a non-empty host. Whitespace and control characters
/// are rejected outright: `Url::parse` silently drops tabs and newlines, but
/// the stored string must remain usable as a `Location` header value.
/// The check is pure and never blocks.
///
/// # Examples
///
/// ```
/// use shorturl::utils::url_validator::is_valid_url;
///
/// assert!(is_valid_url("https://www.freecodecamp.org"));
/// assert!(!is_valid_url("not a url"));
/// assert!(!is_valid_url("ftp:/bad"));
/// ```
pub fn is_valid_url(candidate: &str) -> bool {
    if candidate
        .chars()
        .any(|c| c.is_control() || c.is_whitespace())
    {
        return false;
    }

    let Ok(url) = Url::parse(candidate) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    // `Url` repairs `http:/host`; require the authority to be spelled out.
    let has_authority = candidate
        .get(url.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));

    has_authority && url.host_str().is_some_and(|host| !host.is_empty())
}
