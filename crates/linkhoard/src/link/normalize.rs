use url::Url;

use super::LinkError;

/// Produce the canonical form of a user-supplied URL.
///
/// Whitespace and trailing slashes are trimmed, the scheme and host are
/// lowercased by the URL parser, and everything else (a leading `www.`, path
/// and query casing) is preserved. Only `http` and `https` are accepted.
pub fn normalize(raw: &str) -> Result<String, LinkError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| LinkError::Malformed(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(LinkError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(LinkError::Malformed(format!("{trimmed}: missing host")));
    }

    let serialized: String = url.into();
    Ok(serialized.trim_end_matches('/').to_string())
}

/// Cheap pre-check used before ingestion: an absolute http(s) URL with a host.
pub fn looks_like_http_url(raw: &str) -> bool {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return false;
    }
    Url::parse(trimmed).is_ok_and(|url| url.host_str().is_some_and(|h| !h.is_empty()))
}
