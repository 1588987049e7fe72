use url::Url;

/// Titles served by bot-protection and interstitial pages instead of content.
///
/// Compared case-insensitively after trailing dots and ellipses are stripped.
const BLOCKED_TITLES: &[&str] = &[
    "just a moment",
    "attention required! | cloudflare",
    "access denied",
    "are you a robot?",
    "are you human?",
    "security check",
    "please wait",
    "one moment, please",
    "verifying you are human",
    "checking your browser before accessing",
    "ddos-guard",
    "robot check",
    "captcha",
    "403 forbidden",
    "error 403",
];

/// Whether a fetched page title is usable as an item title.
pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return false;
    }
    let key = trimmed
        .trim_end_matches(['.', '\u{2026}'])
        .trim()
        .to_lowercase();
    !BLOCKED_TITLES.contains(&key.as_str())
}

/// Derive a human-readable title from a URL when the page offers none.
///
/// Uses the last non-empty path segment, percent-decoded, with `-` and `_`
/// turned into spaces. Falls back to the host without `www.`.
pub fn title_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()));

    if let Some(segment) = segment {
        let decoded = urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        let title = decoded.replace(['-', '_'], " ");
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    let host = parsed.host_str().unwrap_or(url);
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
