use url::Url;

use super::LinkError;

/// Which ingestor handles a canonical URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Any page without a dedicated ingestor.
    Website,
    /// A post on X/Twitter, either a status URL or a bookmarks URL with `post_id`.
    TweetOrBookmark,
}

const TWEET_HOSTS: &[&str] = &["x.com", "twitter.com"];

fn is_tweet_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let bare = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("mobile."))
        .unwrap_or(&host);
    TWEET_HOSTS.contains(&bare)
}

fn status_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    // `/{user}/status/{id}` and `/i/web/status/{id}`, optionally followed by `/photo/1` etc.
    let pos = segments.iter().position(|s| *s == "status")?;
    if pos == 0 {
        return None;
    }
    let id = segments.get(pos + 1)?;
    is_numeric_id(id).then(|| id.to_string())
}

fn bookmark_post_id(url: &Url) -> Option<String> {
    if url.path().trim_end_matches('/') != "/i/bookmarks" {
        return None;
    }
    url.query_pairs()
        .find(|(k, _)| k == "post_id")
        .map(|(_, v)| v.into_owned())
        .filter(|v| is_numeric_id(v))
}

/// Post ids are 64-bit integers, so never longer than `u64::MAX` in decimal.
const MAX_POST_ID_DIGITS: usize = 20;

fn is_numeric_id(s: &str) -> bool {
    (1..=MAX_POST_ID_DIGITS).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Decide which ingestor handles a canonical URL.
///
/// Unparseable input is an error rather than a silent [`LinkKind::Website`].
pub fn classify(canonical: &str) -> Result<LinkKind, LinkError> {
    let url = Url::parse(canonical.trim())
        .map_err(|e| LinkError::Malformed(format!("{canonical}: {e}")))?;

    let Some(host) = url.host_str() else {
        return Err(LinkError::Malformed(format!("{canonical}: missing host")));
    };
    if is_tweet_host(host) && (status_id(&url).is_some() || bookmark_post_id(&url).is_some()) {
        return Ok(LinkKind::TweetOrBookmark);
    }
    Ok(LinkKind::Website)
}

/// Extract the post id from a status URL or a bookmarks URL.
pub fn post_id(canonical: &str) -> Option<String> {
    let url = Url::parse(canonical.trim()).ok()?;
    if !is_tweet_host(url.host_str()?) {
        return None;
    }
    status_id(&url).or_else(|| bookmark_post_id(&url))
}
