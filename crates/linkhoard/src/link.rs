//! URL normalization, classification and title heuristics.
//!
//! Everything here is pure and synchronous. The canonical form produced by
//! [`normalize`] is the deduplication key for items, so it must stay stable:
//! feeding its output back in returns the same string.

mod classify;
mod normalize;
mod title;

use thiserror::Error;

pub use classify::{LinkKind, classify, post_id};
pub use normalize::{looks_like_http_url, normalize};
pub use title::{is_valid_title, title_from_url};

/// Errors produced while interpreting a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("URL is empty")]
    Empty,

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}
