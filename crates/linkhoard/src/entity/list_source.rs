//! External source tag for system-managed lists.
//!
//! A list carrying a source is created and owned by an integration (GitHub
//! stars, X bookmarks) rather than by the user. There is at most one live
//! list per user and source.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Integration that owns a source list.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ListSource {
    /// GitHub starred repositories.
    #[sea_orm(string_value = "gh")]
    #[serde(rename = "gh")]
    GitHub,
    /// X bookmarks.
    #[sea_orm(string_value = "x")]
    #[serde(rename = "x")]
    X,
}

impl ListSource {
    /// Canonical display name of the list.
    #[must_use]
    pub fn list_name(self) -> &'static str {
        match self {
            ListSource::GitHub => "GitHub Stars",
            ListSource::X => "X Bookmarks",
        }
    }

    /// Canonical slug of the list.
    #[must_use]
    pub fn list_slug(self) -> &'static str {
        match self {
            ListSource::GitHub => "github-stars",
            ListSource::X => "x-bookmarks",
        }
    }

    /// Canonical description of the list.
    #[must_use]
    pub fn list_description(self) -> &'static str {
        match self {
            ListSource::GitHub => "Repositories you have starred on GitHub",
            ListSource::X => "Posts you have bookmarked on X",
        }
    }
}

impl std::fmt::Display for ListSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListSource::GitHub => write!(f, "gh"),
            ListSource::X => write!(f, "x"),
        }
    }
}

impl std::str::FromStr for ListSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gh" => Ok(ListSource::GitHub),
            "x" => Ok(ListSource::X),
            _ => Err(format!("Unknown list source: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_display() {
        for source in [ListSource::GitHub, ListSource::X] {
            assert_eq!(source.to_string().parse::<ListSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "gitlab".parse::<ListSource>().unwrap_err();
        assert!(err.contains("gitlab"));
        // Source tags are exact, not case-folded.
        assert!("GH".parse::<ListSource>().is_err());
    }

    #[test]
    fn test_canonical_metadata() {
        assert_eq!(ListSource::GitHub.list_name(), "GitHub Stars");
        assert_eq!(ListSource::GitHub.list_slug(), "github-stars");
        assert_eq!(ListSource::X.list_slug(), "x-bookmarks");
    }
}
