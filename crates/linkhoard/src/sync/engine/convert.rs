use std::collections::HashSet;

use chrono::DateTime;
use uuid::Uuid;

use crate::entity::item_type::ItemType;
use crate::github::StarredRepo;
use crate::repository::NewItem;

/// Split fetched stars into ones to insert and a count of ones to skip.
///
/// A star is skipped when the user already has a live item at its URL, or
/// when the same URL appeared earlier in this fetch.
pub(super) fn partition_new(
    stars: Vec<StarredRepo>,
    existing: &HashSet<String>,
) -> (Vec<StarredRepo>, usize) {
    let mut seen = HashSet::with_capacity(stars.len());
    let mut skipped = 0;
    let mut fresh = Vec::new();
    for star in stars {
        if existing.contains(&star.repo.html_url) || !seen.insert(star.repo.html_url.clone()) {
            skipped += 1;
        } else {
            fresh.push(star);
        }
    }
    (fresh, skipped)
}

/// Build the item for a starred repository.
///
/// The item is dated by when it was starred. An unparseable `starred_at`
/// falls back to the insert time.
pub fn star_to_item(user_id: Uuid, star: StarredRepo) -> NewItem {
    let StarredRepo { starred_at, repo } = star;
    let created_at = DateTime::parse_from_rfc3339(&starred_at).ok();
    if created_at.is_none() {
        tracing::debug!(repo = %repo.full_name, starred_at, "Unparseable starred_at");
    }

    let mut item = NewItem::new(user_id, repo.html_url, repo.full_name, ItemType::GithubStar);
    item.metadata = serde_json::json!({
        "language": repo.language,
        "stars": repo.stargazers_count,
        "topics": repo.topics,
        "starred_at": starred_at,
    });
    item.description = repo.description;
    item.image = repo.owner.avatar_url;
    item.created_at = created_at;
    item
}
