//! Per-user in-progress tracking for stars syncs.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Users with a stars sync currently running.
///
/// Clones share state. A second sync for the same user is refused while the
/// first holds its [`SyncGuard`]; different users never contend beyond the
/// brief set lookup.
#[derive(Debug, Clone, Default)]
pub struct SyncRegistry {
    active: Arc<Mutex<HashSet<Uuid>>>,
}

impl SyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user_id` as syncing, or return `None` if it already is.
    pub fn try_begin(&self, user_id: Uuid) -> Option<SyncGuard> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.insert(user_id).then(|| SyncGuard {
            registry: self.clone(),
            user_id,
        })
    }

    pub fn is_running(&self, user_id: Uuid) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&user_id)
    }
}

/// Clears the user's entry when dropped.
#[derive(Debug)]
pub struct SyncGuard {
    registry: SyncRegistry,
    user_id: Uuid,
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.registry
            .active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_user_is_rejected_until_guard_drops() {
        let registry = SyncRegistry::new();
        let user = Uuid::new_v4();

        let guard = registry.try_begin(user).expect("first sync starts");
        assert!(registry.is_running(user));
        assert!(registry.try_begin(user).is_none());

        drop(guard);
        assert!(!registry.is_running(user));
        assert!(registry.try_begin(user).is_some());
    }

    #[test]
    fn different_users_run_concurrently() {
        let registry = SyncRegistry::new();
        let _a = registry.try_begin(Uuid::new_v4()).expect("user a");
        let _b = registry.clone().try_begin(Uuid::new_v4()).expect("user b");
    }
}
