use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-user serialization of metrics refreshes. A refresh holds its user's
/// guard from fetch through upsert, so snapshots are written in the order the
/// refreshes started and the last write always saw the newest entries.
#[derive(Clone, Default)]
pub struct RefreshLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl RefreshLocks {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn acquire(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drop entries nobody is holding or waiting on.
    pub async fn prune(&self) {
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_is_serialized() {
        let locks = RefreshLocks::new();
        let user = Uuid::new_v4();

        let guard = locks.acquire(user).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(second.is_err(), "Second refresh should wait for the first");

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(third.is_ok(), "Lock should be free once the first guard drops");
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = RefreshLocks::new();
        let _a = locks.acquire(Uuid::new_v4()).await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(Uuid::new_v4())).await;
        assert!(b.is_ok(), "Different users should have separate locks");
    }

    #[tokio::test]
    async fn test_prune_keeps_held_locks_only() {
        let locks = RefreshLocks::new();
        let held = locks.acquire(Uuid::new_v4()).await;
        drop(locks.acquire(Uuid::new_v4()).await);

        locks.prune().await;
        assert_eq!(locks.tracked().await, 1);

        drop(held);
        locks.prune().await;
        assert_eq!(locks.tracked().await, 0);
    }
}
