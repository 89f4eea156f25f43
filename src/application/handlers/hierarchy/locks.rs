//! Per-hierarchy exclusive locks for read-modify-write transactions.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::HierarchyId;

/// Hands out one async mutex per hierarchy id.
///
/// Guards are owned, so a transaction can hold one across `.await`
/// points. Entries nobody holds are dropped on the next acquire.
#[derive(Debug, Clone, Default)]
pub struct HierarchyLocks {
    locks: Arc<Mutex<HashMap<HierarchyId, Arc<Mutex<()>>>>>,
}

impl HierarchyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the lock for `id` is free and takes it.
    pub async fn acquire(&self, id: HierarchyId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|key, lock| *key == id || Arc::strong_count(lock) > 1);
            locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of ids currently tracked.
    pub async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_id_is_exclusive() {
        let locks = HierarchyLocks::new();
        let id = HierarchyId::new();

        let guard = locks.acquire(id).await;
        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_ids_do_not_block() {
        let locks = HierarchyLocks::new();
        let _first = locks.acquire(HierarchyId::new()).await;
        let _second = locks.acquire(HierarchyId::new()).await;
        assert_eq!(locks.tracked().await, 2);
    }

    #[tokio::test]
    async fn test_released_entries_are_pruned() {
        let locks = HierarchyLocks::new();
        drop(locks.acquire(HierarchyId::new()).await);
        drop(locks.acquire(HierarchyId::new()).await);

        let _held = locks.acquire(HierarchyId::new()).await;
        assert_eq!(locks.tracked().await, 1);
    }
}
