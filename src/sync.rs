//! Lock helpers for store maps
//!
//! A poisoned lock means a thread panicked while holding it. Reads recover the
//! guard (the last completed batch is still readable), writes refuse to run on
//! top of a batch that may have been applied halfway.

use crate::error::{Error, Result};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for the `RwLock` guarding a store map
pub trait StoreLock<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> RwLockReadGuard<'_, T>;

    /// Acquire a write lock, failing with [`Error::LockPoisoned`] on poison
    fn write_checked(&self) -> Result<RwLockWriteGuard<'_, T>>;
}

impl<T> StoreLock<T> for RwLock<T> {
    fn read_recovered(&self) -> RwLockReadGuard<'_, T> {
        self.read().unwrap_or_else(|poisoned| {
            log::warn!("Store lock was poisoned (read), recovering");
            poisoned.into_inner()
        })
    }

    fn write_checked(&self) -> Result<RwLockWriteGuard<'_, T>> {
        self.write().map_err(|_| {
            log::warn!("Store lock was poisoned (write), refusing to commit");
            Error::LockPoisoned
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_poisoned_lock_reads_but_refuses_writes() {
        let lock = Arc::new(RwLock::new(1));
        let clone = Arc::clone(&lock);
        let _ = std::thread::spawn(move || {
            let _guard = clone.write().unwrap();
            panic!("poison");
        })
        .join();

        assert!(lock.is_poisoned());
        assert_eq!(*lock.read_recovered(), 1);
        assert!(matches!(lock.write_checked(), Err(Error::LockPoisoned)));
    }
}
