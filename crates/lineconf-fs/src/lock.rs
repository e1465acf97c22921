//! Process-wide mutual exclusion for configuration file access
//!
//! Every [`ConfStore`](crate::ConfStore) entry point holds a [`StoreGuard`]
//! for its whole duration, so loads and writes from different threads never
//! interleave their file I/O.

use std::sync::{Mutex, MutexGuard, PoisonError};

static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Scoped guard over the process-wide store lock.
///
/// Released when dropped, on success and error paths alike.
#[must_use = "the store lock is released as soon as the guard is dropped"]
pub struct StoreGuard {
    _guard: MutexGuard<'static, ()>,
}

impl std::fmt::Debug for StoreGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreGuard").finish_non_exhaustive()
    }
}

/// Acquire the process-wide store lock, blocking until it is free.
///
/// A panic in a previous holder does not poison the store: the lock guards
/// no in-memory data, only the ordering of file access.
pub fn acquire() -> StoreGuard {
    let guard = STORE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    tracing::trace!("store lock acquired");
    StoreGuard { _guard: guard }
}

/// Try to acquire the store lock without blocking.
pub fn try_acquire() -> Option<StoreGuard> {
    match STORE_LOCK.try_lock() {
        Ok(guard) => Some(StoreGuard { _guard: guard }),
        Err(std::sync::TryLockError::Poisoned(poisoned)) => Some(StoreGuard {
            _guard: poisoned.into_inner(),
        }),
        Err(std::sync::TryLockError::WouldBlock) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_excludes_and_releases() {
        let guard = acquire();
        assert!(try_acquire().is_none());
        drop(guard);
        let _again = acquire();
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let _ = std::thread::spawn(|| {
            let _guard = acquire();
            panic!("holder panicked");
        })
        .join();

        let _guard = acquire();
    }
}
