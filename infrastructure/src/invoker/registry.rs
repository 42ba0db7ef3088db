//! Session registry: one lazily created handle per agent name.
//!
//! Transports that keep per-agent state (an HTTP connection pool, a warm
//! subprocess) store it here instead of in a process-wide global. The
//! registry is built once at start-up and shared through an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Map of agent name to a shared session handle.
///
/// Handles are created at most once per name, even under concurrent
/// callers, and are never evicted.
pub struct SessionRegistry<H> {
    sessions: Mutex<HashMap<String, Arc<H>>>,
}

impl<H> SessionRegistry<H> {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Return the handle for `name`, creating it with `create` on first use.
    pub fn get_or_create<F>(&self, name: &str, create: F) -> Arc<H>
    where
        F: FnOnce() -> H,
    {
        let mut sessions = self.lock();
        if let Some(handle) = sessions.get(name) {
            return Arc::clone(handle);
        }
        let handle = Arc::new(create());
        sessions.insert(name.to_string(), Arc::clone(&handle));
        handle
    }

    /// Like [`get_or_create`](Self::get_or_create) with a fallible factory.
    ///
    /// Nothing is stored when `create` fails, so the next call retries.
    pub fn get_or_try_create<F, E>(&self, name: &str, create: F) -> Result<Arc<H>, E>
    where
        F: FnOnce() -> Result<H, E>,
    {
        let mut sessions = self.lock();
        if let Some(handle) = sessions.get(name) {
            return Ok(Arc::clone(handle));
        }
        let handle = Arc::new(create()?);
        sessions.insert(name.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    pub fn get(&self, name: &str) -> Option<Arc<H>> {
        self.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<H>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<H> Default for SessionRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_same_name_returns_same_handle() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create("judge", || String::from("session-1"));
        let b = registry.get_or_create("judge", || String::from("session-2"));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, "session-1");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_names_get_distinct_handles() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create("judge", || 1);
        let b = registry.get_or_create("critic", || 2);

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("critic").as_deref(), Some(&2));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_concurrent_callers_create_once() {
        let registry = SessionRegistry::new();
        let created = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry.get_or_create("judge", || {
                        created.fetch_add(1, Ordering::SeqCst);
                        42
                    });
                });
            }
        });

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_creation_is_not_stored() {
        let registry: SessionRegistry<u32> = SessionRegistry::new();

        let err = registry
            .get_or_try_create("judge", || Err::<u32, _>("no route"))
            .unwrap_err();
        assert_eq!(err, "no route");
        assert!(registry.is_empty());

        let handle = registry
            .get_or_try_create("judge", || Ok::<_, &str>(7))
            .unwrap();
        assert_eq!(*handle, 7);
    }
}
