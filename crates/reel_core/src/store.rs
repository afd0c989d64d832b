//! Session flags
//!
//! Small process-wide flags that outlive any single component, such as
//! whether the visitor has already seen the splash screen. They sit behind
//! the [`FlagStore`] key-value interface so the backing storage can be a
//! plain map in tests or a browser session store in a host.
//!
//! Lifecycle is explicit:
//!
//! - [`SessionFlags::init`] wraps a store at startup and reads what it holds
//! - components receive a cloned [`SessionFlags`] handle, never a global
//! - [`SessionFlags::teardown`] clears the store when the session ends
//!
//! ```rust
//! use reel_core::store::{MemoryFlagStore, SessionFlags, HAS_SEEN_SPLASH};
//!
//! let flags = SessionFlags::init(MemoryFlagStore::default());
//! assert!(!flags.is_set(HAS_SEEN_SPLASH));
//!
//! flags.set(HAS_SEEN_SPLASH);
//! assert!(flags.is_set(HAS_SEEN_SPLASH));
//!
//! flags.teardown();
//! assert!(!flags.is_set(HAS_SEEN_SPLASH));
//! ```

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Flag recording that the splash sequence already played this session
pub const HAS_SEEN_SPLASH: &str = "hasSeenSplash";

/// Minimal string key-value storage
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`FlagStore`]
#[derive(Clone, Debug, Default)]
pub struct MemoryFlagStore {
    values: FxHashMap<String, String>,
}

impl MemoryFlagStore {
    /// Create a store pre-populated with entries (e.g. restored session)
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// Shared handle to the session's flag store
#[derive(Clone)]
pub struct SessionFlags {
    store: Rc<RefCell<Box<dyn FlagStore>>>,
}

impl SessionFlags {
    /// Wrap a store at startup
    pub fn init<S: FlagStore + 'static>(store: S) -> Self {
        tracing::debug!(entries = store.len(), "session flags initialized");
        Self {
            store: Rc::new(RefCell::new(Box::new(store))),
        }
    }

    /// Whether a boolean flag is set
    pub fn is_set(&self, key: &str) -> bool {
        self.store
            .borrow()
            .get(key)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    /// Set a boolean flag
    pub fn set(&self, key: &str) {
        self.store.borrow_mut().set(key, "true");
    }

    /// Clear a single flag
    pub fn unset(&self, key: &str) {
        self.store.borrow_mut().remove(key);
    }

    /// Raw string access for non-boolean values
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.borrow().get(key)
    }

    /// End the session, clearing every flag
    pub fn teardown(&self) {
        let mut store = self.store.borrow_mut();
        tracing::debug!(entries = store.len(), "session flags cleared");
        store.clear();
    }
}

impl std::fmt::Debug for SessionFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFlags")
            .field("entries", &self.store.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restored_session_is_read_at_init() {
        let flags = SessionFlags::init(MemoryFlagStore::with_entries([(HAS_SEEN_SPLASH, "true")]));
        assert!(flags.is_set(HAS_SEEN_SPLASH));
    }

    #[test]
    fn test_non_true_values_are_unset() {
        let flags = SessionFlags::init(MemoryFlagStore::with_entries([("beta", "1")]));
        assert!(!flags.is_set("beta"));
        assert_eq!(flags.get("beta").as_deref(), Some("1"));
    }

    #[test]
    fn test_clones_share_store() {
        let flags = SessionFlags::init(MemoryFlagStore::default());
        let other = flags.clone();

        other.set(HAS_SEEN_SPLASH);
        assert!(flags.is_set(HAS_SEEN_SPLASH));

        flags.unset(HAS_SEEN_SPLASH);
        assert!(!other.is_set(HAS_SEEN_SPLASH));
    }

    #[test]
    fn test_teardown_clears_everything() {
        let flags = SessionFlags::init(MemoryFlagStore::default());
        flags.set("a");
        flags.set("b");
        flags.teardown();
        assert!(!flags.is_set("a"));
        assert!(!flags.is_set("b"));
    }
}
