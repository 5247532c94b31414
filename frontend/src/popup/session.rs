use log::warn;
use thiserror::Error;
use web_sys::{window, Storage};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("session storage rejected key `{0}`")]
    Rejected(String),
}

/// Per-tab key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// `window.sessionStorage`, looked up on every access so a missing window
/// only surfaces as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserSessionStore;

impl BrowserSessionStore {
    fn storage() -> Result<Storage, StoreError> {
        window()
            .and_then(|w| w.session_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Rejected(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Rejected(key.to_string()))
    }
}

pub fn dismissed_key(provider_id: &str) -> String {
    format!("dismissed-{}", provider_id)
}

pub fn dont_show_key(provider_id: &str) -> String {
    format!("dontshow-{}", provider_id)
}

/// What a provider's popup remembers for the lifetime of the tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionRecord {
    /// `None` until the visitor has dismissed the popup at least once.
    pub dismiss_count: Option<u32>,
    pub suppressed: bool,
}

impl SessionRecord {
    pub fn load(store: &dyn SessionStore, provider_id: &str) -> Self {
        let suppressed = match store.get(&dont_show_key(provider_id)) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!("Could not read suppress flag for {}: {}", provider_id, e);
                false
            }
        };

        let dismiss_count = match store.get(&dismissed_key(provider_id)) {
            Ok(value) => value.map(|raw| parse_count(&raw, provider_id)),
            Err(e) => {
                warn!("Could not read dismiss count for {}: {}", provider_id, e);
                None
            }
        };

        Self {
            dismiss_count,
            suppressed,
        }
    }
}

fn parse_count(raw: &str, provider_id: &str) -> u32 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(
            "Malformed dismiss count {:?} for {}, treating as 0",
            raw, provider_id
        );
        0
    })
}

pub fn persist_dismiss_count(
    store: &dyn SessionStore,
    provider_id: &str,
    count: u32,
) -> Result<(), StoreError> {
    store.set(&dismissed_key(provider_id), &count.to_string())
}

pub fn persist_suppressed(store: &dyn SessionStore, provider_id: &str) -> Result<(), StoreError> {
    store.set(&dont_show_key(provider_id), "true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        entries: RefCell<HashMap<String, String>>,
    }

    impl SessionStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected(key.to_string()))
        }
    }

    #[test]
    fn empty_store_is_a_first_visit() {
        let store = MemoryStore::default();
        assert_eq!(SessionRecord::load(&store, "xfinity"), SessionRecord::default());
    }

    #[test]
    fn persisted_values_round_trip_under_provider_keys() {
        let store = MemoryStore::default();
        persist_dismiss_count(&store, "xfinity", 1).unwrap();
        persist_suppressed(&store, "xfinity").unwrap();

        assert_eq!(store.get("dismissed-xfinity").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("dontshow-xfinity").unwrap().as_deref(), Some("true"));
        assert_eq!(
            SessionRecord::load(&store, "xfinity"),
            SessionRecord {
                dismiss_count: Some(1),
                suppressed: true,
            }
        );
    }

    #[test]
    fn records_are_scoped_per_provider() {
        let store = MemoryStore::default();
        persist_dismiss_count(&store, "spectrum", 2).unwrap();
        persist_suppressed(&store, "spectrum").unwrap();

        assert_eq!(SessionRecord::load(&store, "att"), SessionRecord::default());
    }

    #[test]
    fn malformed_count_reads_as_zero() {
        let store = MemoryStore::default();
        store.set("dismissed-att", "twice").unwrap();
        assert_eq!(SessionRecord::load(&store, "att").dismiss_count, Some(0));

        store.set("dismissed-att", "-3").unwrap();
        assert_eq!(SessionRecord::load(&store, "att").dismiss_count, Some(0));

        // Present but empty still counts as a prior visit.
        store.set("dismissed-att", "").unwrap();
        assert_eq!(SessionRecord::load(&store, "att").dismiss_count, Some(0));

        store.set("dismissed-att", " 2 ").unwrap();
        assert_eq!(SessionRecord::load(&store, "att").dismiss_count, Some(2));
    }

    #[test]
    fn only_literal_true_suppresses() {
        let store = MemoryStore::default();
        store.set("dontshow-att", "false").unwrap();
        assert!(!SessionRecord::load(&store, "att").suppressed);

        store.set("dontshow-att", "yes").unwrap();
        assert!(!SessionRecord::load(&store, "att").suppressed);
    }

    #[test]
    fn unavailable_storage_falls_back_to_first_visit() {
        assert_eq!(SessionRecord::load(&BrokenStore, "att"), SessionRecord::default());
        assert_eq!(
            persist_suppressed(&BrokenStore, "att"),
            Err(StoreError::Rejected("dontshow-att".to_string()))
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn session_storage_backs_the_record() {
        let store = BrowserSessionStore;
        persist_dismiss_count(&store, "browser-test", 1).unwrap();

        let record = SessionRecord::load(&store, "browser-test");
        assert_eq!(record.dismiss_count, Some(1));
        assert!(!record.suppressed);
    }

    #[wasm_bindgen_test]
    fn session_storage_keeps_providers_apart() {
        let store = BrowserSessionStore;
        persist_suppressed(&store, "browser-a").unwrap();

        assert!(SessionRecord::load(&store, "browser-a").suppressed);
        assert!(!SessionRecord::load(&store, "browser-b").suppressed);
    }
}
