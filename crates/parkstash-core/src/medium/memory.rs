use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::MediumError;

use super::Medium;

/// In-process medium backed by a `HashMap`.
///
/// Availability can be switched off and a byte quota applied, which is
/// how tests reproduce disabled storage and full storage.
#[derive(Debug)]
pub struct MemoryMedium {
    items: Mutex<HashMap<String, String>>,
    available: AtomicBool,
    quota: Option<usize>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            quota: None,
        }
    }

    /// Limit the total size of all keys and values, in bytes.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Write text directly, bypassing availability and quota.
    /// Used to plant data another writer left behind.
    pub fn raw_set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.items.lock().ok().and_then(|items| items.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn items(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, MediumError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(MediumError::Unavailable("storage is disabled".to_string()));
        }
        self.items
            .lock()
            .map_err(|_| MediumError::Unavailable("storage lock poisoned".to_string()))
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl Medium for MemoryMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let mut items = self.items()?;
        if let Some(quota) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(MediumError::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        self.items()?.remove(key);
        Ok(())
    }
}
