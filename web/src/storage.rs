use anyhow::{anyhow, Result};
use common::PreferenceStore;
use web_sys::Storage;

/// `window.localStorage`, when the browser exposes it.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| anyhow!("No window available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| anyhow!("localStorage is not accessible: {:?}", e))?
            .ok_or_else(|| anyhow!("localStorage is disabled"))?;
        Ok(LocalStorage { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| anyhow!("Failed to store preference {key}: {:?}", e))
    }
}
