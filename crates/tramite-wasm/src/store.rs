//! `KeyValueStore` backed by `window.localStorage`

use web_sys::{Storage, Window};

use tramite_site::{KeyValueStore, Result, SiteError};

use crate::js::describe;

pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    /// `localStorage` may be missing or throw (privacy modes); every call then errors
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| SiteError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| SiteError::Storage(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| SiteError::Storage(describe(&err)))
    }
}
