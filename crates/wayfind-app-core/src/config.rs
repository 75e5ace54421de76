// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Keyed JSON settings behind a storage port.
//!
//! The service never touches files directly: it asks a [`ConfigService`] for
//! a typed value, and the service reads raw bytes from whatever
//! [`ConfigStore`] it was given (a directory on disk in production, memory in
//! tests).

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Where settings blobs live, addressed by key.
pub trait ConfigStore {
    /// Bytes stored under `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces whatever is stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failure reading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing is stored under the key.
    #[error("no settings stored under this key")]
    NotFound,
    /// The platform has no per-user configuration directory.
    #[error("no configuration directory for this user")]
    NoConfigDir,
    /// The backing storage failed.
    #[error("settings storage: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes are not valid JSON for the requested type.
    #[error("settings json: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Typed JSON access to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The value under `key`; `Ok(None)` when the key is absent or empty.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Stores `value` under `key` as pretty-printed JSON.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        self.store.save_raw(key, &serde_json::to_vec_pretty(value)?)
    }

    /// Never fails: a stored value wins, an absent key is seeded with
    /// `T::default()`, and an unreadable one falls back to the default
    /// without overwriting what is there.
    pub fn load_or_init<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Serialize + Default,
    {
        match self.load::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                let value = T::default();
                match self.save(key, &value) {
                    Ok(()) => debug!(key, "seeded default settings"),
                    Err(err) => warn!(%err, key, "could not persist default config"),
                }
                value
            }
            Err(err) => {
                warn!(%err, key, "unreadable config, using defaults");
                T::default()
            }
        }
    }
}
