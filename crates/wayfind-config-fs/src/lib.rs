// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings on disk: one `<key>.json` file per key in a single directory.
//!
//! [`FsConfigStore::new`] uses the per-user config directory
//! (`~/.config/wayfind` on Linux); [`FsConfigStore::at`] takes any directory,
//! which is how `--config-dir` and the tests point it elsewhere.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use wayfind_app_core::config::{ConfigError, ConfigStore};

/// [`ConfigStore`] backed by a directory of JSON files.
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the platform's per-user config directory for Wayfind.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "flyingrobots", "Wayfind").ok_or(ConfigError::NoConfigDir)?;
        Self::at(dirs.config_dir())
    }

    /// Store in `dir`, created if missing.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the settings files.
    pub fn base(&self) -> &Path {
        &self.dir
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.file(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::Io(err),
        })
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        Ok(fs::write(self.file(key), data)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wayfind_app_core::config::ConfigService;
    use wayfind_app_core::prefs::{ServicePrefs, SERVICE_PREFS_KEY};

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        assert!(matches!(
            store.load_raw("absent"),
            Err(ConfigError::NotFound)
        ));
    }

    #[test]
    fn writes_json_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path().join("nested")).unwrap();
        store.save_raw("prefs", b"{}").unwrap();
        assert_eq!(store.base(), dir.path().join("nested"));
        assert!(store.base().join("prefs.json").is_file());
        assert_eq!(store.load_raw("prefs").unwrap(), b"{}");
    }

    #[test]
    fn service_prefs_persist_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());

        let prefs: ServicePrefs = service.load_or_init(SERVICE_PREFS_KEY);
        assert_eq!(prefs, ServicePrefs::default());

        let on_disk = fs::read(dir.path().join("wayfind_service.json")).unwrap();
        let parsed: ServicePrefs = serde_json::from_slice(&on_disk).unwrap();
        assert_eq!(parsed, prefs);
    }

    #[test]
    fn edited_prefs_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("wayfind_service.json"),
            br#"{"listen": "0.0.0.0:9000"}"#,
        )
        .unwrap();
        let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
        let prefs: ServicePrefs = service.load_or_init(SERVICE_PREFS_KEY);
        assert_eq!(prefs.listen, "0.0.0.0:9000");
    }
}
