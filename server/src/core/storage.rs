//! Data directory management
//!
//! Resolution order: `CITYHOP_DATA_DIR`, then the platform data dir
//! (`%APPDATA%\CityHop`, `~/Library/Application Support/CityHop`,
//! `$XDG_DATA_HOME/cityhop`), then `./.cityhop` as a last resort.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::config::AppConfig;
use super::constants::{APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR};
use crate::utils::file::expand_path;

/// Subdirectories under the data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubdir {
    Sqlite,
    Debug,
}

impl DataSubdir {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataSubdir::Sqlite => "sqlite",
            DataSubdir::Debug => "debug",
        }
    }

    /// Subdirectories created unconditionally. Debug is created only when
    /// debug mode is on.
    pub const fn all() -> &'static [DataSubdir] {
        &[DataSubdir::Sqlite]
    }
}

#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Resolve the data directory, create it and its subdirectories
    pub async fn init(config: &AppConfig) -> Result<Self> {
        let data_dir = Self::resolve_data_dir();

        // canonicalize requires the path to exist, so create first
        Self::create_directories(&data_dir, config.debug).await?;
        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        tracing::debug!(data_dir = %data_dir.display(), "Storage initialized");

        if config.debug {
            let debug_path = data_dir.join(DataSubdir::Debug.as_str());
            tracing::warn!(path = %debug_path.display(), "Debug mode enabled");
        }

        Ok(Self { data_dir })
    }

    /// Resolve the data directory from env var or platform default
    pub fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return expand_path(&dir);
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    async fn create_directories(data_dir: &Path, debug: bool) -> Result<()> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let mut subdirs: Vec<&str> = DataSubdir::all().iter().map(|s| s.as_str()).collect();
        if debug {
            subdirs.push(DataSubdir::Debug.as_str());
        }

        for subdir in subdirs {
            let path = data_dir.join(subdir);
            tokio::fs::create_dir_all(&path).await.with_context(|| {
                format!("Failed to create {} directory: {}", subdir, path.display())
            })?;
        }

        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to a subdirectory, canonicalized when possible
    pub fn subdir(&self, subdir: DataSubdir) -> PathBuf {
        let path = self.data_dir.join(subdir.as_str());
        path.canonicalize().unwrap_or(path)
    }

    #[cfg(test)]
    pub fn init_for_test(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdir_names() {
        assert_eq!(DataSubdir::Sqlite.as_str(), "sqlite");
        assert_eq!(DataSubdir::Debug.as_str(), "debug");
        // Debug is excluded from the unconditional set
        assert!(!DataSubdir::all().contains(&DataSubdir::Debug));
    }

    #[test]
    fn resolve_data_dir_is_nonempty() {
        // SAFETY: tests in this module do not race on this env var
        unsafe { std::env::remove_var(ENV_DATA_DIR) };
        let path = AppStorage::resolve_data_dir();
        assert!(!path.as_os_str().is_empty());
    }

    #[tokio::test]
    async fn subdir_joins_under_data_dir() {
        let temp = tempfile::tempdir().unwrap();
        let storage = AppStorage::init_for_test(temp.path().to_path_buf());

        let db_dir = storage.subdir(DataSubdir::Sqlite);
        assert!(db_dir.ends_with("sqlite"));
    }
}
