use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    fs::config_dir,
    roster::{SortState, StatusFilter},
    seed::DEFAULT_SEED_SIZE,
};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "fleetdesk.toml";
const DEFAULT_ADMIN_SECRET: &str = "admin";

/// Handle to the shared core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access the configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize the configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub version: u16,
    /// How many mock drivers a new session is seeded with
    pub seed_size: usize,
    /// Secret accepted when confirming a driver removal
    pub admin_secret: String,
    pub roster: RosterConfig,
}

/// Initial query state for the driver roster view.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub sort: SortState,
    pub status_filter: StatusFilter,
}

impl CoreConfig {
    /// Load the configuration from `path`. A missing file is created with default values and a
    /// file that fails to parse falls back to the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring invalid configuration at {}: {e}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            debug!("Created default configuration at {}", path.display());
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }

    /// Where the configuration lives unless told otherwise.
    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            seed_size: DEFAULT_SEED_SIZE,
            admin_secret: DEFAULT_ADMIN_SECRET.into(),
            roster: RosterConfig::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use crate::roster::{SortColumn, SortDirection};

    use super::*;

    #[test]
    fn test_load_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.seed_size, 50);
        assert_eq!(cfg.admin_secret, "admin");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let mut cfg = CoreConfig::default();
        cfg.seed_size = 12;
        cfg.roster.status_filter = StatusFilter::Inactive;
        cfg.roster.sort = SortState {
            column: SortColumn::PerformanceRating,
            direction: SortDirection::Descending,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "seed_size = 5\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.seed_size, 5);
        assert_eq!(cfg.admin_secret, "admin");
        assert_eq!(cfg.roster, RosterConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "seed_size = \"many\"").unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
    }
}
