use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::lifecycle::DEFAULT_ACTIVITY;
use crate::errors::{AppError, AppResult};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4000";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_activity")]
    pub default_activity: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_activity() -> String {
    DEFAULT_ACTIVITY.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_activity: default_activity(),
            listen_addr: default_listen_addr(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            appdata.join("timeit")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".timeit")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timeit.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timeit.sqlite")
    }

    /// Parse a config file. An unreadable or malformed file is an error;
    /// a corrupted config must not be silently replaced with defaults.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Write the configuration file, creating the directory when missing.
    pub fn save(&self) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(Self::config_file(), yaml)
    }

    /// Initialize configuration and database paths for `timeit init`.
    /// A custom database name may be absolute or relative to the config dir.
    pub fn init_all(custom_db: Option<String>, test_mode: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() {
                    p
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let cfg = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Test runs point at throwaway databases and must not clobber the
        // user's real config file.
        if !test_mode {
            cfg.save()?;
        }

        Ok(cfg)
    }
}
