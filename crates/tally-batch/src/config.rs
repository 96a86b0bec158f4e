//! # Run Configuration
//!
//! Where the batch reads from, where it writes to, and how the HTTP API binds.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, CLI only)                    │
//! │     tally --sales otro.csv                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_SALES_FILE=otro.csv                                          │
//! │     TALLY_PORT=8080                                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config path, else the platform config dir:                       │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tally.tally/tally.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     productos.csv / ventas.csv in the working directory                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [files]
//! products = "productos.csv"
//! sales = "ventas.csv"
//! inventory_out = "inventario_actualizado.csv"
//! report_out = "reporte_ventas.txt"
//!
//! [store]
//! name = "PyTech Store"
//!
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 5000
//! ```
//!
//! The config is passed explicitly to every pipeline call. Nothing here is global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BatchError, BatchResult};

// =============================================================================
// File Settings
// =============================================================================

/// Input and output file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Product catalog source.
    #[serde(default = "default_products")]
    pub products: PathBuf,

    /// Sale request source.
    #[serde(default = "default_sales")]
    pub sales: PathBuf,

    /// Updated inventory output.
    #[serde(default = "default_inventory_out")]
    pub inventory_out: PathBuf,

    /// Text report output.
    #[serde(default = "default_report_out")]
    pub report_out: PathBuf,
}

fn default_products() -> PathBuf {
    PathBuf::from("productos.csv")
}

fn default_sales() -> PathBuf {
    PathBuf::from("ventas.csv")
}

fn default_inventory_out() -> PathBuf {
    PathBuf::from("inventario_actualizado.csv")
}

fn default_report_out() -> PathBuf {
    PathBuf::from("reporte_ventas.txt")
}

impl Default for FileSettings {
    fn default() -> Self {
        FileSettings {
            products: default_products(),
            sales: default_sales(),
            inventory_out: default_inventory_out(),
            report_out: default_report_out(),
        }
    }
}

impl FileSettings {
    /// All four files rooted in `dir`, with the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        FileSettings {
            products: dir.join(default_products()),
            sales: dir.join(default_sales()),
            inventory_out: dir.join(default_inventory_out()),
            report_out: dir.join(default_report_out()),
        }
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store identity printed on reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "PyTech Store".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// HTTP API listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Bind address (default: loopback only).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Run Config
// =============================================================================

/// Complete configuration for a batch run or an API server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub files: FileSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

impl RunConfig {
    /// Default config with all files rooted in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        RunConfig {
            files: FileSettings::in_dir(dir),
            ..Self::default()
        }
    }

    /// Loads configuration from file, environment, and defaults, then validates.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else tally.toml in the config dir)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> BatchResult<Self> {
        let config = Self::resolve_with(config_path, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Same sources as [`RunConfig::load`], with overrides read through
    /// `lookup`, and no validation.
    ///
    /// Callers with a further override layer (CLI flags) apply it first and
    /// then call [`RunConfig::validate`] once on the final values.
    pub fn resolve_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> BatchResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> BatchResult<Self> {
        info!(?path, "Loading run config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| BatchError::from_io(path, e))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> BatchResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - No file path may be empty
    /// - The two outputs must differ from each other and from both inputs
    /// - Store name must not be blank
    pub fn validate(&self) -> BatchResult<()> {
        let files = [
            ("products", &self.files.products),
            ("sales", &self.files.sales),
            ("inventory_out", &self.files.inventory_out),
            ("report_out", &self.files.report_out),
        ];

        for (name, path) in &files {
            if path.as_os_str().is_empty() {
                return Err(BatchError::Config(format!("files.{name} must not be empty")));
            }
        }

        for (out_name, out_path) in &files[2..] {
            for (other_name, other_path) in &files {
                if other_name != out_name && out_path == other_path {
                    return Err(BatchError::Config(format!(
                        "files.{out_name} must differ from files.{other_name} ({})",
                        out_path.display()
                    )));
                }
            }
        }

        if self.store.name.trim().is_empty() {
            return Err(BatchError::Config("store.name must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TALLY_PRODUCTS_FILE") {
            debug!(path = %path, "Overriding products file from environment");
            self.files.products = PathBuf::from(path);
        }

        if let Some(path) = lookup("TALLY_SALES_FILE") {
            debug!(path = %path, "Overriding sales file from environment");
            self.files.sales = PathBuf::from(path);
        }

        if let Some(path) = lookup("TALLY_INVENTORY_OUT") {
            self.files.inventory_out = PathBuf::from(path);
        }

        if let Some(path) = lookup("TALLY_REPORT_OUT") {
            self.files.report_out = PathBuf::from(path);
        }

        if let Some(name) = lookup("TALLY_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(addr) = lookup("TALLY_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("TALLY_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding server port from environment");
                    self.server.port = p;
                }
                Err(_) => warn!(port = %port, "Ignoring invalid TALLY_PORT"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }
}
