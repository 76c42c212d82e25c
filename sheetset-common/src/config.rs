//! Configuration loading and library root resolution
//!
//! Bootstrap configuration is a small TOML file; everything in it can be
//! overridden per-invocation on the command line. Resolution priority for
//! the library root:
//! 1. Command-line argument (highest priority)
//! 2. `SHEETSET_LIBRARY` environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result, Roster};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable overriding the library root
pub const LIBRARY_ENV_VAR: &str = "SHEETSET_LIBRARY";

/// Roster used when neither CLI nor config selects one
pub const DEFAULT_ROSTER: &str = "ohm";

/// Bootstrap configuration loaded from the TOML file
///
/// **Minimal by design** - the catalog and the builtin roster tables live
/// in code; the file only selects among them and points at the library.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder of the sheet music library (one subfolder per song)
    #[serde(default)]
    pub library_root: Option<PathBuf>,

    /// Name of the active roster table
    #[serde(default)]
    pub roster: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Print backend configuration (optional)
    #[serde(default)]
    pub printer: PrinterConfig,

    /// Extra roster tables, selectable by name like the builtin ones:
    /// `[rosters.skolekorps]` followed by `Trumpet = 4` lines
    #[serde(default)]
    pub rosters: HashMap<String, HashMap<String, u32>>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// How copy counts are handed to the print backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyMode {
    /// One backend invocation per plan, copy count via the backend's
    /// native copies flag
    Native,
    /// One backend invocation per physical copy
    PerCopy,
}

/// Print backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterConfig {
    /// Target printer; None uses the backend's default printer
    #[serde(default)]
    pub name: Option<String>,

    /// Ghostscript output device
    #[serde(default = "default_device")]
    pub device: String,

    /// Paper size hint passed to the backend (e.g. "a4")
    #[serde(default)]
    pub paper_size: Option<String>,

    /// Copy count style, depends on what the backend supports
    #[serde(default = "default_copy_mode")]
    pub copy_mode: CopyMode,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            name: None,
            device: default_device(),
            paper_size: None,
            copy_mode: default_copy_mode(),
        }
    }
}

fn default_device() -> String {
    if cfg!(target_os = "windows") {
        "mswinpr2".to_string()
    } else {
        "cups".to_string()
    }
}

fn default_copy_mode() -> CopyMode {
    CopyMode::Native
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sheetset").join("config.toml"))
}

/// Load configuration from the platform config file.
///
/// A missing file yields defaults; an unreadable or unparsable file is a
/// configuration error.
pub fn load_config() -> Result<TomlConfig> {
    match default_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(TomlConfig::default()),
    }
}

/// Load configuration from an explicit TOML file path
pub fn load_config_from(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the library root following the priority order documented above
pub fn resolve_library_root(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        tracing::debug!("Library root from command line: {}", path.display());
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(LIBRARY_ENV_VAR) {
        tracing::debug!("Library root from {}: {}", LIBRARY_ENV_VAR, path);
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.library_root {
        tracing::debug!("Library root from config file: {}", path.display());
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    let path = default_library_root();
    tracing::debug!("Library root defaulted to {}", path.display());
    path
}

/// OS-dependent default library root path
fn default_library_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("sheetset").join("library"))
        .unwrap_or_else(|| PathBuf::from("./sheetset_library"))
}

/// Resolve the active roster: CLI name, then config file name, then the
/// compiled default. Builtin tables win over configured tables of the
/// same name.
pub fn resolve_roster(cli_arg: Option<&str>, config: &TomlConfig) -> Result<Roster> {
    let name = cli_arg
        .or(config.roster.as_deref())
        .unwrap_or(DEFAULT_ROSTER);

    if let Some(roster) = Roster::builtin(name) {
        tracing::debug!("Using builtin roster '{}'", roster.name);
        return Ok(roster);
    }

    if let Some((key, entries)) = config
        .rosters
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        tracing::debug!("Using configured roster '{}'", key);
        return Ok(Roster::new(
            key.clone(),
            entries.iter().map(|(n, c)| (n.clone(), *c)),
        ));
    }

    Err(Error::UnknownRoster(name.to_string()))
}

/// All selectable roster names: builtin tables first, then configured ones
pub fn available_rosters(config: &TomlConfig) -> Vec<String> {
    let mut names: Vec<String> = Roster::builtin_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let mut configured: Vec<String> = config.rosters.keys().cloned().collect();
    configured.sort();
    names.extend(configured);
    names
}
