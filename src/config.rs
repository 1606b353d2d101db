use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::BranchPatterns;
use crate::error::{ReleaseHooksError, Result};

/// File name looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "releasehooks.toml";

/// Represents the complete configuration for release-hooks.
///
/// Every section falls back to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Manifest path, relative to the work tree root
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Remote used when pushing the merged master branch
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub pre_push: PrePushConfig,

    #[serde(default)]
    pub conflicts: ConflictsConfig,

    #[serde(default)]
    pub install: InstallConfig,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Branch naming patterns.
///
/// `tag` and `version_branch` must contain the `{version}` placeholder.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_tag_pattern")]
    pub tag: String,

    #[serde(default = "default_version_branch_pattern")]
    pub version_branch: String,

    #[serde(default = "default_master")]
    pub master: String,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_version_branch_pattern() -> String {
    "d{version}".to_string()
}

fn default_master() -> String {
    "master".to_string()
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            tag: default_tag_pattern(),
            version_branch: default_version_branch_pattern(),
            master: default_master(),
        }
    }
}

impl BranchesConfig {
    /// Builds the compiled branch patterns.
    pub fn patterns(&self) -> Result<BranchPatterns> {
        BranchPatterns::new(&self.tag, &self.version_branch, &self.master)
    }
}

/// Defaults for the pre-push validator. CLI flags can only switch checks on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrePushConfig {
    #[serde(default)]
    pub check_name: bool,

    #[serde(default = "default_true")]
    pub check_version: bool,

    /// Abort the push after rewriting the manifest version
    #[serde(default)]
    pub fail_on_version_sync: bool,

    #[serde(default)]
    pub on_tag_push: Option<String>,

    #[serde(default)]
    pub on_branch_push: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PrePushConfig {
    fn default() -> Self {
        PrePushConfig {
            check_name: false,
            check_version: true,
            fail_on_version_sync: false,
            on_tag_push: None,
            on_branch_push: None,
        }
    }
}

/// Conflict marker search settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConflictsConfig {
    #[serde(default = "default_conflict_pattern")]
    pub pattern: String,
}

fn default_conflict_pattern() -> String {
    crate::conflict::DEFAULT_CONFLICT_PATTERN.to_string()
}

impl Default for ConflictsConfig {
    fn default() -> Self {
        ConflictsConfig {
            pattern: default_conflict_pattern(),
        }
    }
}

/// Installer settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InstallConfig {
    /// Hooks directory created inside the target project
    #[serde(default = "default_hooks_dir")]
    pub hooks_dir: String,

    /// Point `core.hooksPath` at the hooks directory
    #[serde(default = "default_true")]
    pub set_hooks_path: bool,

    /// Program name written into the manifest scripts
    #[serde(default = "default_command")]
    pub command: String,
}

fn default_hooks_dir() -> String {
    ".githooks".to_string()
}

fn default_command() -> String {
    "release-hooks".to_string()
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            hooks_dir: default_hooks_dir(),
            set_hooks_path: true,
            command: default_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest: default_manifest(),
            remote: default_remote(),
            branches: BranchesConfig::default(),
            pre_push: PrePushConfig::default(),
            conflicts: ConflictsConfig::default(),
            install: InstallConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `releasehooks.toml` in the current directory
/// 3. `.releasehooks.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses and validates a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ReleaseHooksError::config(e.to_string()))?;

    // Reject bad branch patterns at load time rather than mid-push.
    config.branches.patterns()?;

    if config.manifest.trim().is_empty() {
        return Err(ReleaseHooksError::config("manifest path cannot be empty"));
    }

    Ok(config)
}
