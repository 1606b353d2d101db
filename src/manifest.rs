//! Reading and rewriting the project's `package.json`.
//!
//! The document is kept as a JSON object so fields this crate does not know
//! about survive a rewrite untouched and in their original order.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ReleaseHooksError, Result};

/// A project manifest loaded from disk
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    data: Map<String, Value>,
}

/// What `merge_script` did to a script entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptMerge {
    Added,
    Appended,
    Unchanged,
}

/// What `sync_version` did to the version field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSync {
    Unchanged,
    Updated { from: Option<String>, to: String },
}

impl VersionSync {
    pub fn is_updated(&self) -> bool {
        matches!(self, VersionSync::Updated { .. })
    }
}

impl Manifest {
    /// Load and parse a manifest file.
    ///
    /// # Returns
    /// * `Err(Manifest)` - If the file is missing or its root is not an object
    /// * `Err(Json)` - If the file is not valid JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReleaseHooksError::manifest(format!(
                "Manifest not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Parse manifest text that belongs at `path`.
    pub fn parse<P: AsRef<Path>>(path: P, contents: &str) -> Result<Self> {
        let path = path.as_ref();
        match serde_json::from_str::<Value>(contents)? {
            Value::Object(data) => Ok(Manifest {
                path: path.to_path_buf(),
                data,
            }),
            _ => Err(ReleaseHooksError::manifest(format!(
                "{} must contain a JSON object",
                path.display()
            ))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.data.get("version").and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        self.data
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Look up an entry of the `scripts` table
    pub fn script(&self, name: &str) -> Option<&str> {
        self.data
            .get("scripts")
            .and_then(Value::as_object)
            .and_then(|scripts| scripts.get(name))
            .and_then(Value::as_str)
    }

    /// Set a script entry, creating the `scripts` table when absent.
    pub fn set_script(&mut self, name: &str, command: &str) -> Result<()> {
        let scripts = self
            .data
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));

        match scripts {
            Value::Object(map) => {
                map.insert(name.to_string(), Value::String(command.to_string()));
                Ok(())
            }
            _ => Err(ReleaseHooksError::manifest(format!(
                "'scripts' in {} is not an object",
                self.path.display()
            ))),
        }
    }

    /// Merge a hook invocation into a script entry.
    ///
    /// An existing entry that already runs `command` is left alone; any other
    /// existing entry gets `&& command` appended.
    pub fn merge_script(&mut self, name: &str, command: &str) -> Result<ScriptMerge> {
        let merged = match self.script(name) {
            None => None,
            Some(existing) if existing.contains(command) => return Ok(ScriptMerge::Unchanged),
            Some(existing) if existing.trim().is_empty() => None,
            Some(existing) => Some(format!("{} && {}", existing.trim_end(), command)),
        };

        match merged {
            Some(line) => {
                self.set_script(name, &line)?;
                Ok(ScriptMerge::Appended)
            }
            None => {
                self.set_script(name, command)?;
                Ok(ScriptMerge::Added)
            }
        }
    }

    /// Serialize the manifest the way npm writes it.
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.data)?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Make the manifest version equal `version`.
pub fn sync_version(manifest: &mut Manifest, version: &str) -> VersionSync {
    if manifest.version() == Some(version) {
        return VersionSync::Unchanged;
    }

    let from = manifest.version().map(str::to_string);
    manifest.set_version(version);
    VersionSync::Updated {
        from,
        to: version.to_string(),
    }
}

/// Package name without an npm scope (`@scope/name` -> `name`).
pub fn package_basename(name: &str) -> &str {
    match name.strip_prefix('@') {
        Some(scoped) => scoped.split_once('/').map(|(_, n)| n).unwrap_or(name),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(contents: &str) -> Manifest {
        Manifest::parse("package.json", contents).unwrap()
    }

    #[test]
    fn test_fields() {
        let manifest = parse(r#"{"name": "demo", "version": "1.0.0", "scripts": {"test": "jest"}}"#);
        assert_eq!(manifest.name(), Some("demo"));
        assert_eq!(manifest.version(), Some("1.0.0"));
        assert_eq!(manifest.script("test"), Some("jest"));
        assert_eq!(manifest.script("build"), None);
    }

    #[test]
    fn test_non_object_root() {
        let err = Manifest::parse("package.json", "[1, 2]").unwrap_err();
        assert!(matches!(err, ReleaseHooksError::Manifest(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = Manifest::parse("package.json", "{").unwrap_err();
        assert!(matches!(err, ReleaseHooksError::Json(_)));
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(dir.path().join("package.json")).unwrap_err();
        assert!(err.to_string().contains("Manifest not found"));
    }

    #[test]
    fn test_sync_version_updates() {
        let mut manifest = parse(r#"{"name": "demo", "version": "1.0.0"}"#);
        let sync = sync_version(&mut manifest, "1.2.3");
        assert_eq!(
            sync,
            VersionSync::Updated {
                from: Some("1.0.0".to_string()),
                to: "1.2.3".to_string()
            }
        );
        assert_eq!(manifest.version(), Some("1.2.3"));
    }

    #[test]
    fn test_sync_version_unchanged() {
        let mut manifest = parse(r#"{"version": "1.2.3"}"#);
        assert_eq!(sync_version(&mut manifest, "1.2.3"), VersionSync::Unchanged);
    }

    #[test]
    fn test_sync_version_adds_missing_field() {
        let mut manifest = parse(r#"{"name": "demo"}"#);
        let sync = sync_version(&mut manifest, "0.1.0");
        assert!(sync.is_updated());
        assert_eq!(manifest.version(), Some("0.1.0"));
    }

    #[test]
    fn test_save_preserves_key_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name": "demo", "version": "1.0.0", "private": true, "dependencies": {"b": "1", "a": "2"}}"#,
        )
        .unwrap();

        let mut manifest = Manifest::load(&path).unwrap();
        sync_version(&mut manifest, "2.0.0");
        manifest.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        let name = written.find("\"name\"").unwrap();
        let version = written.find("\"version\"").unwrap();
        let private = written.find("\"private\"").unwrap();
        let b = written.find("\"b\"").unwrap();
        let a = written.find("\"a\"").unwrap();
        assert!(name < version && version < private && b < a);
        assert!(written.contains("\"version\": \"2.0.0\""));
    }

    #[test]
    fn test_merge_script_added() {
        let mut manifest = parse(r#"{"name": "demo"}"#);
        let merge = manifest.merge_script("prepush", "release-hooks pre-push").unwrap();
        assert_eq!(merge, ScriptMerge::Added);
        assert_eq!(manifest.script("prepush"), Some("release-hooks pre-push"));
    }

    #[test]
    fn test_merge_script_appended() {
        let mut manifest = parse(r#"{"scripts": {"prepush": "npm test"}}"#);
        let merge = manifest.merge_script("prepush", "release-hooks pre-push").unwrap();
        assert_eq!(merge, ScriptMerge::Appended);
        assert_eq!(
            manifest.script("prepush"),
            Some("npm test && release-hooks pre-push")
        );
    }

    #[test]
    fn test_merge_script_unchanged() {
        let mut manifest =
            parse(r#"{"scripts": {"prepush": "npm test && release-hooks pre-push"}}"#);
        let merge = manifest.merge_script("prepush", "release-hooks pre-push").unwrap();
        assert_eq!(merge, ScriptMerge::Unchanged);
    }

    #[test]
    fn test_merge_script_rejects_bad_scripts_table() {
        let mut manifest = parse(r#"{"scripts": "nope"}"#);
        assert!(manifest.merge_script("prepush", "x").is_err());
    }

    #[test]
    fn test_package_basename() {
        assert_eq!(package_basename("demo"), "demo");
        assert_eq!(package_basename("@acme/demo"), "demo");
        assert_eq!(package_basename("@broken"), "@broken");
    }
}
