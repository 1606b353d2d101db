//! Hook installation into a consuming project.
//!
//! Installs:
//! - `<hooks_dir>/pre-commit` and `<hooks_dir>/pre-push` inside the project
//! - `core.hooksPath` pointing git at that directory
//! - `precommit` / `prepush` entries in the manifest scripts

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::{Manifest, ScriptMerge};

const HOOK_MARKER: &str = "# installed by release-hooks";

/// A git hook and the npm script it delegates to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTemplate {
    /// File name under the hooks directory
    pub hook: &'static str,
    /// Manifest script the hook runs
    pub script: &'static str,
    /// Subcommand the script runs
    pub subcommand: &'static str,
}

pub const HOOK_TEMPLATES: [HookTemplate; 2] = [
    HookTemplate {
        hook: "pre-commit",
        script: "precommit",
        subcommand: "check-conflicts",
    },
    HookTemplate {
        hook: "pre-push",
        script: "prepush",
        subcommand: "pre-push",
    },
];

impl HookTemplate {
    /// Shell script written to the hooks directory
    pub fn contents(&self) -> String {
        format!(
            "#!/bin/sh\n{}\nnpm run --silent {} || exit 1\n",
            HOOK_MARKER, self.script
        )
    }

    /// Manifest script line, e.g. `release-hooks pre-push`
    pub fn script_command(&self, program: &str) -> String {
        format!("{} {}", program, self.subcommand)
    }
}

/// Arguments for the installer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallArgs {
    /// Overwrite hook files that differ from the templates
    pub force: bool,
    /// Leave the manifest untouched
    pub no_scripts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookFileStatus {
    Written,
    Unchanged,
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HookFile {
    pub path: PathBuf,
    pub status: HookFileStatus,
}

/// What the installer changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallReport {
    pub hooks: Vec<HookFile>,
    /// Value written to `core.hooksPath`
    pub hooks_path: Option<String>,
    /// Script name and what happened to it
    pub scripts: Vec<(String, ScriptMerge)>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Install the hooks into the work tree of `repo`.
pub fn install<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &InstallArgs,
) -> Result<InstallReport> {
    let workdir = repo.workdir()?;
    let hooks_dir = workdir.join(&config.install.hooks_dir);
    fs::create_dir_all(&hooks_dir)?;

    let mut report = InstallReport::default();

    for template in HOOK_TEMPLATES.iter() {
        let path = hooks_dir.join(template.hook);
        let contents = template.contents();

        let status = match fs::read(&path) {
            Ok(existing) if existing == contents.as_bytes() => HookFileStatus::Unchanged,
            Ok(_) if !args.force => HookFileStatus::Skipped,
            Ok(_) => {
                fs::write(&path, &contents)?;
                HookFileStatus::Written
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::write(&path, &contents)?;
                HookFileStatus::Written
            }
            Err(e) => return Err(e.into()),
        };

        // Re-apply the mode even for unchanged files; copies lose it easily
        if status == HookFileStatus::Skipped {
            report.warnings.push(BoundaryWarning::HookFileSkipped {
                path: path.display().to_string(),
            });
        } else {
            make_executable(&path)?;
        }

        report.hooks.push(HookFile { path, status });
    }

    if config.install.set_hooks_path {
        repo.set_hooks_path(&config.install.hooks_dir)?;
        report.hooks_path = Some(config.install.hooks_dir.clone());
    }

    if !args.no_scripts {
        let manifest_path = workdir.join(&config.manifest);
        if manifest_path.is_file() {
            let mut manifest = Manifest::load(&manifest_path)?;
            let mut changed = false;

            for template in HOOK_TEMPLATES.iter() {
                let command = template.script_command(&config.install.command);
                let merge = manifest.merge_script(template.script, &command)?;
                changed |= merge != ScriptMerge::Unchanged;
                report.scripts.push((template.script.to_string(), merge));
            }

            if changed {
                manifest.save()?;
            }
        } else {
            report.warnings.push(BoundaryWarning::ManifestMissing {
                path: manifest_path.display().to_string(),
            });
        }
    }

    Ok(report)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
