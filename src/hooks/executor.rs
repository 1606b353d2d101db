use std::process::Command;

use crate::error::{ReleaseHooksError, Result};
use crate::hooks::HookContext;
use crate::manifest::Manifest;

/// How a configured command string will be launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `npm run <script>`
    NpmScript(String),
    /// Passed to the platform shell as-is
    Shell(String),
}

impl Invocation {
    /// A command naming a manifest script runs through npm, anything else through the shell.
    pub fn resolve(command: &str, manifest: Option<&Manifest>) -> Result<Self> {
        let command = command.trim();
        if command.is_empty() {
            return Err(ReleaseHooksError::command("Empty command"));
        }

        match manifest.and_then(|m| m.script(command)) {
            Some(_) => Ok(Invocation::NpmScript(command.to_string())),
            None => Ok(Invocation::Shell(command.to_string())),
        }
    }

    fn to_command(&self) -> Command {
        match self {
            Invocation::NpmScript(script) => {
                let mut cmd = Command::new(npm_program());
                cmd.args(["run", script.as_str()]);
                cmd
            }
            Invocation::Shell(line) => shell_command(line),
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invocation::NpmScript(script) => write!(f, "npm run {}", script),
            Invocation::Shell(line) => write!(f, "{}", line),
        }
    }
}

#[cfg(windows)]
fn npm_program() -> &'static str {
    "npm.cmd"
}

#[cfg(not(windows))]
fn npm_program() -> &'static str {
    "npm"
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", line]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", line]);
    cmd
}

/// Runs user-configured push commands
pub struct HookExecutor;

impl HookExecutor {
    /// Execute a command with the given context
    ///
    /// The command runs in the project directory with the context exported as
    /// environment variables and the terminal inherited, so its output reaches
    /// the user directly. Any non-zero exit code is a failure.
    ///
    /// # Returns
    /// * `Ok(Invocation)` - What was run
    /// * `Err` - If the command is empty, cannot be spawned or exits non-zero
    pub fn execute(
        command: &str,
        context: &HookContext,
        manifest: Option<&Manifest>,
    ) -> Result<Invocation> {
        let invocation = Invocation::resolve(command, manifest)?;

        let mut cmd = invocation.to_command();
        cmd.current_dir(&context.project_dir);
        cmd.envs(context.to_env_vars());

        let status = cmd.status().map_err(|e| {
            ReleaseHooksError::command(format!("Failed to execute '{}': {}", invocation, e))
        })?;

        if !status.success() {
            return Err(ReleaseHooksError::command(format!(
                "'{}' failed with exit code {}",
                invocation,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::PushKind;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> HookContext {
        HookContext {
            kind: PushKind::Tag,
            branch: "v1.2.3".to_string(),
            version: "1.2.3".to_string(),
            project_dir: dir.path().to_path_buf(),
        }
    }

    #[test]
    fn test_resolve_npm_script() {
        let manifest =
            Manifest::parse("package.json", r#"{"scripts": {"release": "np"}}"#).unwrap();
        assert_eq!(
            Invocation::resolve("release", Some(&manifest)).unwrap(),
            Invocation::NpmScript("release".to_string())
        );
        assert_eq!(
            Invocation::resolve("make release", Some(&manifest)).unwrap(),
            Invocation::Shell("make release".to_string())
        );
        assert_eq!(
            Invocation::resolve("release", None).unwrap(),
            Invocation::Shell("release".to_string())
        );
    }

    #[test]
    fn test_resolve_empty_command() {
        assert!(Invocation::resolve("   ", None).is_err());
    }

    #[test]
    fn test_invocation_display() {
        assert_eq!(
            Invocation::NpmScript("deploy".to_string()).to_string(),
            "npm run deploy"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_success_sees_context() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let result = HookExecutor::execute(
            "test \"$RELEASEHOOKS_VERSION\" = 1.2.3 && test \"$RELEASEHOOKS_PUSH_KIND\" = tag && touch ran",
            &ctx,
            None,
        );
        assert!(result.is_ok());
        assert!(dir.path().join("ran").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_failure_reports_exit_code() {
        let dir = TempDir::new().unwrap();
        let err = HookExecutor::execute("exit 3", &context(&dir), None).unwrap_err();
        assert!(err.to_string().contains("exit code 3"));
    }
}
