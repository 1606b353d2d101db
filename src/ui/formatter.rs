//! Pure formatting functions for UI output.
//!
//! All terminal output of the binary goes through here. Errors and warnings
//! are written to stderr, everything else to stdout.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{PrePushResult, ReleaseMergeResult};
use crate::conflict::{self, ConflictMatch};
use crate::install::{HookFileStatus, InstallReport};
use crate::manifest::{ScriptMerge, VersionSync};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render the conflict report printed when markers are found.
///
/// One header per file followed by its matching lines.
pub fn format_conflicts(matches: &[ConflictMatch]) -> String {
    let mut out = String::new();
    for (path, entries) in conflict::files(matches) {
        out.push_str(&format!("  {}\n", path.display()));
        for entry in entries {
            out.push_str(&format!("    {}: {}\n", entry.line_number, entry.line));
        }
    }
    out
}

pub fn display_conflicts(matches: &[ConflictMatch]) {
    let file_count = conflict::files(matches).len();
    display_error(&format!(
        "Conflict markers found in {} file(s):",
        file_count
    ));
    eprint!("{}", format_conflicts(matches));
}

/// Summarise a pre-push run
pub fn display_pre_push(result: &PrePushResult) {
    for warning in &result.warnings {
        display_boundary_warning(warning);
    }

    let branch = &result.branch;
    match branch.version.as_deref() {
        Some(version) => display_success(&format!(
            "Branch '{}' is a valid release branch (version {})",
            branch.name, version
        )),
        None => display_success(&format!("Branch '{}' needs no checks", branch.name)),
    }

    if let VersionSync::Updated { to, .. } = &result.version_sync {
        display_status(&format!("Manifest version is now {}", to));
    }

    if let Some(invocation) = &result.command {
        display_success(&format!("Ran '{}'", invocation));
    }
}

pub fn display_release_merge(result: &ReleaseMergeResult) {
    if result.dry_run {
        display_status("Dry run, planned steps:");
        for (i, step) in result.steps.iter().enumerate() {
            println!("  Step {}: {}", i + 1, style(step).cyan());
        }
        return;
    }

    display_success(&format!(
        "Merged '{}' into '{}'",
        result.tag_branch, result.master
    ));
    if result.pushed {
        display_success(&format!("Pushed '{}'", result.master));
    } else {
        println!(
            "\n{} To push later, run:\n  {}",
            style("→").yellow(),
            style(format!("git push {} {}", result.remote, result.master)).cyan()
        );
    }
}

pub fn display_install(report: &InstallReport) {
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }

    for hook in &report.hooks {
        let path = hook.path.display();
        match hook.status {
            HookFileStatus::Written => display_success(&format!("Installed {}", path)),
            HookFileStatus::Unchanged => display_status(&format!("{} is up to date", path)),
            // Reported through report.warnings
            HookFileStatus::Skipped => {}
        }
    }

    if let Some(hooks_path) = &report.hooks_path {
        display_success(&format!("Set core.hooksPath to {}", hooks_path));
    }

    for (name, merge) in &report.scripts {
        match merge {
            ScriptMerge::Added => display_success(&format!("Added script '{}'", name)),
            ScriptMerge::Appended => display_success(&format!("Extended script '{}'", name)),
            ScriptMerge::Unchanged => display_status(&format!("Script '{}' already set", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_conflicts_lists_files_and_lines() {
        let matches = vec![
            ConflictMatch {
                path: PathBuf::from("src/lib.rs"),
                line_number: 3,
                line: "<<<<<<< HEAD".to_string(),
            },
            ConflictMatch {
                path: PathBuf::from("src/lib.rs"),
                line_number: 7,
                line: ">>>>>>> topic".to_string(),
            },
            ConflictMatch {
                path: PathBuf::from("README.md"),
                line_number: 1,
                line: "<<<<<<< HEAD".to_string(),
            },
        ];

        let out = format_conflicts(&matches);
        assert_eq!(
            out,
            "  src/lib.rs\n    3: <<<<<<< HEAD\n    7: >>>>>>> topic\n  README.md\n    1: <<<<<<< HEAD\n"
        );
    }

    #[test]
    fn test_display_functions() {
        // Visual verification test - output is printed
        display_error("test error");
        display_success("test success");
        display_status("test status");
    }
}
