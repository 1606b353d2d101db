//! Command line definition.
//!
//! Kept in the library so the argument surface can be tested with
//! `Cli::try_parse_from` without spawning the binary.

pub mod orchestration;

use clap::{Parser, Subcommand};

use crate::cli::orchestration::{PrePushArgs, ReleaseMergeArgs};
use crate::install::InstallArgs;

#[derive(Parser, Debug)]
#[command(
    name = "release-hooks",
    version,
    about = "Git hooks that gate pushes on version-named branches"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Fail if any tracked file contains conflict markers
    CheckConflicts,

    /// Validate the current branch before pushing
    PrePush {
        #[arg(
            long = "checkpkgname",
            visible_alias = "cn",
            help = "Require the manifest name to match the repository name"
        )]
        check_name: bool,

        #[arg(
            long = "checkpkgversion",
            visible_alias = "cv",
            help = "Sync the manifest version with the branch version"
        )]
        check_version: bool,

        #[arg(
            long = "ontagpushexec",
            visible_alias = "tagpush",
            value_name = "CMD",
            help = "Command or npm script to run when pushing a release tag branch"
        )]
        on_tag_push: Option<String>,

        #[arg(
            long = "onbranchpushexec",
            visible_alias = "branchpush",
            value_name = "CMD",
            help = "Command or npm script to run when pushing a version branch"
        )]
        on_branch_push: Option<String>,
    },

    /// Install the hooks into a project
    Install {
        #[arg(long, value_name = "PATH", help = "Project directory (default: current directory)")]
        dir: Option<String>,

        #[arg(short, long, help = "Overwrite hook files that differ")]
        force: bool,

        #[arg(long, help = "Do not touch the manifest scripts")]
        no_scripts: bool,
    },

    /// Merge the current release tag branch into master and push it
    MergeRelease {
        #[arg(long, help = "Remote to push master to")]
        remote: Option<String>,

        #[arg(long, help = "Merge locally without pushing")]
        no_push: bool,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
}

impl Commands {
    pub fn pre_push_args(&self) -> Option<PrePushArgs> {
        match self {
            Commands::PrePush {
                check_name,
                check_version,
                on_tag_push,
                on_branch_push,
            } => Some(PrePushArgs {
                check_name: *check_name,
                check_version: *check_version,
                on_tag_push: on_tag_push.clone(),
                on_branch_push: on_branch_push.clone(),
            }),
            _ => None,
        }
    }

    pub fn install_args(&self) -> Option<InstallArgs> {
        match self {
            Commands::Install {
                force, no_scripts, ..
            } => Some(InstallArgs {
                force: *force,
                no_scripts: *no_scripts,
            }),
            _ => None,
        }
    }

    pub fn release_merge_args(&self) -> Option<ReleaseMergeArgs> {
        match self {
            Commands::MergeRelease {
                remote,
                no_push,
                dry_run,
            } => Some(ReleaseMergeArgs {
                remote: remote.clone(),
                no_push: *no_push,
                dry_run: *dry_run,
            }),
            _ => None,
        }
    }
}
