//! Push workflow orchestration
//!
//! Both workflows are generic over [Repository] and take plain argument
//! structs, so they can be driven programmatically without clap.

use semver::Version;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchInfo, BranchKind, BranchPatterns};
use crate::error::{ReleaseHooksError, Result};
use crate::git::{repository_name_from_url, Repository};
use crate::hooks::executor::Invocation;
use crate::hooks::{HookContext, HookExecutor, PushKind};
use crate::manifest::{package_basename, sync_version, Manifest, VersionSync};

/// Arguments for the pre-push workflow
///
/// Flags only switch checks on; the configuration supplies the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrePushArgs {
    /// `--cn` / `--checkpkgname`
    pub check_name: bool,

    /// `--cv` / `--checkpkgversion`
    pub check_version: bool,

    /// `--tagpush` / `--ontagpushexec`
    pub on_tag_push: Option<String>,

    /// `--branchpush` / `--onbranchpushexec`
    pub on_branch_push: Option<String>,
}

/// Result of a successful pre-push run
#[derive(Debug, Clone, PartialEq)]
pub struct PrePushResult {
    pub branch: BranchInfo,
    pub version_sync: VersionSync,
    /// The follow-up command that ran, if any
    pub command: Option<Invocation>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Validate the branch about to be pushed.
///
/// 1. Classify the current branch; anything but a tag, version branch or
///    master is rejected
/// 2. Master passes with no further work
/// 3. Check the manifest name against the repository name (when enabled)
/// 4. Sync the manifest version to the branch version (when enabled)
/// 5. Run the tag or branch push command (when configured)
pub fn run_pre_push_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &PrePushArgs,
) -> Result<PrePushResult> {
    let patterns = config.branches.patterns()?;
    let branch = BranchInfo::classify(repo.current_branch()?, &patterns);

    let mut result = PrePushResult {
        branch: branch.clone(),
        version_sync: VersionSync::Unchanged,
        command: None,
        warnings: Vec::new(),
    };

    let (kind, version) = match (branch.kind(), PushKind::from_branch(&branch), &branch.version) {
        (BranchKind::Other, _, _) => return Err(unrecognised_branch(&branch.name, &patterns)),
        (BranchKind::Master, _, _) => return Ok(result),
        (_, Some(kind), Some(version)) => (kind, version.clone()),
        _ => return Err(unrecognised_branch(&branch.name, &patterns)),
    };

    let check_name = args.check_name || config.pre_push.check_name;
    let check_version = args.check_version || config.pre_push.check_version;
    let command = match kind {
        PushKind::Tag => args.on_tag_push.clone().or_else(|| config.pre_push.on_tag_push.clone()),
        PushKind::Branch => args
            .on_branch_push
            .clone()
            .or_else(|| config.pre_push.on_branch_push.clone()),
    };

    let workdir = repo.workdir()?;
    let manifest_path = workdir.join(&config.manifest);

    // Without checks the manifest only resolves npm script names, so it may be absent
    let mut manifest = if check_name || check_version || manifest_path.is_file() {
        Some(Manifest::load(&manifest_path)?)
    } else {
        None
    };

    if check_name {
        if let Some(manifest) = manifest.as_ref() {
            check_package_name(repo, config, manifest)?;
        }
    }

    if check_version {
        if let Some(manifest) = manifest.as_mut() {
            if let Some(warning) = downgrade_warning(manifest.version(), &version) {
                result.warnings.push(warning);
            }

            let sync = sync_version(manifest, &version);
            if let VersionSync::Updated { from, to } = &sync {
                manifest.save()?;
                result.warnings.push(BoundaryWarning::ManifestVersionSynced {
                    from: from.clone(),
                    to: to.clone(),
                });

                if config.pre_push.fail_on_version_sync {
                    return Err(ReleaseHooksError::manifest(format!(
                        "{} updated to version {}; commit it and push again",
                        manifest.path().display(),
                        to
                    )));
                }
            }
            result.version_sync = sync;
        }
    }

    if let Some(command) = command {
        let context = HookContext {
            kind,
            branch: branch.name.clone(),
            version,
            project_dir: workdir,
        };
        result.command = Some(HookExecutor::execute(&command, &context, manifest.as_ref())?);
    }

    Ok(result)
}

fn unrecognised_branch(name: &str, patterns: &BranchPatterns) -> ReleaseHooksError {
    ReleaseHooksError::branch(format!(
        "Branch '{}' is not a release tag ({}), version branch ({}) or {}",
        name, patterns.tag.pattern, patterns.version_branch.pattern, patterns.master
    ))
}

/// Expected package name: the remote's repository name, else the work tree directory name.
pub fn expected_package_name<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<String> {
    if let Some(name) = repo
        .remote_url(&config.remote)?
        .as_deref()
        .and_then(repository_name_from_url)
    {
        return Ok(name);
    }

    let workdir = repo.workdir()?;
    workdir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ReleaseHooksError::manifest(format!(
                "Cannot derive a project name from {}",
                workdir.display()
            ))
        })
}

fn check_package_name<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    manifest: &Manifest,
) -> Result<()> {
    let expected = expected_package_name(repo, config)?;
    let actual = manifest.name().ok_or_else(|| {
        ReleaseHooksError::manifest(format!("{} has no name", manifest.path().display()))
    })?;

    if package_basename(actual) != expected {
        return Err(ReleaseHooksError::manifest(format!(
            "Package name '{}' does not match repository name '{}'",
            actual, expected
        )));
    }

    Ok(())
}

/// Warn when the manifest already carries a newer version than the branch.
/// Versions that are not valid semver are not compared.
fn downgrade_warning(manifest_version: Option<&str>, branch_version: &str) -> Option<BoundaryWarning> {
    let current = Version::parse(manifest_version?).ok()?;
    let target = Version::parse(branch_version).ok()?;

    if current > target {
        Some(BoundaryWarning::VersionDowngrade {
            manifest: current.to_string(),
            branch: target.to_string(),
        })
    } else {
        None
    }
}

/// Arguments for the release merge workflow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseMergeArgs {
    /// Remote to push master to; the configured remote when `None`
    pub remote: Option<String>,
    pub no_push: bool,
    pub dry_run: bool,
}

/// Result of a release merge
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseMergeResult {
    pub tag_branch: String,
    pub master: String,
    pub remote: String,
    /// Git operations performed, or planned for a dry run
    pub steps: Vec<String>,
    pub pushed: bool,
    pub dry_run: bool,
}

/// Merge the current release tag branch into master.
///
/// Requires a clean work tree. On a failed merge the merge is aborted and the
/// tag branch checked out again before the error is returned.
pub fn run_release_merge_workflow<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    args: &ReleaseMergeArgs,
) -> Result<ReleaseMergeResult> {
    let patterns = config.branches.patterns()?;
    let branch = BranchInfo::classify(repo.current_branch()?, &patterns);

    if !branch.is_tag {
        return Err(ReleaseHooksError::branch(format!(
            "Branch '{}' is not a release tag branch ({})",
            branch.name, patterns.tag.pattern
        )));
    }

    if !repo.is_clean()? {
        return Err(ReleaseHooksError::repository(
            "Working tree has uncommitted changes; commit or stash them first",
        ));
    }

    let master = patterns.master.clone();
    let remote = args.remote.clone().unwrap_or_else(|| config.remote.clone());
    let push = !args.no_push;

    let mut steps = vec![
        format!("git checkout {}", master),
        format!("git merge --no-ff refs/heads/{}", branch.name),
    ];
    if push {
        steps.push(format!("git push {} {}", remote, master));
    }
    steps.push(format!("git checkout {}", branch.name));

    let mut result = ReleaseMergeResult {
        tag_branch: branch.name.clone(),
        master: master.clone(),
        remote: remote.clone(),
        steps,
        pushed: false,
        dry_run: args.dry_run,
    };

    if args.dry_run {
        return Ok(result);
    }

    repo.checkout(&master)?;

    if let Err(e) = repo.merge(&branch.name) {
        // Best effort: leave the user where they started
        let _ = repo.merge_abort();
        let _ = repo.checkout(&branch.name);
        return Err(e);
    }

    let pushed = if push {
        repo.push(&remote, &master).map(|_| true)
    } else {
        Ok(false)
    };

    repo.checkout(&branch.name)?;
    result.pushed = pushed?;

    Ok(result)
}
