use std::fmt;

/// Non-fatal conditions met while validating a push or installing hooks.
/// These are reported to the user but do not change the exit code.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The manifest version was rewritten to match the branch
    ManifestVersionSynced { from: Option<String>, to: String },
    /// The manifest held a newer version than the branch being pushed
    VersionDowngrade { manifest: String, branch: String },
    /// No manifest where one was expected
    ManifestMissing { path: String },
    /// A hook file already exists with different content
    HookFileSkipped { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ManifestVersionSynced { from, to } => match from {
                Some(from) => write!(
                    f,
                    "Manifest version changed from {} to {}; commit the manifest",
                    from, to
                ),
                None => write!(f, "Manifest version set to {}; commit the manifest", to),
            },
            BoundaryWarning::VersionDowngrade { manifest, branch } => {
                write!(
                    f,
                    "Manifest version {} is newer than branch version {}",
                    manifest, branch
                )
            }
            BoundaryWarning::ManifestMissing { path } => {
                write!(f, "No manifest at '{}', script entries not updated", path)
            }
            BoundaryWarning::HookFileSkipped { path } => {
                write!(
                    f,
                    "Hook '{}' already exists with different content (use --force to overwrite)",
                    path
                )
            }
        }
    }
}
