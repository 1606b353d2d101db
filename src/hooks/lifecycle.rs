use std::collections::HashMap;
use std::path::PathBuf;

use crate::domain::BranchInfo;

/// Which kind of release push triggered the command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    Tag,
    Branch,
}

impl PushKind {
    pub fn name(&self) -> &'static str {
        match self {
            PushKind::Tag => "tag",
            PushKind::Branch => "branch",
        }
    }

    /// `None` for master and unrecognised branches
    pub fn from_branch(info: &BranchInfo) -> Option<Self> {
        if info.is_tag {
            Some(PushKind::Tag)
        } else if info.is_version_branch {
            Some(PushKind::Branch)
        } else {
            None
        }
    }
}

/// Context information passed to a user command
#[derive(Debug, Clone)]
pub struct HookContext {
    pub kind: PushKind,
    /// Branch being pushed
    pub branch: String,
    /// Version taken from the branch name
    pub version: String,
    /// Work tree root; the command runs here
    pub project_dir: PathBuf,
}

impl HookContext {
    /// Maps context fields to RELEASEHOOKS_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert(
            "RELEASEHOOKS_PUSH_KIND".to_string(),
            self.kind.name().to_string(),
        );
        env.insert("RELEASEHOOKS_BRANCH".to_string(), self.branch.clone());
        env.insert("RELEASEHOOKS_VERSION".to_string(), self.version.clone());

        env
    }
}
