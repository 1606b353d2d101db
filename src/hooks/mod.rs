//! User command execution around `git push`
//!
//! A command configured for tag pushes or version branch pushes runs after the
//! branch has been validated and the manifest synced:
//! - tag push: `--tagpush` / `pre_push.on_tag_push`
//! - branch push: `--branchpush` / `pre_push.on_branch_push`

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::{HookContext, PushKind};
