//! Domain logic - pure naming rules independent of git operations

pub mod branch;

pub use branch::{BranchInfo, BranchKind, BranchPatterns, VersionPattern};
