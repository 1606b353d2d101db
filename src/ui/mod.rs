//! User interface module.
//!
//! The hooks run non-interactively inside `git`, so there are no prompts;
//! this module only re-exports the formatter.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_conflicts, display_error, display_install,
    display_pre_push, display_release_merge, display_status, display_success, format_conflicts,
};
