pub mod boundary;
pub mod cli;
pub mod config;
pub mod conflict;
pub mod domain;
pub mod error;
pub mod git;
pub mod hooks;
pub mod install;
pub mod manifest;
pub mod ui;

pub use error::{ReleaseHooksError, Result};
