//! Dispatch decision: which single action an invocation performs
//!
//! Pure logic. Branches are evaluated once in a fixed priority order:
//! no arguments → clean → help → list → version → fallback.

use std::path::PathBuf;

/// Flags of one invocation, independent of how they were parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// True when the program was started without any argument
    pub no_args: bool,
    pub clean: bool,
    /// Accepted for compatibility, no branch uses it
    pub download: bool,
    pub list: bool,
    /// Accepted for compatibility, no branch uses it
    pub remote: bool,
    pub localfs: Option<PathBuf>,
    pub help: bool,
    pub version: bool,
}

/// The one thing an invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    Clean { dir: PathBuf },
    /// `--clean` without `--localfs`: nothing is deleted
    CleanMissingTarget,
    ListRemotes,
    /// `--list` but the external tool is not on PATH
    ToolMissing,
    Version,
    /// No flag selected an actionable branch
    Unmatched,
}

/// Decide the action for `inv`.
///
/// Only an explicit `--localfs` selects a directory to clean. `is_installed` is
/// only called when the list branch is reached.
pub fn decide<F>(inv: &Invocation, is_installed: F) -> Action
where
    F: FnOnce() -> bool,
{
    if inv.no_args {
        return Action::Help;
    }

    if inv.clean {
        return match &inv.localfs {
            Some(dir) => Action::Clean { dir: dir.clone() },
            None => Action::CleanMissingTarget,
        };
    }

    if inv.help {
        return Action::Help;
    }

    if inv.list {
        return if is_installed() {
            Action::ListRemotes
        } else {
            Action::ToolMissing
        };
    }

    if inv.version {
        return Action::Version;
    }

    Action::Unmatched
}
