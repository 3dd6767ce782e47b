//! Command-line argument definitions.
//!
//! This module defines the CLI surfaced by `desktop-autostart`.

// -- std imports
use std::{env, path::PathBuf};

// -- crate imports
use clap::Parser;

/// Command-line arguments for `desktop-autostart`.
///
/// Use `--help` to see all options and defaults.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "desktop-autostart",
    about = "List XDG autostart entries for the current desktop and their expanded Exec lines"
)]
pub struct Args {
    /// Print JSON output (machine readable)
    #[arg(long)]
    pub json: bool,

    /// Do not use the XDG autostart directories
    #[arg(long)]
    pub no_default: bool,

    /// Suppress all logging output
    #[arg(long)]
    pub no_log: bool,

    /// Also report entries that should not autostart
    #[arg(long)]
    pub all: bool,

    /// Current desktop name (can be passed multiple times, defaults to $XDG_CURRENT_DESKTOP)
    #[arg(long = "desktop")]
    pub desktops: Vec<String>,

    /// URI handed to Exec field codes (can be passed multiple times)
    #[arg(long = "uri")]
    pub uris: Vec<String>,

    /// Expand this desktop action instead of the main Exec line
    #[arg(long)]
    pub action: Option<String>,

    /// Additional autostart directory to scan (can be passed multiple times)
    #[arg(long = "dir")]
    pub extra_dirs: Vec<PathBuf>,

    /// Max concurrent file loads (defaults to CPU count * 4)
    #[arg(long)]
    pub jobs: Option<usize>,
}

impl Args {
    /// Desktop names to match `OnlyShowIn`/`NotShownIn` against.
    ///
    /// Uses `--desktop` when given, otherwise `$XDG_CURRENT_DESKTOP` split on `:`.
    pub fn current_desktop(&self) -> Vec<String> {
        if !self.desktops.is_empty() {
            return self.desktops.clone();
        }
        split_current_desktop(&env::var("XDG_CURRENT_DESKTOP").unwrap_or_default())
    }
}

/// Split a `$XDG_CURRENT_DESKTOP` value into desktop names.
pub fn split_current_desktop(value: &str) -> Vec<String> {
    value
        .split(':')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_current_desktop() {
        assert_eq!(split_current_desktop("ubuntu:GNOME"), vec!["ubuntu", "GNOME"]);
        assert_eq!(split_current_desktop("KDE::"), vec!["KDE"]);
        assert!(split_current_desktop("").is_empty());
    }

    #[test]
    fn explicit_desktops_win() {
        let args = Args::parse_from(["desktop-autostart", "--desktop", "XFCE", "--desktop", "X"]);
        assert_eq!(args.current_desktop(), vec!["XFCE", "X"]);
    }
}
