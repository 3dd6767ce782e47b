//! Autostart directory discovery.
//!
//! Directories are returned most important first, following the XDG Autostart
//! specification: `$XDG_CONFIG_HOME/autostart`, then each `$XDG_CONFIG_DIRS/autostart`
//! in order. User-provided directories come first of all.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use tracing::debug;
use xdg::BaseDirectories;

// -- module imports
use crate::args::Args;

/// Collect autostart directories in priority order, without duplicates.
pub fn collect_autostart_dirs(args: &Args) -> Vec<PathBuf> {
    let mut dirs = Vec::<PathBuf>::new();
    let mut push = |dir: PathBuf| {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    };

    args.extra_dirs.iter().cloned().for_each(&mut push);

    if !args.no_default {
        let xdg = BaseDirectories::new();
        match xdg.get_config_home() {
            Some(config_home) => push(config_home.join("autostart")),
            None => debug!("XDG config home unavailable; skipping user autostart dir"),
        }
        for dir in xdg.get_config_dirs() {
            push(dir.join("autostart"));
        }
    }

    debug!(count = dirs.len(), "Collected autostart dirs: {dirs:#?}");
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn extra_dirs_only_with_no_default() {
        let args = Args::parse_from([
            "desktop-autostart",
            "--no-default",
            "--dir",
            "/a",
            "--dir",
            "/b",
            "--dir",
            "/a",
        ]);
        assert_eq!(
            collect_autostart_dirs(&args),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn default_dirs_follow_extra_dirs() {
        let args = Args::parse_from(["desktop-autostart", "--dir", "/extra"]);
        let dirs = collect_autostart_dirs(&args);
        assert_eq!(dirs[0], PathBuf::from("/extra"));
        assert!(dirs[1..].iter().all(|d| d.ends_with("autostart")));
    }
}
