//! Async scanning and concurrent inspection of autostart entries.
//!
//! Responsibilities:
//! - Discover `.desktop` files in the autostart directories, letting a file in a more
//!   important directory shadow a same-named file in a less important one.
//! - Load each file concurrently (bounded parallelism).
//! - Turn autostart decisions and Exec expansion into `Finding` records.

// -- std imports
use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

// -- crate imports
use anyhow::{Context, Result};
use desktop_autostart::DesktopEntry;
use futures::stream::{self, StreamExt};
use tokio::{fs, sync::Semaphore};
use tracing::{debug, warn};

// -- module imports
use crate::{
    args::Args,
    report::{Finding, Status},
};

/// Collect autostart `.desktop` files from `dirs`, most important directory first.
///
/// Autostart directories are flat, so no recursion happens. Missing or unreadable
/// directories are skipped. The result is sorted by file name.
pub async fn collect_autostart_files(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut by_name = BTreeMap::<OsString, PathBuf>::new();

    for dir in dirs {
        let mut rd = match fs::read_dir(dir).await {
            Ok(rd) => rd,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Skipping autostart dir");
                continue;
            }
        };

        while let Some(ent) = rd
            .next_entry()
            .await
            .with_context(|| format!("Failed to list {}", dir.display()))?
        {
            let p = ent.path();
            if p.extension().and_then(|e| e.to_str()) != Some("desktop") {
                continue;
            }
            // Follows symlinks; dangling links fail here and are skipped.
            match fs::metadata(&p).await {
                Ok(md) if md.is_file() => {}
                _ => continue,
            }
            let name = ent.file_name();
            if let Some(winner) = by_name.get(&name) {
                debug!(shadowed = %p.display(), by = %winner.display(), "Entry shadowed");
                continue;
            }
            by_name.insert(name, p);
        }
    }

    Ok(by_name.into_values().collect())
}

/// Inspect `files` concurrently with bounded parallelism.
///
/// - `args.jobs` controls max concurrency.
/// - Per-file errors become `Broken` findings.
/// - The output keeps the order of `files`.
pub async fn inspect_files_concurrently(
    files: Vec<PathBuf>,
    current_desktop: &[String],
    args: &Args,
) -> Vec<Finding> {
    let jobs = args
        .jobs
        .unwrap_or_else(|| num_cpus::get().saturating_mul(4).max(8))
        .max(1);

    let sem = Semaphore::new(jobs);
    debug!(jobs, files = files.len(), "Starting concurrent inspection");

    let mut findings: Vec<(usize, Finding)> = stream::iter(files.into_iter().enumerate())
        .map(|(idx, path)| {
            let sem = &sem;
            async move {
                let finding = match sem.acquire().await {
                    Ok(_permit) => match inspect_one(&path, current_desktop, args).await {
                        Ok(f) => f,
                        Err(e) => {
                            warn!(file = %path.display(), error = %e, "Failed to inspect file");
                            Finding::broken(path, format!("{e:#}"))
                        }
                    },
                    Err(e) => Finding::broken(path, format!("{e}")),
                };
                (idx, finding)
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    findings.sort_by_key(|(idx, _)| *idx);
    findings.into_iter().map(|(_, f)| f).collect()
}

/// Load a single file and decide its `Status`.
async fn inspect_one(path: &Path, current_desktop: &[String], args: &Args) -> Result<Finding> {
    let content = fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entry = DesktopEntry::parse(path, content.as_slice())?;

    let exec = match &args.action {
        Some(action) => entry.actions.get(action).map(|a| a.exec.clone()),
        None => Some(entry.exec.clone()),
    };

    let status = match entry.autostart_verdict(current_desktop) {
        Err(reason) => Status::Skipped {
            reason: reason.to_string(),
        },
        Ok(()) => {
            let expanded = match &args.action {
                Some(action) => entry.expand_action_exec(action, &args.uris),
                None => entry.expand_exec(&args.uris),
            };
            match expanded {
                Ok(argv) => Status::Autostart { argv },
                Err(e) => Status::Broken {
                    reason: e.to_string(),
                },
            }
        }
    };

    Ok(Finding {
        desktop_file: path.to_path_buf(),
        entry: Some(entry),
        exec,
        status,
    })
}
