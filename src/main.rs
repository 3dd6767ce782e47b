// -- crate imports
use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

// -- module definitions
mod args;
mod linux_fs;
mod log;
mod report;
mod scan;

// -- module imports
use crate::{
    args::Args,
    report::{Finding, Status},
};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    log::init_tracing(args.no_log)?;
    info!("desktop-autostart started");
    debug!("Parsed args: {args:#?}");

    let current_desktop = args.current_desktop();
    debug!(?current_desktop, "Matching against current desktop");

    let dirs = linux_fs::collect_autostart_dirs(&args);
    let files = scan::collect_autostart_files(&dirs).await?;
    let findings: Vec<Finding> = scan::inspect_files_concurrently(files, &current_desktop, &args)
        .await
        .into_iter()
        .filter(|f| args.all || !matches!(f.status, Status::Skipped { .. }))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        return Ok(());
    }

    if findings.is_empty() {
        println!("No autostart entries found.");
        return Ok(());
    }

    for f in &findings {
        println!("- {}", f.desktop_file.display());
        if let Some(name) = f
            .entry
            .as_ref()
            .map(|e| e.name.as_str())
            .filter(|n| !n.is_empty())
        {
            println!("  Name: {name}");
        }
        if let Some(exec) = &f.exec {
            println!("  Exec: {exec}");
        }
        match &f.status {
            Status::Autostart { argv } => {
                let cmd = shlex::try_join(argv.iter().map(String::as_str))
                    .unwrap_or_else(|_| format!("{argv:?}"));
                println!("  Command: {cmd}");
            }
            Status::Skipped { reason } => println!("  Skipped: {reason}"),
            Status::Broken { reason } => println!("  Broken: {reason}"),
        }
        println!();
    }

    info!(count = findings.len(), "desktop-autostart done!");
    Ok(())
}
