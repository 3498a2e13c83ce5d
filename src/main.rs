//! Histex CLI

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use histex::config::Config;
use histex::export::{Destination, ExportReport, Exporter};
use histex::state::{DirectoryStore, FileDirectoryStore};
use histex::{capture, HistexError};

fn usage() {
    eprintln!("Histex v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("Usage: histex [--config <file>] <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  export <capture.toml> <dir>   Export to directory");
    eprintln!("  export-last <capture.toml>    Export to last dir");
    eprintln!("  last-dir                      Show the remembered export directory");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let config_path = match take_option(&mut args, "--config") {
        Ok(path) => path.map(PathBuf::from),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    if args.is_empty() {
        usage();
        process::exit(1);
    }

    match run(config_path.as_deref(), &args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Remove `--name <value>` from `args`
fn take_option(args: &mut Vec<String>, name: &str) -> anyhow::Result<Option<String>> {
    let Some(index) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        bail!("{name} requires a value");
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

/// Run a command; `Ok(false)` means some items failed to export
fn run(config_path: Option<&Path>, args: &[String]) -> anyhow::Result<bool> {
    let config = match config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let store = config.directory_store()?;

    match (args[0].as_str(), &args[1..]) {
        ("export", [capture_file, dir]) => export(
            &config,
            store,
            Path::new(capture_file),
            Destination::Directory(PathBuf::from(dir)),
        ),
        ("export-last", [capture_file]) => {
            export(&config, store, Path::new(capture_file), Destination::LastDirectory)
        }
        ("last-dir", []) => {
            match store.read()? {
                Some(dir) => println!("{}", dir.display()),
                None => println!("No previous directory"),
            }
            Ok(true)
        }
        (command, _) => {
            eprintln!("Unknown command or arguments: {command}");
            eprintln!("Run 'histex' for usage information.");
            Ok(false)
        }
    }
}

fn export(
    config: &Config,
    store: FileDirectoryStore,
    capture_file: &Path,
    destination: Destination,
) -> anyhow::Result<bool> {
    let selection = capture::load(capture_file)?;
    let exporter = Exporter::new(store, config.export_options());

    let result = if config.export.workers > 1 {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.export.workers)
            .enable_all()
            .build()
            .context("Failed to start write workers")?;
        runtime.block_on(exporter.export_concurrent(&selection, destination))
    } else {
        exporter.export(&selection, destination)
    };

    let report: ExportReport = match result {
        Ok(report) => report,
        Err(HistexError::NoPriorDirectory) => {
            bail!("No previous export directory; run 'histex export <capture.toml> <dir>' first")
        }
        Err(e) => return Err(e.into()),
    };

    if report.is_empty() {
        println!("Nothing to export");
        return Ok(true);
    }

    println!("{report}");
    Ok(report.failed() == 0)
}
