//! Promote build outputs into the source tree.
//!
//! Builds leave pending promotions in `<build_dir>/.to-promote`. This binary
//! applies them (all, or only the named targets) and lists what is waiting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use promote::apply::{apply_last_run, parse_target, pending};
use promote::console::ConsoleReporter;
use promote::core::paths::SourcePath;
use promote::engine::Selection;
use promote::exit_codes;
use promote::io::config::load_config;
use promote::io::layout::{CONFIG_FILE_NAME, WorkspacePaths};
use promote::logging;

#[derive(Parser)]
#[command(
    name = "promote",
    version,
    about = "Promote build outputs into the source tree"
)]
struct Cli {
    /// Project root holding `promote.toml` and the build directory.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Build directory relative to the root (overrides `promote.toml`).
    #[arg(long, global = true)]
    build_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Promote files registered by the last build; all of them if no target is given.
    Apply {
        /// Source-tree files to promote, relative to the project root.
        targets: Vec<PathBuf>,
    },
    /// List promotions waiting in the ledger.
    List,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILED);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("resolve project root {}", cli.root.display()))?;
    let mut config = load_config(&root.join(CONFIG_FILE_NAME))?;
    if let Some(build_dir) = cli.build_dir {
        config.build_dir = build_dir;
        config.validate().context("invalid --build-dir")?;
    }
    let paths = WorkspacePaths::new(root, config.build_dir);

    match cli.command {
        Command::Apply { targets } => cmd_apply(&paths, &targets),
        Command::List => cmd_list(&paths),
    }
}

fn cmd_apply(paths: &WorkspacePaths, raw_targets: &[PathBuf]) -> Result<()> {
    let mut reporter = ConsoleReporter;
    if raw_targets.is_empty() {
        apply_last_run(paths, Selection::All, &mut reporter)?;
        return Ok(());
    }

    let targets = raw_targets
        .iter()
        .map(|raw| parse_target(&paths.root, raw))
        .collect::<Result<Vec<_>>>()?;
    let mut on_missing = |target: &SourcePath| println!("Nothing to promote for {target}.");
    apply_last_run(
        paths,
        Selection::Only {
            targets,
            on_missing: &mut on_missing,
        },
        &mut reporter,
    )?;
    Ok(())
}

fn cmd_list(paths: &WorkspacePaths) -> Result<()> {
    for candidate in pending(paths)? {
        println!(
            "{} <- {}",
            candidate.target_path,
            paths.display_build(candidate.correction_file()).display()
        );
    }
    Ok(())
}
