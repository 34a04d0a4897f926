//! Keel CLI: resolve target descriptors into build plans.

mod commands;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use keel_manifest::ProjectManifest;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keel", version, about = "Target-configuration resolver")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Keel project
    Init {
        /// Project name
        name: String,
    },
    /// Resolve a target into a build plan
    Plan {
        /// Target name (default: the only target, or the one named after the project)
        target: Option<String>,
        /// Resolve every target in the project
        #[arg(long, conflicts_with = "target")]
        all: bool,
        /// Minimum settings version, overriding [engine] settings-floor
        #[arg(long)]
        floor: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Inspect and create target descriptors
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Inspect the module dependency graph
    Modules {
        #[command(subcommand)]
        action: ModulesAction,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List all targets in the project
    List,
    /// Show a target descriptor
    Describe {
        /// Target name
        name: String,
    },
    /// Write a new targets/<name>.target.toml
    New {
        /// Target name
        name: String,
    },
}

#[derive(Subcommand)]
enum ModulesAction {
    /// List all modules with their direct dependencies
    List,
    /// Show the dependency tree of a target's modules
    Tree {
        /// Target name
        target: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Plan {
            target,
            all,
            floor,
            format,
        } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            commands::plan::run(
                &project_dir,
                &manifest,
                target.as_deref(),
                all,
                floor.as_deref(),
                format.as_deref(),
            )
        }

        Commands::Target { action } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            match action {
                TargetAction::List => commands::target::list(&project_dir, &manifest),
                TargetAction::Describe { name } => {
                    commands::target::describe(&project_dir, &manifest, &name)
                }
                TargetAction::New { name } => {
                    commands::target::new(&project_dir, &manifest, &name)
                }
            }
        }

        Commands::Modules { action } => {
            let (manifest, project_dir) = load_manifest_required(&cwd)?;
            match action {
                ModulesAction::List => commands::modules::list(&manifest),
                ModulesAction::Tree { target } => {
                    commands::modules::tree(&project_dir, &manifest, &target)
                }
            }
        }
    }
}

/// Load the project manifest, returning an error if none is found.
fn load_manifest_required(cwd: &Path) -> anyhow::Result<(ProjectManifest, PathBuf)> {
    match ProjectManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((manifest, dir)),
        None => anyhow::bail!("no keel.toml found (run `keel init` first)"),
    }
}
