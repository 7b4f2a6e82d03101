mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, init::InitArgs};
use readme_core::config::Mode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "readme",
    about = "Keep a project README's managed sections and badges in canonical form",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from readme.yaml or .git/)
    #[arg(long, global = true, env = "README_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write readme.yaml for this project
    Init(InitArgs),

    /// Merge the managed sections into README.md
    Write {
        /// Override the mode from readme.yaml (create or migrate)
        #[arg(long)]
        mode: Option<Mode>,

        /// Print the merged document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Fail when README.md would change on the next write
    Check {
        /// Override the mode from readme.yaml (create or migrate)
        #[arg(long)]
        mode: Option<Mode>,
    },

    /// List the badge catalog and what each badge renders to
    Badges,

    /// Validate readme.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init(args) => cmd::init::run(&root, args, cli.json),
        Commands::Write { mode, dry_run } => cmd::write::run(&root, mode, dry_run, cli.json),
        Commands::Check { mode } => cmd::check::run(&root, mode, cli.json),
        Commands::Badges => cmd::badges::run(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
