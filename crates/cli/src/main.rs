mod commands;
mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "override-guard")]
#[command(about = "Finds types that embed an interface but leave required methods to the embedded value")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze unit facts emitted by the front end
    Analyze {
        /// Path to a unit facts file or a directory of them
        path: PathBuf,

        /// Output format (default: from config, else text)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Run only these contracts (comma-separated ids)
        #[arg(long, value_delimiter = ',')]
        contracts: Option<Vec<String>>,

        /// Exclude these contracts (comma-separated ids)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Path to config file (default: .override-guard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reuse per-unit results stored in this directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Print each unit's run trace to stderr
        #[arg(long)]
        trace: bool,

        /// Suppress banner and summary
        #[arg(short, long)]
        quiet: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// List available contracts
    List {
        /// Path to config file (default: .override-guard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a default .override-guard.toml config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
    Sarif,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            contracts,
            exclude,
            config,
            cache_dir,
            trace,
            quiet,
            no_color,
        } => commands::analyze::run(
            &path, format, contracts, exclude, config, cache_dir, trace, quiet, no_color,
        ),
        Commands::List { config } => commands::list::run(config),
        Commands::Init { force } => commands::init::run(force),
    }
}
