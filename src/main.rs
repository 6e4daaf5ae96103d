use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use roastme::engines::EngineKind;

mod commands;

#[derive(Parser)]
#[command(
    name = "roastme",
    version,
    about = "Because your code deserves tough love. Roast your code files, commits, and staged changes.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    roast: RoastArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// List roasting engines and whether they are ready to use.
    Engines {
        /// Path to config file.
        #[arg(long, default_value = roastme::config::CONFIG_FILE)]
        config: PathBuf,
    },

    /// Write a default .roastmerc.
    Init {
        /// Where to write the config file.
        #[arg(default_value = roastme::config::CONFIG_FILE)]
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct RoastArgs {
    /// File or directory to roast.
    path: Option<PathBuf>,

    /// Roast mode: gentle, savage, or toxic.
    #[arg(short, long)]
    mode: Option<String>,

    /// Roasting engine: static, ollama, or openai.
    #[arg(short, long)]
    engine: Option<EngineKind>,

    /// Model name for the ollama or openai engine.
    #[arg(long)]
    model: Option<String>,

    /// OpenAI API key (defaults to $OPENAI_API_KEY).
    #[arg(long)]
    api_key: Option<String>,

    /// Roast the latest commit message and diff.
    #[arg(short, long)]
    commit: bool,

    /// Roast staged changes.
    #[arg(short, long)]
    staged: bool,

    /// Render a meme for each roast.
    #[arg(long)]
    meme: bool,

    /// Path to config file.
    #[arg(long, default_value = roastme::config::CONFIG_FILE)]
    config: PathBuf,

    /// Output format: pretty, text, or json.
    #[arg(long, default_value = "pretty")]
    format: String,
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Engines { config }) => commands::engines::run(&config).await,
        Some(Command::Init { path }) => commands::init::run(&path),
        None => commands::roast::run(cli.roast).await,
    }
}
