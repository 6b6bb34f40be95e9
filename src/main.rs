//! Mindshare CLI
//!
//! Command-line interface for the token mindshare tracker:
//! - Add, remove and refresh tracked tokens
//! - List, search and inspect them
//! - Browse the static overview
//! - Run an interactive shell

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mindshare::config::{generate_default_config, Config};
use mindshare::overview::{OverviewView, Tab};
use mindshare::render;
use mindshare::store::{select_backend, TokenStore};
use mindshare::tracker::{Outcome, TokenDraft, TokenId, Tracker};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mindshare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track mock mindshare metrics for crypto tokens")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track a new token
    Add {
        /// Display name
        name: String,
        /// Token address
        address: String,
    },

    /// Stop tracking a token
    Remove {
        id: TokenId,
    },

    /// Regenerate a token's metrics
    Refresh {
        id: TokenId,
    },

    /// List tracked tokens
    List {
        /// Case-insensitive filter on name or address
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one token in detail
    Show {
        id: TokenId,
    },

    /// Show the static sample overview
    Overview {
        /// Token id (SOL, RUST)
        #[arg(short, long)]
        token: Option<String>,
        /// Tab to display (overview, competition, alerts)
        #[arg(long, default_value = "overview")]
        tab: Tab,
    },

    /// Interactive shell
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    mindshare::logging::init(&config.logging);

    tracing::debug!("Mindshare v{}", env!("CARGO_PKG_VERSION"));

    // Commands that never touch the store
    match &cli.command {
        Commands::Overview { token, tab } => {
            let mut view = OverviewView::default();
            if let Some(id) = token {
                if !view.select(id.as_str()) {
                    tracing::warn!("Unknown overview token '{}', showing {}", id, view.selected_token().id);
                }
            }
            view.set_tab(*tab);

            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(view.selected_token())?)
                }
                OutputFormat::Table => print!("{}", render::overview(&view)),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let backend = select_backend(&config.storage.backends, &config.storage.data_dir).await?;
    let store = TokenStore::new(backend);
    let mut tracker = Tracker::open(store, config.storage.tracker_settings()).await;

    let code = match cli.command {
        Commands::Add { name, address } => {
            let outcome = tracker.add_token(TokenDraft::new(name, address)).await?;
            match outcome {
                Outcome::Added(id) => {
                    let token = tracker.token(id)?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(token)?),
                        OutputFormat::Table => {
                            println!("Added token {}", id);
                            print!("{}", render::token_detail(token));
                        }
                    }
                    ExitCode::SUCCESS
                }
                _ => {
                    eprintln!("Name and address are required");
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Remove { id } => match tracker.remove_token(id).await? {
            Outcome::Removed(id) => {
                println!("Removed token {}", id);
                ExitCode::SUCCESS
            }
            _ => {
                println!("No token with id {} (nothing removed)", id);
                ExitCode::SUCCESS
            }
        },

        Commands::Refresh { id } => {
            tracker.refresh_token(id).await?;
            let token = tracker.token(id)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(token)?),
                OutputFormat::Table => print!("{}", render::token_detail(token)),
            }
            ExitCode::SUCCESS
        }

        Commands::List { search } => {
            let tokens = tracker.search(search.as_deref().unwrap_or(""));
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
                OutputFormat::Table => print!("{}", render::token_table(&tokens, None)),
            }
            ExitCode::SUCCESS
        }

        Commands::Show { id } => {
            let token = tracker.token(id)?;
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(token)?),
                OutputFormat::Table => print!("{}", render::token_detail(token)),
            }
            ExitCode::SUCCESS
        }

        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            mindshare::shell::run(&mut tracker, stdin, tokio::io::stdout()).await?;
            ExitCode::SUCCESS
        }

        Commands::Overview { .. } | Commands::Config { .. } => ExitCode::SUCCESS,
    };

    Ok(code)
}
