mod commands;
mod config;

use bolao_core::{Bolao, BolaoConfig, BolaoError};
use clap::{Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bolao")]
#[command(about = "Bolão - lottery games, official results and shared pools")]
#[command(version)]
struct Cli {
    /// Data directory for the local store
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign out and show the current user
    #[command(subcommand)]
    Auth(commands::AuthCommands),

    /// Manage your games
    #[command(subcommand)]
    Game(commands::GameCommands),

    /// Manage official drawing results
    #[command(subcommand)]
    Result(commands::ResultCommands),

    /// Manage shared pools
    #[command(subcommand)]
    Pool(commands::PoolCommands),

    /// Score a selection against a set of drawn numbers
    Check(commands::CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cli_config = CliConfig::new(cli.data_dir, cli.verbose);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(cli_config.log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Ensure data directory exists
    tokio::fs::create_dir_all(&cli_config.data_dir).await?;

    let config = BolaoConfig::load(&cli_config.data_dir).await?;
    let app = Bolao::open(&cli_config.data_dir, config).await?;

    // Execute command
    let result = match cli.command {
        Commands::Auth(cmd) => commands::handle_auth_command(cmd, &app).await,
        Commands::Game(cmd) => commands::handle_game_command(cmd, &app).await,
        Commands::Result(cmd) => commands::handle_result_command(cmd, &app).await,
        Commands::Pool(cmd) => commands::handle_pool_command(cmd, &app).await,
        Commands::Check(args) => commands::handle_check(args),
    };

    if let Err(e) = result {
        match e {
            BolaoError::NotSignedIn => {
                eprintln!("Error: You need to sign in first");
                eprintln!("Use 'bolao auth login --email <email>' to sign in");
            }
            BolaoError::PoolNotFound { key } => {
                eprintln!("Error: Pool '{}' not found", key);
                eprintln!("Check the code with the pool admin");
            }
            BolaoError::Feed(msg) => {
                eprintln!("Error: Could not load the latest result: {}", msg);
            }
            e if e.is_user_error() => {
                eprintln!("Error: {}", e);
            }
            _ => {
                tracing::error!("Operation failed: {}", e);
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
