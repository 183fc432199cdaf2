mod commands;

use clap::Parser;
use commands::{execute_command, Commands};
use lastfm_explorer::{ClientConfig, LastFmApiClientImpl};

/// Search Last.fm for artists and browse their top tracks and albums
#[derive(Parser)]
#[command(
    name = "lastfm-explorer",
    about = "Search Last.fm for artists and browse their top tracks and albums",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Print the final session state as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  LASTFM_API_KEY=your_lastfm_api_key");
            eprintln!();
            eprintln!("Optional overrides:");
            eprintln!("  LASTFM_API_BASE_URL=https://ws.audioscrobbler.com/2.0/");
            eprintln!("  LASTFM_RESULT_LIMIT=10");
            std::process::exit(1);
        }
    };

    log::debug!("Using {config:?}");

    let http_client = http_client::native::NativeClient::new();
    let client = LastFmApiClientImpl::new(Box::new(http_client), config);

    if let Err(e) = execute_command(args.command, client, args.json, args.verbose).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
