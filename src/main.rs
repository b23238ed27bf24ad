use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use fitchat::constants::{DEFAULT_HEIGHT_CM, DEFAULT_PORT, DEFAULT_WEIGHT_KG};
use fitchat::web_server::{self, AppState};
use fitchat::{chat, ChatSession, Config, Gender, GroqClient, ProfileStore};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the fitness chat web page.
    Serve {
        #[arg(long, env = "FITCHAT_PORT", default_value_t = DEFAULT_PORT, help = "Port for the web server.")]
        port: u16,
    },
    /// Chat from the terminal instead of the browser.
    Chat {
        #[arg(long, value_enum, default_value_t = Gender::Male)]
        gender: Gender,
        #[arg(long, default_value_t = DEFAULT_HEIGHT_CM, value_parser = clap::value_parser!(u16).range(100..=250), help = "Height in cm.")]
        height: u16,
        #[arg(long, default_value_t = DEFAULT_WEIGHT_KG, value_parser = clap::value_parser!(u16).range(30..=200), help = "Weight in kg.")]
        weight: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (for GROQ_API_KEY and overrides)
    dotenvy::dotenv().ok();

    // Reads log level from RUST_LOG (e.g. RUST_LOG=info,fitchat=debug).
    // Logs go to stderr so the terminal chat transcript stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // A missing API key stops the program before any surface starts.
    let config = Config::from_env().context("Configuration error")?;
    info!(?config, "fitchat starting with command: {:?}", cli.command);
    let client = Arc::new(GroqClient::new(&config));

    match cli.command {
        Commands::Serve { port } => {
            info!("Starting fitness chat on port {} with model {}...", port, client.model());
            let state = AppState::new(client, ProfileStore::default());

            let server = web_server::start_web_server(port, state);
            tokio::pin!(server);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl-C received, shutting down...");
                }
                res = &mut server => {
                    if let Err(e) = res {
                        error!("Web server failed: {:?}", e);
                        return Err(e);
                    }
                    info!("Web server task completed unexpectedly.");
                }
            }
            info!("Shutdown complete.");
        }
        Commands::Chat {
            gender,
            height,
            weight,
        } => {
            let mut profile = ProfileStore::empty();
            profile.set_gender(gender);
            profile.set_height(height)?;
            profile.set_weight(weight)?;

            let mut session = ChatSession::new(profile);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat::run_terminal_chat(&mut session, client.as_ref(), stdin, tokio::io::stdout())
                .await
                .context("Chat session failed")?;
        }
    }

    Ok(())
}
