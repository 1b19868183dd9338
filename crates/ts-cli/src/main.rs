//! TuneScout CLI
//!
//! Consumer front end for the auth flow and catalog search: `login` walks
//! the authorization redirect by hand (print URL, paste redirect back),
//! `search` issues authenticated track queries, `logout` clears the
//! stored credentials.

mod config;
mod paths;

use clap::{Parser, Subcommand};
use std::io::Write;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ts_catalog::CatalogClient;
use ts_oauth::{MemoryNavigation, Navigation, SessionController, SessionState};
use ts_store::FileStore;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "tunescout", about = "Search a music catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize with the catalog provider and store the access token
    Login,
    /// Show the current session state
    Status,
    /// Search for tracks (requires a prior login)
    Search {
        /// Free-text query
        query: String,
        /// Maximum number of tracks to return
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Clear the stored token and verifier
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunescout=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let cli_config = CliConfig::load(&paths::config_file()?)?;
    let auth_config = cli_config.auth_config()?;
    let storage = FileStore::new(paths::credentials_file()?);

    // The navigation capability stands in for the browser location bar:
    // it starts at the registered redirect URI and is replaced with the
    // pasted redirect URL during login.
    let navigation = MemoryNavigation::new(auth_config.redirect_uri.clone());
    let mut controller = SessionController::new(
        auth_config,
        cli_config.grant,
        storage,
        navigation.clone(),
    );

    match cli.command {
        Commands::Login => {
            let url = controller.login()?;
            println!("Open this URL in your browser and authorize TuneScout:\n");
            println!("  {}\n", url);
            print!("Paste the full URL you were redirected to: ");
            std::io::stdout().flush()?;

            let mut redirect = String::new();
            std::io::stdin().read_line(&mut redirect)?;
            navigation.replace_url(redirect.trim());

            match controller.resume().await? {
                SessionState::Authenticated => {
                    info!("Login complete");
                    println!("Logged in. Token stored for future runs.");
                }
                _ => {
                    let reason = controller
                        .session()
                        .error
                        .clone()
                        .unwrap_or_else(|| "no code or token in redirect URL".to_string());
                    anyhow::bail!("Login failed: {}", reason);
                }
            }
        }
        Commands::Status => match controller.resume().await? {
            SessionState::Authenticated => println!("Authenticated (token stored)."),
            SessionState::AuthError => println!(
                "Auth error: {}",
                controller.session().error.as_deref().unwrap_or("unknown")
            ),
            _ => println!("Not authenticated. Run `tunescout login`."),
        },
        Commands::Search { query, limit } => {
            if controller.resume().await? != SessionState::Authenticated {
                anyhow::bail!("Not authenticated. Run `tunescout login` first.");
            }
            let token = controller
                .session()
                .token
                .clone()
                .ok_or_else(|| anyhow::anyhow!("authenticated session is missing its token"))?;

            let catalog = CatalogClient::new(cli_config.api_base.clone());
            let tracks = catalog.search_tracks(&token, &query, limit).await?;

            if tracks.is_empty() {
                println!("No tracks found for {:?}.", query);
            }
            for track in tracks {
                println!("{} — {}", track.name, track.artists.join(", "));
                if let Some(url) = track.album_artwork_url {
                    println!("    artwork: {}", url);
                }
            }
        }
        Commands::Logout => {
            controller.logout()?;
            println!("Logged out; stored credentials cleared.");
        }
    }

    Ok(())
}
