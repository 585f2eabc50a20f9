/*!
 * Sign in with Apple client
 *
 * Drives the handshake from the command line:
 * 1. Generate a nonce and its digest
 * 2. Inspect the claims of an identity token (unverified)
 * 3. Run a full sign-in against the local development provider
 * 4. List stored user records
 *
 * Usage:
 *   cargo run -p siwa-client -- nonce
 *   cargo run -p siwa-client -- decode <token>
 *   cargo run -p siwa-client -- sign-in --user 001234.abc.0001 --email a@example.com
 *   cargo run -p siwa-client -- users
 */

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ClientConfig;

#[derive(Parser)]
#[command(name = "siwa")]
#[command(about = "Sign in with Apple handshake client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path (overrides SIWA_DATABASE_PATH)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a nonce and print it with its SHA-256 digest
    Nonce {
        /// Nonce length (defaults to SIWA_NONCE_LENGTH)
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Print the claims of an identity token without verifying it
    Decode {
        /// Compact JWS identity token
        token: String,
    },
    /// Sign in through the local development provider
    SignIn {
        /// Provider user id
        #[arg(short, long)]
        user: String,

        /// Given name
        #[arg(short, long)]
        given_name: Option<String>,

        /// Family name
        #[arg(short, long)]
        family_name: Option<String>,

        /// Real email address
        #[arg(short, long)]
        email: String,

        /// Share a private relay address instead of the real email
        #[arg(long)]
        hide_email: bool,
    },
    /// List stored user records
    Users,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siwa_client=info,siwa_auth_methods=info,siwa_identity_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Nonce { length } => {
            commands::nonce::print_nonce(length.unwrap_or(config.sign_in.nonce_length))?
        }

        Commands::Decode { token } => commands::decode::decode_token(&token)?,

        Commands::SignIn {
            user,
            given_name,
            family_name,
            email,
            hide_email,
        } => {
            let profile = siwa_auth_methods::development::LocalProfile {
                user,
                given_name,
                family_name,
                email,
                hide_email,
            };
            commands::sign_in::sign_in(&config, profile).await?
        }

        Commands::Users => commands::users::list_users(&config).await?,
    }

    Ok(())
}
