#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;

use std::process;
use std::sync::Arc;

use ezwash_client::ApiClient;
use ezwash_core::{FileTokenStore, TokenStore};
use ezwash_session::SessionManager;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "ezwash_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "ezwash_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&cli.token_file));
    let client = ApiClient::new(cli.client.clone(), tokens.clone())?;
    let api = client.into_service();
    let session = SessionManager::new(api.clone(), tokens);

    match cli.command {
        Command::Login(args) => commands::login(&session, args).await,
        Command::Register(args) => commands::register(&session, args).await,
        Command::Logout => commands::logout(&session),
        Command::Profile => commands::profile(&session).await,
        Command::Catalog => commands::catalog(),
        Command::Order(args) => commands::order(&api, &session, args).await,
        Command::History => commands::history(&api, &session).await,
        Command::Status(args) => commands::status(&api, &session, args).await,
    }
}
