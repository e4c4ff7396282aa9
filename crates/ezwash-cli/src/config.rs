//! CLI configuration management.
//!
//! All connection settings can be provided via CLI arguments or
//! environment variables; use `--help` to see the available options.
//!
//! ```bash
//! ezwash-cli --api-base-url "https://api.abbaezwash.com" catalog
//!
//! # Or via environment variables
//! EZWASH_API_BASE_URL="https://api.abbaezwash.com" ezwash-cli catalog
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ezwash_client::ClientConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "ezwash")]
#[command(about = "Abba EZWash laundry service client")]
#[command(version)]
pub struct Cli {
    /// API connection configuration.
    #[clap(flatten)]
    pub client: ClientConfig,

    /// File the access/refresh token pair persists in between runs.
    #[arg(long, env = "EZWASH_TOKEN_FILE", default_value = ".ezwash-tokens.json")]
    pub token_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in with username and password.
    Login(LoginArgs),
    /// Create an account and log in.
    Register(RegisterArgs),
    /// Discard the stored session.
    Logout,
    /// Show the authenticated profile.
    Profile,
    /// List the service catalog with prices.
    Catalog,
    /// Compose and place an order.
    Order(OrderArgs),
    /// List your past orders.
    History,
    /// Show one order by its identifier.
    Status(StatusArgs),
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    /// Account username.
    #[arg(long, short = 'u')]
    pub username: String,

    /// Account password.
    #[arg(long, short = 'p')]
    pub password: String,
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Desired username.
    #[arg(long, short = 'u')]
    pub username: String,

    /// Contact email.
    #[arg(long, short = 'e')]
    pub email: String,

    /// Account password.
    #[arg(long, short = 'p')]
    pub password: String,

    /// Contact phone number.
    #[arg(long)]
    pub phone_number: Option<String>,

    /// Ambassador referral code.
    #[arg(long)]
    pub referral_code: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Items as `ID`, `IDxQTY`, or `IDxQTY@COLOR`, e.g. `1x3 4 2x2@white`.
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Handling note applied to every line.
    #[arg(long)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Public order identifier, e.g. `ORD-4F2A1B`.
    pub order_id: String,
}

impl Cli {
    /// Loads environment variables from a .env file (if enabled) and
    /// parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from a .env file if the dotenv feature
    /// is enabled. Runs before clap parses arguments so that clap's `env`
    /// defaults pick the values up.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when the dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            version = env!("CARGO_PKG_VERSION"),
            api_base_url = %self.client.api_base_url,
            http_timeout_secs = self.client.effective_timeout().as_secs(),
            token_file = %self.token_file.display(),
            "client configuration"
        );
    }
}
