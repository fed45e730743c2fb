//! TrustCaller Server
//!
//! Serves caller-identity lookups over HTTP:
//!
//! 1. **Lookup**: `POST /search-number` with a SHA-256 hashed phone number
//!    returns the verified identity behind it, or a single not-found answer
//!    for unknown and unverified numbers alike.
//!
//! 2. **Provisioning**: on startup, an empty store can be filled from the
//!    built-in demo identities or a JSON fixture file before the listener
//!    binds.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use trustcaller::config::{DEFAULT_HOST, DEFAULT_PORT};
use trustcaller::hashing::hash_phone;
use trustcaller::{server, LogFormat, ServerConfig};

// ── CLI Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "trustcaller", version, about = "TrustCaller identity lookup server")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Host to bind
    #[arg(long, default_value = DEFAULT_HOST, env = "TRUSTCALLER_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "TRUSTCALLER_PORT")]
    port: u16,

    /// SQLite database file. In-memory when unset.
    #[arg(long, env = "DATABASE_PATH")]
    database_path: Option<PathBuf>,

    /// Seed the demo identities into an empty store (the store starts empty otherwise)
    #[arg(long, env = "SEED_DEMO_DATA")]
    seed_demo: bool,

    /// JSON fixture file to seed into an empty store
    #[arg(long, env = "FIXTURES_PATH")]
    fixtures: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the lookup server (default)
    Serve,
    /// Print the lookup hash for a phone number
    Hash {
        /// Phone number in any formatting, e.g. "+20 123 456 7890"
        phone: String,
    },
}

// ── Entry Point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(Command::Hash { phone }) = &args.command {
        println!("{}", hash_phone(phone));
        return ExitCode::SUCCESS;
    }

    init_tracing(args.log_format);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        database_path: args.database_path,
        seed_demo: args.seed_demo,
        fixtures_path: args.fixtures,
        log_format: args.log_format,
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "TrustCaller server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trustcaller=info,tower_http=info".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Provision before binding so no lookup ever sees a half-seeded store
    let db = server::open_store(&config)?;
    let app = server::app(db);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("TrustCaller server starting on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("TrustCaller server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["trustcaller"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.log_format, LogFormat::Pretty);
        assert!(args.fixtures.is_none());
    }

    #[test]
    fn test_hash_subcommand() {
        let args = Args::try_parse_from(["trustcaller", "hash", "+20 123 456 7890"]).unwrap();
        match args.command {
            Some(Command::Hash { phone }) => {
                assert_eq!(hash_phone(&phone), hash_phone("201234567890"))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_json_log_format() {
        let args = Args::try_parse_from(["trustcaller", "--log-format", "json", "--seed-demo"])
            .unwrap();
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(args.seed_demo);
    }
}
