//! revu-server - admin-managed product review service
//!
//! Subcommands:
//! - `serve` (default): run the HTTP API
//! - `seed`: upsert the demo catalog
//! - `create-admin`: create an admin account or reset its password

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revu_common::config::{CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig};
use revu_server::db::{self, users};
use revu_server::{build_router, seed, AppState};
use sqlx::SqlitePool;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "revu_server=info,tower_http=info";

/// Command-line arguments for revu-server
#[derive(Parser, Debug)]
#[command(name = "revu-server")]
#[command(about = "Admin-managed product review service")]
#[command(version)]
struct Args {
    /// Root folder holding the database
    #[arg(short, long, env = "REVU_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "REVU_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "REVU_BIND")]
    bind: Option<String>,

    /// Bootstrap admin email, created at startup when absent
    #[arg(long, env = "REVU_ADMIN_EMAIL")]
    admin_email: Option<String>,

    /// Bootstrap admin password
    #[arg(long, env = "REVU_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Upsert the demo catalog
    Seed,
    /// Create an admin account, or reset an existing admin's password
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "REVU_NEW_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();
    let (toml, config_failure) = TomlConfig::load();
    let defaults = CompiledDefaults::for_current_platform();

    // RUST_LOG wins over the config file
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        toml.logging
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
            .into()
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = config_failure {
        warn!("{} (using defaults)", e);
    }

    info!(
        "Starting revu-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new("revu-server")
        .with_cli_arg(args.root_folder.clone())
        .with_toml(toml.clone())
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = db::init_database_pool(&db_path)
        .await
        .context("Failed to open database")?;

    match args.command.take() {
        Some(Command::Seed) => {
            let report = seed::seed_catalog(&pool).await.context("Seeding failed")?;
            info!(
                "Seeded catalog: {} created, {} updated, {} structure-locked",
                report.created, report.updated, report.locked
            );
            Ok(())
        }
        Some(Command::CreateAdmin { email, password }) => {
            if password.trim().is_empty() {
                anyhow::bail!("Admin password must not be empty");
            }
            users::upsert_admin(&pool, &email, &password)
                .await
                .context("Failed to create admin")?;
            info!("Admin account ready: {}", email.trim().to_lowercase());
            Ok(())
        }
        Some(Command::Serve) | None => serve(args, toml, defaults, pool).await,
    }
}

async fn serve(
    args: Args,
    toml: TomlConfig,
    defaults: CompiledDefaults,
    pool: SqlitePool,
) -> Result<()> {
    bootstrap_admin(&args, &toml, &pool).await?;

    let state = AppState::new(pool, toml.session_ttl_hours());
    let app = build_router(state);

    let bind = args
        .bind
        .clone()
        .or_else(|| toml.bind.clone())
        .unwrap_or(defaults.bind);
    let port = args.port.or(toml.port).unwrap_or(defaults.port);
    let addr = listen_addr(&bind, port)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("revu-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Socket address for a bind IP (v4 or v6) and port
fn listen_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .trim()
        .parse()
        .with_context(|| format!("Invalid bind address {}", bind))?;
    Ok(SocketAddr::new(ip, port))
}

/// Create the configured admin account if it does not exist yet
async fn bootstrap_admin(args: &Args, toml: &TomlConfig, pool: &SqlitePool) -> Result<()> {
    let email = args.admin_email.clone().or_else(|| toml.admin_email.clone());
    let password = args
        .admin_password
        .clone()
        .or_else(|| toml.admin_password.clone());

    match (email, password) {
        (Some(email), Some(password)) if !password.trim().is_empty() => {
            if users::ensure_admin(pool, &email, &password)
                .await
                .context("Admin bootstrap failed")?
            {
                info!("Bootstrap admin created: {}", email);
            }
        }
        (Some(_), _) => warn!("Admin email configured without a password; skipping bootstrap"),
        _ => {}
    }
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
