//! # Remaster Server
//!
//! Batch re-edit pass tracker for a content library.
//!
//! ## Overview
//!
//! The server exposes the pass lifecycle over HTTP for the editor UI:
//!
//! - **Pass control**: start, stop, status, and next-item advancement
//! - **Client bridge**: script-context payload for edit views carrying the
//!   active-client marker
//! - **Batch driver**: a non-interactive CLI mode that steps a pass to
//!   completion
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for the content item index
//! - Redis for the pass settings store
//! - In-memory backends in dev mode

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remaster_core::batch::StartOptions;
use remaster_core::selection::PerPage;
use remaster_server::{
    batch_cli::{self, LineSink},
    config::Config,
    routes,
    state::{self, AppState},
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "remaster-server")]
#[command(about = "Batch re-edit pass tracker for the content library")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
    #[command(subcommand)]
    Batch(BatchCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Run database connectivity checks and exit
    Preflight,
    /// Apply database migrations and exit (runs preflight first)
    Migrate,
}

#[derive(Debug, Subcommand)]
enum BatchCommand {
    /// Start a pass and step it to completion, printing progress
    Run(BatchRunArgs),
}

#[derive(ClapArgs, Debug, Clone)]
struct BatchRunArgs {
    /// Comma-separated kind filter (defaults to movie,series)
    #[arg(long)]
    kinds: Option<String>,

    /// Page size for the selection query ("all" or a number)
    #[arg(long)]
    per_page: Option<String>,

    /// Page number for the selection query
    #[arg(long)]
    page: Option<u32>,

    /// Restrict the selection to items tagged with this catalog
    #[arg(long)]
    catalog: Option<String>,

    /// Comma-separated explicit id allow-list
    #[arg(long)]
    only: Option<String>,
}

impl BatchRunArgs {
    fn into_start_options(self) -> anyhow::Result<StartOptions> {
        let per_page = self
            .per_page
            .as_deref()
            .map(|raw| raw.parse::<PerPage>().map_err(anyhow::Error::msg))
            .transpose()?;

        Ok(StartOptions {
            kinds: self.kinds,
            per_page,
            page: self.page,
            catalog: self.catalog,
            only: self.only,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Preflight) => {
                run_db_preflight().await?;
                return Ok(());
            }
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate().await?;
                return Ok(());
            }
            Command::Batch(BatchCommand::Run(args)) => {
                run_batch(args).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(host) = args.host {
        config.server_host = host;
    }
    let config = Arc::new(config);

    let state = AppState::from_config(config.clone()).await?;
    let app = routes::create_v1_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Remaster server listening on {}", addr);

    axum::serve(listener, app).await.context("serving HTTP")?;

    Ok(())
}

async fn connect_pool(config: &Config) -> anyhow::Result<sqlx::PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(config.require_database_url()?)
        .await
        .context("connecting to Postgres")?;

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .context("Postgres health check")?;

    Ok(pool)
}

async fn run_db_preflight() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    connect_pool(&config).await?;
    println!("Database preflight OK");
    Ok(())
}

async fn run_db_migrate() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let pool = connect_pool(&config).await?;
    remaster_core::MIGRATOR
        .run(&pool)
        .await
        .context("applying migrations")?;
    println!("Migrations applied");
    Ok(())
}

async fn run_batch(args: BatchRunArgs) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let cursor = state::build_cursor(&config, Arc::new(LineSink)).await?;
    let options = args.into_start_options()?;
    batch_cli::run_to_completion(&cursor, &options).await?;
    Ok(())
}
