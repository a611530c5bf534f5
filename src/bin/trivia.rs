use anyhow::Context;
use clap::Parser;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on, overriding the configured one
    #[clap(long)]
    port: Option<u16>,
    /// Do not apply the embedded schema migrations on startup
    #[clap(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    let pool = db::establish_connection(&settings.database_url)
        .await
        .context("Cannot connect to DB")?;
    if settings.run_migrations && !cli.skip_migrations {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool)
            .await
            .context("Migrations failed")?;
    }

    run_server(pool, &settings).await
}
