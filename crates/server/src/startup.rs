use std::{io, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use service::accounts::HttpAccountsGateway;
use service::customer::repo::seaorm::SeaOrmCustomerRepository;
use service::customer::CustomerService;

use crate::routes::{self, ServerState};

/// Tracing to stdout; `RUST_LOG` wins, with a sensible default otherwise.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: wire collaborators from config and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = configs::AppConfig::load_and_validate()?;

    let db = models::db::connect(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmCustomerRepository::new(db));
    let accounts = Arc::new(HttpAccountsGateway::new(
        &cfg.accounts.base_url,
        Duration::from_secs(cfg.accounts.timeout_secs),
    )?);
    info!(accounts_url = %cfg.accounts.base_url, "accounts gateway configured");

    let customers = Arc::new(CustomerService::new(repo, accounts));
    let app: Router = routes::build_router(ServerState { customers }, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "customer service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
