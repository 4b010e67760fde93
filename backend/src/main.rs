//! Backend entry-point: loads settings, prepares the database, and serves
//! the helpdesk API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use helpdesk::inbound::http::health::HealthState;
use helpdesk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use helpdesk::outbound::persistence::{DbPool, run_pending_migrations};
use helpdesk::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("load application settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("configure session cookies")?;
    let pool_config = settings.pool_config()?;

    if settings.run_migrations() {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("apply database migrations")?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("build database pool")?;

    let bind_addr = settings.bind_addr();
    let config =
        ServerConfig::new(session, bind_addr, pool).with_bcrypt_cost(settings.bcrypt_cost());
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("bind {bind_addr}"))?;

    info!(%bind_addr, "helpdesk listening");
    server.await.wrap_err("http server")?;
    Ok(())
}
