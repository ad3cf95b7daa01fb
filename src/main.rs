use anyhow::Context;
use dotenvy::dotenv;
use gatehouse::cli::seed_default_admin;
use gatehouse::logging::init_tracing;
use gatehouse::router::init_router;
use gatehouse::state::init_app_state;
use gatehouse_config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let config = AppConfig::from_env();
    let state = init_app_state(&config).await?;

    if let Some(admin) = &config.default_admin {
        seed_default_admin(state.store.as_ref(), admin, &config.password).await?;
    }

    let app = init_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Scalar UI available at http://{}/scalar", address);
    axum::serve(listener, app).await?;

    Ok(())
}
