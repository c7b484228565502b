use athletic_trainer::config::Config;
use athletic_trainer::routes;
use athletic_trainer::state::AppState;
use athletic_trainer::store::SpannerStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("athletic-trainer starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = SpannerStore::from_config(&config).await?;

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState::new(config, routes::route_table(), store);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
