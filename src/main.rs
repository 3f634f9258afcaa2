use cinematch_api::{
    api::{create_router, AppState},
    config::Config,
    init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // Load failures leave the state unavailable rather than aborting startup
    let state = AppState::from_config(&config);

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, mode = %config.recommender_mode, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
