mod app;
mod auth;
mod config;
mod dates;
mod journal;
mod meals;
mod metrics;
mod plan;
mod state;
mod summary;
#[cfg(test)]
mod testing;
mod training;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "diario=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = state::AppState::init().await?;

    sqlx::migrate!("./migrations").run(&state.db).await?;
    tracing::info!(
        horizon_days = state.config.plan.horizon_days,
        "migrations applied"
    );

    app::serve(app::build_app(state)).await
}
