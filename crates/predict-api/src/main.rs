//! Prediction job service: POST /predict, GET /predict/{prediction_id}.

use predict_api::config::Config;
use predict_api::server::{self, AppState};
use predict_model::MockModel;
use predict_scheduler::InMemoryJobRunner;
use predict_store::InMemoryJobStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let model = MockModel::new(config.model_min_delay, config.model_max_delay);
    let store = Arc::new(InMemoryJobStore::new());
    let runner = Arc::new(InMemoryJobRunner::new(
        Arc::new(model),
        store,
        config.max_concurrent_jobs,
    ));

    let app = server::router(Arc::new(AppState { runner }));
    let addr: SocketAddr = config.listen.parse()?;
    tracing::info!(
        max_concurrent_jobs = config.max_concurrent_jobs,
        "prediction API listening on {}",
        addr
    );
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
