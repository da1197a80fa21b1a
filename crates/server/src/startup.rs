use axum::Router;
use configs::{AppConfig, StorageConfig};
use service::{storage::loader, InMemoryProductRepository};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire repository and service. A configured seed file pre-populates the
/// table; otherwise it starts empty.
pub async fn build_state(storage: &StorageConfig) -> Result<AppState, StartupError> {
    let repo = match storage.seed_path.as_deref() {
        Some(path) => {
            let (products, last_id) = loader::load_products(path).await?;
            info!(%path, count = products.len(), last_id, "loaded product seed");
            InMemoryProductRepository::with_products(products, last_id)
        }
        None => InMemoryProductRepository::new(),
    };
    Ok(AppState::in_memory(repo))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg.storage).await?;
    let app = build_app(state);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(addr = %listener.local_addr()?, "products server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_state_without_seed() {
        let state = build_state(&StorageConfig::default()).await.unwrap();
        assert!(state.products.get_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_seed_file_is_a_startup_error() {
        let cfg = StorageConfig { seed_path: Some("/definitely/not/here.json".into()) };
        assert!(matches!(build_state(&cfg).await, Err(StartupError::Seed(_))));
    }
}
