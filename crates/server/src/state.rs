use std::sync::Arc;

use service::{DefaultProductService, InMemoryProductRepository, ProductService};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductService>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductService>) -> Self { Self { products } }

    /// Default wiring: in-memory repository behind the default service.
    pub fn in_memory(repo: InMemoryProductRepository) -> Self {
        let service = DefaultProductService::new(Arc::new(repo));
        Self::new(Arc::new(service))
    }
}
