use std::sync::Arc;

use async_trait::async_trait;
use models::Product;
use tracing::{debug, error, info, instrument, warn};

use crate::errors::{RepositoryError, ServiceError};
use crate::product::repository::ProductRepository;
use crate::product::validation::validate_product;

/// Business operations on products, as consumed by the HTTP layer.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn save(&self, product: Product) -> Result<Product, ServiceError>;
    async fn get_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_product_by_id(&self, id: i64) -> Result<Product, ServiceError>;
    async fn update(&self, product: Product) -> Result<Product, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

/// Validates writes, then delegates to the repository and tags its errors
/// with the field they concern.
pub struct DefaultProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> DefaultProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

/// `NotFound` is tagged with `id`, a code value clash with `title`.
fn tag(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::not_found("id"),
        RepositoryError::CodeValueAlreadyExists => ServiceError::already_exists("title"),
        RepositoryError::Storage(msg) => {
            error!(error = %msg, "product storage failure");
            ServiceError::storage("product")
        }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductService for DefaultProductService<R> {
    #[instrument(skip(self, product), fields(code_value = %product.code_value))]
    async fn save(&self, product: Product) -> Result<Product, ServiceError> {
        if let Err(e) = validate_product(&product) {
            debug!(error = %e, "product rejected by validation");
            return Err(e);
        }
        match self.repo.save(product).await {
            Ok(saved) => {
                info!(id = saved.id, "product created");
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "product save failed");
                Err(tag(e))
            }
        }
    }

    async fn get_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo.get_products().await.map_err(tag)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        self.repo.get_product_by_id(id).await.map_err(tag)
    }

    #[instrument(skip(self, product), fields(id = product.id, code_value = %product.code_value))]
    async fn update(&self, product: Product) -> Result<Product, ServiceError> {
        validate_product(&product)?;
        let updated = self.repo.update(product).await.map_err(tag)?;
        info!("product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete(id).await.map_err(tag)?;
        info!("product deleted");
        Ok(())
    }
}
