use std::collections::HashMap;

use async_trait::async_trait;
use models::Product;

use crate::errors::RepositoryError;
use crate::storage::{IdMapStore, IdTable};

/// Storage contract for products. Backends assign ids on `save` and keep
/// `code_value` unique across the whole collection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product under a freshly assigned id and return it.
    async fn save(&self, product: Product) -> Result<Product, RepositoryError>;
    /// Every stored product. Order is not part of the contract.
    async fn get_products(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_product_by_id(&self, id: i64) -> Result<Product, RepositoryError>;
    /// Replace the record stored under `product.id` wholesale.
    async fn update(&self, product: Product) -> Result<Product, RepositoryError>;
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Process-local repository; state is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    store: IdMapStore<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self { Self::default() }

    /// Start from previously loaded records (see `storage::loader`).
    pub fn with_products(products: HashMap<i64, Product>, last_id: i64) -> Self {
        Self { store: IdMapStore::with_entries(products, last_id) }
    }

    pub async fn last_id(&self) -> i64 { self.store.last_id().await }
}

/// Is `code` held by any record other than `except`?
fn code_value_taken(table: &IdTable<Product>, code: &str, except: Option<i64>) -> bool {
    table
        .items()
        .iter()
        .any(|(id, p)| Some(*id) != except && p.code_value == code)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        self.store
            .update_map(|table| {
                if code_value_taken(table, &product.code_value, None) {
                    return Err(RepositoryError::CodeValueAlreadyExists);
                }
                let id = table.next_id();
                let stored = product.with_id(id);
                table.insert(id, stored.clone());
                Ok(stored)
            })
            .await
    }

    async fn get_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.store.list().await)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        self.store.get(id).await.ok_or(RepositoryError::NotFound)
    }

    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        self.store
            .update_map(|table| {
                if !table.contains(product.id) {
                    return Err(RepositoryError::NotFound);
                }
                if code_value_taken(table, &product.code_value, Some(product.id)) {
                    return Err(RepositoryError::CodeValueAlreadyExists);
                }
                table.replace(product.id, product.clone());
                Ok(product)
            })
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.store
            .update_map(|table| table.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound))
            .await
    }
}
