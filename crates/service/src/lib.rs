//! Service layer for the product catalogue.
//! - `storage` owns the in-process table and id counter.
//! - `product` holds the repository contract, validation and the service.
//! - Errors carry a kind plus the field that triggered them.

pub mod errors;
pub mod storage;
pub mod product;

pub use errors::{ErrorKind, RepositoryError, ServiceError};
pub use product::repository::{InMemoryProductRepository, ProductRepository};
pub use product::service::{DefaultProductService, ProductService};
pub use product::validation::validate_product;
