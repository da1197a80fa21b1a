//! Domain entities shared by the service and HTTP layers.

pub mod product;

pub use product::Product;
