//! Storage primitives for the service layer
//!
//! `id_map_store` keeps records in process memory keyed by a server-assigned
//! integer id. `loader` reads an optional JSON seed file at startup.

pub mod id_map_store;
pub mod loader;

pub use id_map_store::{IdMapStore, IdTable};
