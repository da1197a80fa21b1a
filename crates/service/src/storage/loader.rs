//! Seed loader for the in-memory product table.
//!
//! Reads a JSON array of products. The file is only ever read; the running
//! service never writes back to it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use models::Product;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read seed file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid seed json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("seed contains non-positive id {0}")]
    InvalidId(i64),
    #[error("seed contains duplicate id {0}")]
    DuplicateId(i64),
    #[error("seed contains duplicate code value {0:?}")]
    DuplicateCodeValue(String),
}

/// Products keyed by id, plus the largest id seen.
pub type Seed = (HashMap<i64, Product>, i64);

pub async fn load_products<P: AsRef<Path>>(path: P) -> Result<Seed, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_products(&bytes)
}

pub fn parse_products(bytes: &[u8]) -> Result<Seed, LoadError> {
    let products: Vec<Product> = serde_json::from_slice(bytes)?;
    let mut map = HashMap::with_capacity(products.len());
    let mut codes = HashSet::with_capacity(products.len());
    let mut last_id = 0;
    for p in products {
        if p.id <= 0 {
            return Err(LoadError::InvalidId(p.id));
        }
        if !codes.insert(p.code_value.clone()) {
            return Err(LoadError::DuplicateCodeValue(p.code_value));
        }
        last_id = last_id.max(p.id);
        if let Some(prev) = map.insert(p.id, p) {
            return Err(LoadError::DuplicateId(prev.id));
        }
    }
    Ok((map, last_id))
}
