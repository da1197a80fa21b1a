use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::Product;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

/// Request body for create and full update. The id never comes from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductBody {
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

impl ProductBody {
    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            code_value: self.code_value,
            is_published: self.is_published,
            expiration: self.expiration,
            price: self.price,
        }
    }
}

/// `{"message": ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::invalid_id())
}

fn parse_body(payload: Result<Json<ProductBody>, JsonRejection>) -> Result<ProductBody, ApiError> {
    payload.map(|Json(body)| body).map_err(|e| {
        debug!(error = %e, "rejected product body");
        ApiError::invalid_body()
    })
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let data = state.products.get_products().await?;
    Ok(Json(Envelope { message: "products found", data }))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let id = parse_id(&id)?;
    let data = state.products.get_product_by_id(id).await?;
    Ok(Json(Envelope { message: "product found", data }))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Product>>), ApiError> {
    let body = parse_body(payload)?;
    let data = state.products.save(body.into_product(0)).await?;
    Ok((StatusCode::CREATED, Json(Envelope { message: "product created", data })))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductBody>, JsonRejection>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let id = parse_id(&id)?;
    let body = parse_body(payload)?;
    let data = state.products.update(body.into_product(id)).await?;
    Ok(Json(Envelope { message: "product updated", data }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
