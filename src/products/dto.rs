use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Request body for product creation. Required string fields default to empty
/// so a missing field fails the same check as an explicit empty one.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
}

/// A validated product ready for insertion.
#[derive(Debug)]
pub struct NewProduct {
    pub name: String,
    pub product_type: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl CreateProductRequest {
    /// Checks fields in declaration order and reports the first failure.
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::Validation("Name is required"));
        }
        if self.product_type.is_empty() {
            return Err(ApiError::Validation("Type is required"));
        }
        if self.sku.is_empty() {
            return Err(ApiError::Validation("SKU is required"));
        }
        let quantity = match self.quantity {
            Some(q) if q >= 0 => q,
            _ => {
                return Err(ApiError::Validation(
                    "Quantity must be a non-negative integer",
                ))
            }
        };
        let price = match self.price {
            Some(p) if p >= Decimal::ZERO => p,
            _ => return Err(ApiError::Validation("Price must be a non-negative number")),
        };
        Ok(NewProduct {
            name: self.name,
            product_type: self.product_type,
            sku: self.sku,
            image_url: self.image_url,
            description: self.description,
            quantity,
            price,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: Option<i32>,
}

impl UpdateQuantityRequest {
    pub fn validate(self) -> Result<i32, ApiError> {
        match self.quantity {
            Some(q) if q >= 0 => Ok(q),
            _ => Err(ApiError::Validation(
                "Quantity must be a non-negative integer",
            )),
        }
    }
}

/// Pagination parameters as they arrive on the query string. Values that do
/// not parse fall back to the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        match self.limit.as_deref().map(|s| s.parse::<i64>()) {
            Some(Ok(n)) if n > 0 => n.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> i64 {
        match self.offset.as_deref().map(|s| s.parse::<i64>()) {
            Some(Ok(n)) if n >= 0 => n,
            _ => 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub product_id: i64,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
