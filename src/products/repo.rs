use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{is_unique_violation, ApiError, ApiResult};
use crate::products::dto::NewProduct;

/// Product record in the database. `type` keeps its wire name; the struct
/// field avoids the keyword.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub product_type: String,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

/// Insert a product in one statement; a duplicate SKU surfaces as `Conflict`
/// no matter how the insert raced.
pub async fn insert(db: &PgPool, product: &NewProduct) -> ApiResult<i64> {
    let product_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO products (name, type, sku, image_url, description, quantity, price)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&product.name)
    .bind(&product.product_type)
    .bind(&product.sku)
    .bind(&product.image_url)
    .bind(&product.description)
    .bind(product.quantity)
    .bind(product.price)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("SKU already exists")
        } else {
            ApiError::from(e)
        }
    })?;
    Ok(product_id)
}

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> ApiResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, type, sku, image_url, description, quantity, price
        FROM products
        ORDER BY id
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Set the quantity in one statement. `None` means no such product; the
/// returned row is the post-update state.
pub async fn update_quantity(db: &PgPool, id: i64, quantity: i32) -> ApiResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET quantity = $1
        WHERE id = $2
        RETURNING id, name, type, sku, image_url, description, quantity, price
        "#,
    )
    .bind(quantity)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Physically remove a product, returning its prior state, or `None` if it
/// was already gone.
pub async fn delete(db: &PgPool, id: i64) -> ApiResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        r#"
        DELETE FROM products
        WHERE id = $1
        RETURNING id, name, type, sku, image_url, description, quantity, price
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_with_its_wire_field_names() {
        let product = Product {
            id: 1,
            name: "Wrench".into(),
            product_type: "tool".into(),
            sku: "WR-1".into(),
            image_url: None,
            description: Some("14mm combination".into()),
            quantity: 3,
            price: Decimal::new(1050, 2),
        };
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Wrench",
                "type": "tool",
                "sku": "WR-1",
                "image_url": null,
                "description": "14mm combination",
                "quantity": 3,
                "price": "10.50",
            })
        );
    }
}
