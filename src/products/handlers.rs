use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    routing::{delete, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::token::AuthUser,
    error::{ApiError, ApiJson, ApiResult},
    products::{
        dto::{
            CreateProductRequest, CreateProductResponse, MessageResponse, Pagination,
            UpdateQuantityRequest,
        },
        repo::{self, Product},
    },
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/:id/quantity", put(update_quantity))
        .route("/products/:id", delete(delete_product))
}

/// Path extractor for product ids. A non-integer id is the caller's fault,
/// not a routing miss.
#[derive(Debug)]
pub struct ProductId(pub i64);

#[axum::async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(ProductId(id)),
            Err(e) => {
                warn!(error = %e, "rejecting malformed product id");
                Err(ApiError::Validation("Invalid product ID"))
            }
        }
    }
}

#[instrument(skip(state, _user, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<CreateProductResponse>)> {
    let product = payload.validate()?;
    let product_id = repo::insert(&state.db, &product).await?;

    info!(product_id, sku = %product.sku, "product created");
    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            product_id,
            message: "Product created",
        }),
    ))
}

#[instrument(skip(state, _user))]
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = repo::list(&state.db, page.limit(), page.offset()).await?;
    Ok(Json(products))
}

#[instrument(skip(state, _user, payload))]
pub async fn update_quantity(
    State(state): State<AppState>,
    _user: AuthUser,
    ProductId(id): ProductId,
    ApiJson(payload): ApiJson<UpdateQuantityRequest>,
) -> ApiResult<Json<Product>> {
    let quantity = payload.validate()?;
    let updated = repo::update_quantity(&state.db, id, quantity)
        .await?
        .ok_or(ApiError::NotFound("Product not found"))?;

    info!(product_id = id, quantity, "product quantity updated");
    Ok(Json(updated))
}

#[instrument(skip(state, _user))]
pub async fn delete_product(
    State(state): State<AppState>,
    _user: AuthUser,
    ProductId(id): ProductId,
) -> ApiResult<Json<MessageResponse>> {
    let removed = repo::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Product not found"))?;

    info!(product_id = removed.id, sku = %removed.sku, "product deleted");
    Ok(Json(MessageResponse {
        message: "Product deleted",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::Claims;

    fn fake_user() -> AuthUser {
        AuthUser(Claims {
            user_id: 1,
            username: "tester".into(),
            iat: 0,
            exp: 0,
        })
    }

    #[tokio::test]
    async fn create_rejects_an_empty_body_before_any_io() {
        let state = AppState::fake();
        let payload: CreateProductRequest = serde_json::from_str("{}").expect("deserialize");
        let err = create_product(State(state), fake_user(), ApiJson(payload))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation("Name is required")));
    }

    #[tokio::test]
    async fn quantity_update_rejects_a_missing_quantity_before_any_io() {
        let state = AppState::fake();
        let err = update_quantity(
            State(state),
            fake_user(),
            ProductId(1),
            ApiJson(UpdateQuantityRequest { quantity: None }),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation("Quantity must be a non-negative integer")
        ));
    }
}
