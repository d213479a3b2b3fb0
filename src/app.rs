use std::any::Any;
use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, products};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

/// Last-resort boundary: a panic in a handler becomes the same opaque 500 as
/// any other internal failure. The cause stays in the log.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Method, Request},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::auth::token::JwtKeys;

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let res = app.oneshot(req).await.expect("infallible");
        let status = res.status();
        let bytes = res.into_body().collect().await.expect("body").to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("infallible");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn product_routes_demand_a_token() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::GET)
            .uri("/products")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Missing Authorization header" })
        );
    }

    #[tokio::test]
    async fn product_routes_refuse_a_bad_token() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/products/1")
            .header(header::AUTHORIZATION, "Bearer garbage")
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            serde_json::json!({ "error": "Invalid or expired token" })
        );
    }

    #[tokio::test]
    async fn a_valid_token_reaches_body_validation() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(1, "alice").expect("sign");
        let app = build_app(state);
        let req = Request::builder()
            .method(Method::POST)
            .uri("/products")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Name is required" }));
    }

    #[tokio::test]
    async fn register_validates_before_touching_the_store() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"","password":"pw"}"#))
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Username is required" }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{oops"))
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Invalid JSON body" }));
    }

    #[tokio::test]
    async fn a_non_integer_product_id_is_a_bad_request() {
        let state = AppState::fake();
        let token = JwtKeys::from_ref(&state).sign(1, "alice").expect("sign");
        let app = build_app(state);
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/products/oops")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request");
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Invalid product ID" }));
    }

    #[tokio::test]
    async fn panics_render_as_an_opaque_500() {
        let res = handle_panic(Box::new("boom"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = res.into_body().collect().await.expect("body").to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
    }
}
