//! HTTP-level tests for [`ApiClient`] against a loopback fixture server.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use ezwash_client::{ApiClient, ClientConfig, Error};
use ezwash_core::types::{Credentials, ItemColor, OrderItem, OrderRequest};
use ezwash_core::{ApiProvider, ErrorBody, MemoryTokenStore, TokenPair, TokenStore};
use serde_json::{Value, json};

/// Serves the router on an ephemeral loopback port and returns a client
/// config pointed at its `/api` prefix.
async fn spawn_fixture(router: Router) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture listener addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fixture");
    });

    ClientConfig::new(format!("http://{addr}/api"))
}

fn client_with(config: ClientConfig, tokens: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(config, tokens).expect("create api client")
}

async fn login_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "ama" && body["password"] == "hunter2" {
        (
            StatusCode::OK,
            Json(json!({"access": "acc-token", "refresh": "ref-token"})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
    }
}

async fn profile_handler(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if authorization == "Bearer acc-token" {
        (
            StatusCode::OK,
            Json(json!({
                "id": 12,
                "username": "ama",
                "email": "ama@example.com",
                "role": "CUSTOMER",
                "phone_number": "+233200000000"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
    }
}

fn api_router() -> Router {
    Router::new()
        .route("/api/users/login/", post(login_handler))
        .route("/api/users/profile/", get(profile_handler))
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    let config = spawn_fixture(api_router()).await;
    let client = client_with(config, Arc::new(MemoryTokenStore::new()));

    let pair = client
        .login(&Credentials::new("ama", "hunter2"))
        .await
        .unwrap();

    assert_eq!(pair, TokenPair::new("acc-token", "ref-token"));
}

#[tokio::test]
async fn test_login_failure_surfaces_exact_detail_message() {
    let config = spawn_fixture(api_router()).await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let client = client_with(config, tokens.clone());

    let error = client
        .login(&Credentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(error.status, Some(401));
    assert_eq!(error.message.as_deref(), Some("Invalid credentials"));
    // No tokens may be persisted by a failed login.
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[tokio::test]
async fn test_bearer_token_is_attached_from_store() {
    let config = spawn_fixture(api_router()).await;
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store(&TokenPair::new("acc-token", "ref-token"));
    let client = client_with(config, tokens);

    let profile = client.fetch_profile().await.unwrap();

    assert_eq!(profile.username, "ama");
    assert_eq!(profile.id, 12);
}

#[tokio::test]
async fn test_any_401_clears_both_persisted_tokens() {
    let config = spawn_fixture(api_router()).await;
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store(&TokenPair::new("stale-token", "stale-refresh"));
    let client = client_with(config, tokens.clone());

    let error = client.fetch_profile().await.unwrap_err();

    assert_eq!(error.status, Some(401));
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[tokio::test]
async fn test_validation_error_uses_first_field() {
    async fn register_handler(Json(_): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["Username already exists."]})),
        )
    }

    let router = Router::new().route("/api/users/register/", post(register_handler));
    let config = spawn_fixture(router).await;
    let client = client_with(config, Arc::new(MemoryTokenStore::new()));

    let error = client
        .register(&ezwash_core::types::Registration::new(
            "ama",
            "ama@example.com",
            "hunter2",
        ))
        .await
        .unwrap_err();

    assert_eq!(error.status, Some(400));
    assert_eq!(
        error.message.as_deref(),
        Some("username: Username already exists.")
    );
    assert!(matches!(error.body, Some(ErrorBody::Fields(_))));
}

#[tokio::test]
async fn test_create_order_round_trip() {
    async fn orders_handler(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        assert_eq!(
            headers.get("authorization").unwrap().to_str().unwrap(),
            "Bearer acc-token"
        );
        assert_eq!(body["total_price"], 9);
        assert_eq!(body["items"][0]["name"], "T-Shirt");

        (
            StatusCode::CREATED,
            Json(json!({
                "order_id": "EZ-2001",
                "items": body["items"],
                "total_price": body["total_price"],
                "status": "PENDING",
                "created_at": "2025-05-04T09:30:00"
            })),
        )
    }

    let router = Router::new().route("/api/orders/", post(orders_handler));
    let config = spawn_fixture(router).await;
    let tokens = Arc::new(MemoryTokenStore::new());
    tokens.store(&TokenPair::new("acc-token", "ref-token"));
    let client = client_with(config, tokens);

    let request = OrderRequest {
        items: vec![OrderItem {
            name: "T-Shirt".to_owned(),
            quantity: 3,
            color: ItemColor::Colored,
            note: String::new(),
            price_per_unit: bigdecimal::BigDecimal::from(3),
        }],
        total_price: bigdecimal::BigDecimal::from(9),
        phone_number: Some("+233200000000".to_owned()),
        location: None,
    };

    let record = client.create_order(&request).await.unwrap();
    assert_eq!(record.order_id, "EZ-2001");
    assert_eq!(record.items.len(), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Port 9 (discard) is expected to refuse connections.
    let config = ClientConfig::new("http://127.0.0.1:9/api").with_timeout(2);
    let tokens: Arc<MemoryTokenStore> = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(config, tokens).unwrap();

    let error = client
        .send::<serde_json::Value, ()>(reqwest::Method::GET, "/users/profile/", None, &[], true)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Transport(_)));
}
