#![allow(dead_code)]

use std::sync::Once;

use cleanlink::handlers::LoginResponse;
use serde_json::{Value, json};
use sqlx::PgPool;
use tokio::net::TcpListener;

/// Password used by every account the test helpers register.
pub const TEST_PASSWORD: &str = "password123";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("cleanlink=debug")
            .with_test_writer()
            .init();
    });
}

/// Spawns the application on a random port and returns its base address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(test_db_pool: PgPool) -> String {
    dotenvy::from_filename_override("tests/data/.test.env").unwrap();
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = cleanlink::app(test_db_pool);
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// Registration payload for a client account.
pub fn client_payload(username: &str, email: &str, phone: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": TEST_PASSWORD,
        "role": "client",
        "country": "Kenya",
        "phone_number": phone,
    })
}

/// Registration payload for a cleaner account with comma-separated services.
pub fn cleaner_payload(username: &str, email: &str, phone: &str, services: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": TEST_PASSWORD,
        "role": "cleaner",
        "country": "Kenya",
        "phone_number": phone,
        "services": services,
    })
}

pub async fn register(
    client: &reqwest::Client,
    address: &str,
    payload: &Value,
) -> reqwest::Response {
    client
        .post(format!("{address}/register"))
        .json(payload)
        .send()
        .await
        .expect("Failed to execute register request")
}

/// Registers an account and asserts it was created.
pub async fn register_ok(client: &reqwest::Client, address: &str, payload: &Value) {
    let response = register(client, address, payload).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
}

pub async fn login(
    client: &reqwest::Client,
    address: &str,
    identifier: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{address}/login"))
        .json(&json!({"identifier": identifier, "password": password}))
        .send()
        .await
        .expect("Failed to execute login request")
}

/// Logs in with the test password and returns the access token.
pub async fn get_token(client: &reqwest::Client, address: &str, identifier: &str) -> String {
    let response = login(client, address, identifier, TEST_PASSWORD).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: LoginResponse = response.json().await.expect("Failed to parse login response");
    body.access_token
}

/// Registers an account and returns a fresh access token for it.
pub async fn register_and_login(
    client: &reqwest::Client,
    address: &str,
    payload: &Value,
) -> String {
    register_ok(client, address, payload).await;
    let identifier = payload["email"].as_str().unwrap();
    get_token(client, address, identifier).await
}

/// Submits a connect request and returns (request_id, available_cleaners).
pub async fn submit_request(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    location: &str,
    service: &str,
) -> (String, Vec<Value>) {
    let response = client
        .post(format!("{address}/connect_with_cleaner"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({"location": location, "service": service}))
        .send()
        .await
        .expect("Failed to execute connect request");
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let request_id = body["request_id"].as_str().unwrap().to_string();
    let cleaners = body["available_cleaners"].as_array().unwrap().clone();
    (request_id, cleaners)
}

/// Looks up a user's id through the public listing.
pub async fn user_id_by_username(client: &reqwest::Client, address: &str, username: &str) -> String {
    let response = client
        .get(format!("{address}/users"))
        .send()
        .await
        .expect("Failed to list users");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let users: Vec<Value> = response.json().await.expect("Failed to parse user list");
    users
        .iter()
        .find(|u| u["username"] == username)
        .unwrap_or_else(|| panic!("User {username} not found in listing"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Assigns a cleaner to a request via the API.
pub async fn select_cleaner(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    cleaner_id: &str,
    request_id: &str,
) -> reqwest::Response {
    client
        .post(format!("{address}/select_cleaner"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&json!({"cleaner_id": cleaner_id, "request_id": request_id}))
        .send()
        .await
        .expect("Failed to execute select_cleaner request")
}
