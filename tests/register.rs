mod common;

use serde_json::{Value, json};
use sqlx::PgPool;

use common::{cleaner_payload, client_payload, register, register_ok, spawn_app};

#[sqlx::test]
async fn register_cleaner_creates_user_and_services(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let payload = cleaner_payload("c1", "c1@x.com", "+254700000001", "Laundry, Ironing");
    let response = register(&client, &address, &payload).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["user_id"].as_str().expect("Response should carry the new user id");

    // One user row
    let users: Vec<Value> = client
        .get(format!("{address}/users"))
        .send()
        .await
        .expect("Failed to list users")
        .json()
        .await
        .expect("Failed to parse user list");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "c1");
    assert_eq!(users[0]["role"], "cleaner");
    assert_eq!(users[0]["location"], "Kenya");

    // Two trimmed service rows, both owned by the new user
    let services: Vec<Value> = client
        .get(format!("{address}/cleaner_services"))
        .send()
        .await
        .expect("Failed to list services")
        .json()
        .await
        .expect("Failed to parse service list");
    assert_eq!(services.len(), 2);
    let mut names: Vec<&str> = services.iter().map(|s| s["service"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Ironing", "Laundry"]);
    for service in &services {
        assert_eq!(service["cleaner_id"], user_id);
    }
}

#[sqlx::test]
async fn duplicate_email_is_rejected_and_first_user_unaffected(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    register_ok(
        &client,
        &address,
        &client_payload("first", "shared@x.com", "+254700000001"),
    )
    .await;

    let response = register(
        &client,
        &address,
        &client_payload("second", "shared@x.com", "+254700000002"),
    )
    .await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let users: Vec<Value> = client
        .get(format!("{address}/users"))
        .send()
        .await
        .expect("Failed to list users")
        .json()
        .await
        .expect("Failed to parse user list");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "first");
}

#[sqlx::test]
async fn missing_required_field_returns_400(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let mut payload = client_payload("c1", "c1@x.com", "+254700000001");
    payload.as_object_mut().unwrap().remove("password");

    let response = register(&client, &address, &payload).await;
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn invalid_field_values_return_400(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let mut bad_role = client_payload("c1", "c1@x.com", "+254700000001");
    bad_role["role"] = json!("admin");

    let mut bad_email = client_payload("c2", "c2@x.com", "+254700000002");
    bad_email["email"] = json!("not-an-email");

    let mut short_password = client_payload("c3", "c3@x.com", "+254700000003");
    short_password["password"] = json!("short");

    let mut bad_phone = client_payload("c4", "c4@x.com", "+254700000004");
    bad_phone["phone_number"] = json!("phone");

    for payload in [&bad_role, &bad_email, &short_password, &bad_phone] {
        let response = register(&client, &address, payload).await;
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test]
async fn services_are_ignored_for_clients(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let mut payload = client_payload("c1", "c1@x.com", "+254700000001");
    payload["services"] = json!("Laundry, Ironing");
    register_ok(&client, &address, &payload).await;

    let services: Vec<Value> = client
        .get(format!("{address}/cleaner_services"))
        .send()
        .await
        .expect("Failed to list services")
        .json()
        .await
        .expect("Failed to parse service list");
    assert!(services.is_empty());
}

#[sqlx::test]
async fn non_json_content_type_returns_415(pool: PgPool) {
    let address = spawn_app(pool).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{address}/register"))
        .header("Content-Type", "text/plain")
        .body("username=c1")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
