//! API integration tests
//!
//! These run against a live server with a seeded admin/admin user:
//! cargo test -- --ignored

use chrono::{Datelike, Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api";

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// A date far enough ahead that slot and cancellation checks pass
fn future_date() -> String {
    (Utc::now().date_naive() + Duration::days(30))
        .format("%Y-%m-%d")
        .to_string()
}

/// Create a court, returning its ID. Court names are unique, so each test
/// uses its own suffix.
async fn create_court(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/courts", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": name,
            "court_type": "indoor",
            "price": "5000"
        }))
        .send()
        .await
        .expect("Failed to create court");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse court");
    body["id"].as_i64().expect("No court id")
}

async fn create_booking(client: &Client, token: &str, court: i64, start: &str, end: &str) -> i64 {
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "court": court,
            "date": future_date(),
            "start_time": start,
            "end_time": end,
            "customer_name": "Juan Pérez",
            "customer_phone": "1155550000"
        }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking");
    body["id"].as_i64().expect("No booking id")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_bookings_require_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let court = create_court(&client, &token, "Cancha Overlap").await;

    create_booking(&client, &token, court, "10:00", "11:30").await;

    // Straddles the existing booking
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "court": court,
            "date": future_date(),
            "start_time": "11:00",
            "end_time": "12:30",
            "customer_name": "Otra Persona"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["error"],
        "Ya existe un turno en este horario para esta cancha"
    );
}

#[tokio::test]
#[ignore]
async fn test_close_booking_with_split_payment() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let court = create_court(&client, &token, "Cancha Cierre").await;
    let booking = create_booking(&client, &token, court, "14:00", "15:30").await;

    // Mismatched split is rejected
    let response = client
        .post(format!("{}/bookings/{}/close", BASE_URL, booking))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "booking_amount": "5000",
            "cash_amount": "3000",
            "transfer_amount": "1500"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    // Exact split succeeds
    let response = client
        .post(format!("{}/bookings/{}/close", BASE_URL, booking))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "booking_amount": "5000",
            "cash_amount": "3000",
            "transfer_amount": "2000"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse closure");
    assert_eq!(body["total_amount"], "5000");
    assert_eq!(
        body["payment_summary"],
        "Efectivo: $3000.00 / Transferencia: $2000.00"
    );

    // The booking is now completed and a second close is rejected
    let response = client
        .post(format!("{}/bookings/{}/close", BASE_URL, booking))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "booking_amount": "5000",
            "cash_amount": "5000",
            "transfer_amount": "0"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get booking");
    let body: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(body["status"], "completed");
    assert_eq!(body["status_display"], "Jugado");
}

#[tokio::test]
#[ignore]
async fn test_consumption_resyncs_closure() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let court = create_court(&client, &token, "Cancha Consumos").await;
    let booking = create_booking(&client, &token, court, "16:00", "17:30").await;

    // Register a drink before closing
    let response = client
        .post(format!("{}/products", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Agua Mineral Consumos",
            "category": "beverage",
            "price": "800",
            "stock": 10
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(response.status(), 201);
    let product: Value = response.json().await.expect("Failed to parse product");
    let product_id = product["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/consumptions", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "booking": booking,
            "product": product_id,
            "quantity": 2
        }))
        .send()
        .await
        .expect("Failed to create consumption");
    assert_eq!(response.status(), 201);
    let consumption: Value = response.json().await.expect("Failed to parse consumption");
    assert_eq!(consumption["total_price"], "1600");

    // Stock went down
    let response = client
        .get(format!("{}/products/{}", BASE_URL, product_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get product");
    let product: Value = response.json().await.expect("Failed to parse product");
    assert_eq!(product["stock"], 8);

    // Closing includes the consumption
    let response = client
        .post(format!("{}/bookings/{}/close", BASE_URL, booking))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "booking_amount": "5000",
            "cash_amount": "5000",
            "transfer_amount": "0"
        }))
        .send()
        .await
        .expect("Failed to close booking");
    assert_eq!(response.status(), 201);
    let closure: Value = response.json().await.expect("Failed to parse closure");
    assert_eq!(closure["consumptions_amount"], "1600");
    assert_eq!(closure["total_amount"], "6600");
}

#[tokio::test]
#[ignore]
async fn test_public_slots_reject_past_dates() {
    let client = Client::new();

    let response = client
        .get(format!("{}/public/available-slots?date=2020-01-01", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No se pueden ver horarios de fechas pasadas");
}

#[tokio::test]
#[ignore]
async fn test_public_booking_flow() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    create_court(&client, &token, "Cancha Pública").await;

    let date = future_date();

    // The slot grid exposes the schedule
    let response = client
        .get(format!("{}/public/available-slots?date={}", BASE_URL, date))
        .send()
        .await
        .expect("Failed to get slots");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse slots");
    assert!(body["slots"].as_array().map(|s| !s.is_empty()).unwrap_or(false));
    assert_eq!(body["schedule"]["opening_time"], "08:00");

    // Reserve the first available slot on the fresh court
    let slot = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["available"] == true && s["court_name"] == "Cancha Pública")
        .expect("No available slot")
        .clone();

    let response = client
        .post(format!("{}/public/bookings", BASE_URL))
        .json(&json!({
            "court": slot["court_id"],
            "date": date,
            "start_time": slot["start_time"],
            "customer_name": "María García",
            "customer_phone": "1144440000"
        }))
        .send()
        .await
        .expect("Failed to create public booking");

    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.expect("Failed to parse booking");
    let code = booking["cancellation_token"].as_str().expect("No code");
    assert_eq!(code.len(), 8);

    // A second reservation of the same slot is rejected
    let response = client
        .post(format!("{}/public/bookings", BASE_URL))
        .json(&json!({
            "court": slot["court_id"],
            "date": date,
            "start_time": slot["start_time"],
            "customer_name": "Pedro López",
            "customer_phone": "1133330000"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The reservation shows up in the public search, wrapped in the
    // bookings envelope
    let response = client
        .get(format!(
            "{}/public/bookings/search?name=María García",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to search bookings");
    assert!(response.status().is_success());
    let results: Value = response.json().await.expect("Failed to parse search");
    let found = results["bookings"]
        .as_array()
        .expect("Expected a bookings array")
        .iter()
        .any(|b| b["customer_name"] == "María García" && b["can_cancel"] == true);
    assert!(found);

    // The code verifies and the booking can be cancelled
    let response = client
        .get(format!(
            "{}/public/bookings/verify?token={}",
            BASE_URL, code
        ))
        .send()
        .await
        .expect("Failed to verify token");
    assert!(response.status().is_success());
    let verification: Value = response.json().await.expect("Failed to parse verification");
    assert_eq!(verification["customer_name"], "María García");
    assert_eq!(verification["can_cancel"], true);

    let response = client
        .post(format!("{}/public/bookings/cancel", BASE_URL))
        .json(&json!({ "token": code }))
        .send()
        .await
        .expect("Failed to cancel");
    assert!(response.status().is_success());
    let cancelled: Value = response.json().await.expect("Failed to parse cancellation");
    assert_eq!(cancelled["status"], "cancelled");
}

#[tokio::test]
#[ignore]
async fn test_public_search_requires_name_or_phone() {
    let client = Client::new();

    let response = client
        .get(format!("{}/public/bookings/search", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Se requiere nombre o teléfono para buscar");
}

#[tokio::test]
#[ignore]
async fn test_daily_summary_shape() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/reports/daily-summary", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_amount"].is_string());
    assert!(body["by_payment_method"].is_array());
    assert!(body["bookings"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_calendar_defaults_to_current_week() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/bookings/calendar", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let monday = Utc::now().date_naive()
        - Duration::days(Utc::now().date_naive().weekday().num_days_from_monday() as i64);

    // Every entry falls inside the Monday-based week
    for entry in body.as_array().expect("Expected an array") {
        let date = entry["date"].as_str().unwrap();
        assert!(date >= monday.format("%Y-%m-%d").to_string().as_str());
    }
}

#[tokio::test]
#[ignore]
async fn test_schedule_config_roundtrip() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/config", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get config");
    assert!(response.status().is_success());

    // Inverted hours are rejected
    let response = client
        .patch(format!("{}/config", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "opening_time": "22:00:00",
            "closing_time": "08:00:00"
        }))
        .send()
        .await
        .expect("Failed to update config");
    assert_eq!(response.status(), 400);
}
