//! API integration tests
//!
//! These run against a live server backed by Postgres:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000";

/// Create a book and return its id
async fn create_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/livres", BASE_URL))
        .json(&json!({
            "titre": title,
            "auteur": "Victor Hugo",
            "annee_publication": 1862
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["disponible"], true);
    body["id"].as_i64().expect("No id in response")
}

/// Create a borrower with a unique email and return its id
async fn create_borrower(client: &Client, name: &str) -> i64 {
    let email = format!(
        "{}.{}@email.com",
        name.to_lowercase().replace(' ', "."),
        unique_suffix()
    );
    let response = client
        .post(format!("{}/emprunteurs", BASE_URL))
        .json(&json!({ "nom": name, "email": email }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

async fn borrow(client: &Client, book_id: i64, borrower_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/emprunts", BASE_URL))
        .json(&json!({ "livre_id": book_id, "emprunteur_id": borrower_id }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn return_book(client: &Client, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/emprunts/retours/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_reaches_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_cycle() {
    let client = Client::new();
    let book_id = create_book(&client, "Les Misérables").await;
    let borrower_id = create_borrower(&client, "Jean Dupont").await;

    let response = borrow(&client, book_id, borrower_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let loan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(loan["livre_id"], book_id);
    assert_eq!(loan["emprunteur_id"], borrower_id);

    let book: Value = client
        .get(format!("{}/livres/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["disponible"], false);

    let second = borrow(&client, book_id, borrower_id).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let returned = return_book(&client, book_id).await;
    assert_eq!(returned.status(), StatusCode::OK);
    let book: Value = returned.json().await.expect("Failed to parse response");
    assert_eq!(book["disponible"], true);

    // Loan history survives the return
    let again = borrow(&client, book_id, borrower_id).await;
    assert_eq!(again.status(), StatusCode::CREATED);
}

#[tokio::test]
#[ignore]
async fn test_return_available_book_fails() {
    let client = Client::new();
    let book_id = create_book(&client, "Germinal").await;

    let response = return_book(&client, book_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_borrow_unknown_borrower_fails() {
    let client = Client::new();
    let book_id = create_book(&client, "Madame Bovary").await;

    let response = borrow(&client, book_id, i32::MAX as i64).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_guards() {
    let client = Client::new();
    let book_id = create_book(&client, "Notre-Dame de Paris").await;
    let borrower_id = create_borrower(&client, "Marie Martin").await;
    let idle_borrower_id = create_borrower(&client, "Pierre Durand").await;

    assert_eq!(borrow(&client, book_id, borrower_id).await.status(), StatusCode::CREATED);
    assert_eq!(return_book(&client, book_id).await.status(), StatusCode::OK);

    // A returned loan still counts as history
    let response = client
        .delete(format!("{}/emprunteurs/{}", BASE_URL, borrower_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .delete(format!("{}/livres/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .delete(format!("{}/emprunteurs/{}", BASE_URL, idle_borrower_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["emprunteur_id"], idle_borrower_id);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_rejected() {
    let client = Client::new();
    let email = format!("sophie.bernard.{}@email.com", unique_suffix());

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let response = client
            .post(format!("{}/emprunteurs", BASE_URL))
            .json(&json!({ "nom": "Sophie Bernard", "email": email }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected);
    }
}

#[tokio::test]
#[ignore]
async fn test_list_loans_with_details() {
    let client = Client::new();

    let response = client
        .get(format!("{}/emprunts?limit=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let loans = body.as_array().expect("Expected an array");
    assert!(loans.len() <= 5);
    for loan in loans {
        assert!(loan["livre"]["titre"].is_string());
        assert!(loan["emprunteur"]["email"].is_string());
    }
}
