//! Borrower model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Borrower record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
    /// Unique across borrowers
    pub email: String,
    #[serde(rename = "date_creation")]
    pub created_at: DateTime<Utc>,
}

/// Borrower fields embedded in loan listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowerSummary {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
    pub email: String,
}

/// Create borrower request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    #[serde(rename = "nom")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
}

/// Confirmation returned after deleting a borrower
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BorrowerDeleted {
    pub message: String,
    #[serde(rename = "emprunteur_id")]
    pub borrower_id: i32,
}

impl BorrowerDeleted {
    pub fn new(borrower_id: i32) -> Self {
        Self {
            message: "Borrower deleted successfully".to_string(),
            borrower_id,
        }
    }
}
