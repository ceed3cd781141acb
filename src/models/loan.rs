//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{book::BookSummary, borrower::BorrowerSummary};

/// Loan record. Never updated or deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    #[serde(rename = "livre_id")]
    pub book_id: i32,
    #[serde(rename = "emprunteur_id")]
    pub borrower_id: i32,
    #[serde(rename = "date_emprunt")]
    pub borrowed_at: DateTime<Utc>,
}

/// Loan with the book and borrower it links
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    #[serde(rename = "date_emprunt")]
    pub borrowed_at: DateTime<Utc>,
    #[serde(rename = "livre")]
    pub book: BookSummary,
    #[serde(rename = "emprunteur")]
    pub borrower: BorrowerSummary,
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    #[serde(rename = "livre_id")]
    #[validate(range(min = 1, message = "Book id must be positive"))]
    pub book_id: i32,
    #[serde(rename = "emprunteur_id")]
    #[validate(range(min = 1, message = "Borrower id must be positive"))]
    pub borrower_id: i32,
}
