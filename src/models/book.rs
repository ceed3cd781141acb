//! Book model and the availability state machine

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

/// Earliest accepted publication year
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Loan state of a single physical book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Available,
    OnLoan,
}

impl Availability {
    /// State after lending the book, `None` if it is already out
    #[must_use]
    pub fn borrow(self) -> Option<Self> {
        match self {
            Availability::Available => Some(Availability::OnLoan),
            Availability::OnLoan => None,
        }
    }

    /// State after the book comes back, `None` if it was not out
    #[must_use]
    pub fn give_back(self) -> Option<Self> {
        match self {
            Availability::OnLoan => Some(Availability::Available),
            Availability::Available => None,
        }
    }

    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

impl From<bool> for Availability {
    fn from(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::OnLoan
        }
    }
}

/// Book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "annee_publication")]
    pub publication_year: i32,
    /// Authoritative loan status: false while the book is out
    #[serde(rename = "disponible")]
    pub available: bool,
    #[serde(rename = "date_creation")]
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn availability(&self) -> Availability {
        Availability::from(self.available)
    }

    /// Next state when lending this book
    pub fn lend(&self) -> AppResult<Availability> {
        self.availability().borrow().ok_or_else(|| {
            AppError::InvalidState(format!("Book '{}' is not available for loan", self.title))
        })
    }

    /// Next state when this book is handed back
    pub fn take_back(&self) -> AppResult<Availability> {
        self.availability().give_back().ok_or_else(|| {
            AppError::InvalidState(format!("Book '{}' is already available", self.title))
        })
    }
}

/// Book fields embedded in loan listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "annee_publication")]
    pub publication_year: i32,
    #[serde(rename = "disponible")]
    pub available: bool,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_year"))]
pub struct CreateBook {
    #[serde(rename = "titre")]
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    #[serde(rename = "auteur")]
    #[validate(length(min = 1, max = 255, message = "Author must be 1 to 255 characters"))]
    pub author: String,
    #[serde(rename = "annee_publication")]
    pub publication_year: i32,
}

/// Partial update; availability only changes through loans and returns
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_year"))]
pub struct UpdateBook {
    #[serde(rename = "titre")]
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[serde(rename = "auteur")]
    #[validate(length(min = 1, max = 255, message = "Author must be 1 to 255 characters"))]
    pub author: Option<String>,
    #[serde(rename = "annee_publication")]
    pub publication_year: Option<i32>,
}

impl UpdateBook {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.publication_year.is_none()
    }
}

fn check_publication_year(year: i32) -> Result<(), ValidationError> {
    let current = Utc::now().year();
    if (MIN_PUBLICATION_YEAR..=current).contains(&year) {
        return Ok(());
    }
    let mut err = ValidationError::new("publication_year");
    err.message = Some(
        format!("Publication year must be between {} and {}", MIN_PUBLICATION_YEAR, current).into(),
    );
    Err(err)
}

fn validate_create_year(data: &CreateBook) -> Result<(), ValidationError> {
    check_publication_year(data.publication_year)
}

fn validate_update_year(data: &UpdateBook) -> Result<(), ValidationError> {
    data.publication_year.map_or(Ok(()), check_publication_year)
}
