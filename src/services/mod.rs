//! Business logic services

pub mod books;
pub mod borrowers;
pub mod loans;

use std::sync::Arc;

use crate::{
    error::AppResult,
    repository::{HealthRepository, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub borrowers: borrowers::BorrowersService,
    pub loans: loans::LoansService,
    health: Arc<dyn HealthRepository>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            health: repository.health,
        }
    }

    /// Round-trip to the record store
    pub async fn check_ready(&self) -> AppResult<()> {
        self.health.ping().await
    }
}
