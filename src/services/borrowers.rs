//! Borrower registry service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        borrower::{Borrower, BorrowerDeleted, CreateBorrower},
        pagination::Page,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: Page) -> AppResult<Vec<Borrower>> {
        self.repository.borrowers.list(page).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrower> {
        self.repository.borrowers.get_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Borrower>> {
        self.repository.borrowers.find_by_email(email).await
    }

    /// Register a borrower; the email must not already be in use
    pub async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower> {
        data.validate()?;

        if self.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::UniqueConstraint(format!(
                "A borrower with email {} already exists",
                data.email
            )));
        }

        let borrower = self.repository.borrowers.create(data).await?;
        tracing::info!(borrower_id = borrower.id, "Borrower created");
        Ok(borrower)
    }

    /// Delete a borrower who has never borrowed anything.
    ///
    /// Any loan record blocks deletion, including loans whose book was returned.
    pub async fn delete(&self, id: i32) -> AppResult<BorrowerDeleted> {
        self.get_by_id(id).await?;

        let loans = self.repository.borrowers.count_loans(id).await?;
        if loans > 0 {
            tracing::warn!(borrower_id = id, loans, "Borrower deletion refused");
            return Err(AppError::IntegrityViolation(format!(
                "Cannot delete borrower {}: it has {} loan record(s)",
                id, loans
            )));
        }

        self.repository.borrowers.delete(id).await?;
        tracing::info!(borrower_id = id, "Borrower deleted");
        Ok(BorrowerDeleted::new(id))
    }
}
