//! Loan management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        loan::{CreateLoan, Loan, LoanDetails},
        pagination::Page,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Lend an available book to an existing borrower
    pub async fn borrow(&self, request: &CreateLoan) -> AppResult<Loan> {
        request.validate()?;

        match self
            .repository
            .loans
            .borrow(request.book_id, request.borrower_id)
            .await
        {
            Ok(loan) => {
                tracing::info!(
                    loan_id = loan.id,
                    book_id = loan.book_id,
                    borrower_id = loan.borrower_id,
                    "Book borrowed"
                );
                Ok(loan)
            }
            Err(e @ AppError::InvalidState(_)) => {
                tracing::warn!(
                    book_id = request.book_id,
                    borrower_id = request.borrower_id,
                    "Borrow refused: book is on loan"
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Make an on-loan book available again
    pub async fn return_book(&self, book_id: i32) -> AppResult<Book> {
        match self.repository.loans.return_book(book_id).await {
            Ok(book) => {
                tracing::info!(book_id, "Book returned");
                Ok(book)
            }
            Err(e @ AppError::InvalidState(_)) => {
                tracing::warn!(book_id, "Return refused: book is not on loan");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Loan history with book and borrower details
    pub async fn list(&self, page: Page) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_details(page).await
    }
}
