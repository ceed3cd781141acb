//! Loans repository for database operations
//!
//! Borrow and return each run in a single transaction holding a row lock on
//! the book, so the availability flag and the loan ledger change together.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookSummary},
        borrower::BorrowerSummary,
        loan::{Loan, LoanDetails},
        pagination::Page,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Record a loan and mark the book as out
    async fn borrow(&self, book_id: i32, borrower_id: i32) -> AppResult<Loan>;
    /// Mark an out book as available again, keeping its loan history
    async fn return_book(&self, book_id: i32) -> AppResult<Book>;
    async fn list_details(&self, page: Page) -> AppResult<Vec<LoanDetails>>;
}

#[derive(Clone)]
pub struct PgLoanRepository {
    pool: Pool<Postgres>,
}

impl PgLoanRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book with id {} not found", id))
}

#[async_trait]
impl LoanRepository for PgLoanRepository {
    async fn borrow(&self, book_id: i32, borrower_id: i32) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| book_not_found(book_id))?;

        // KEY SHARE blocks a concurrent delete of the borrower until commit
        let borrower: Option<i32> =
            sqlx::query_scalar("SELECT id FROM borrowers WHERE id = $1 FOR KEY SHARE")
                .bind(borrower_id)
                .fetch_optional(&mut *tx)
                .await?;
        if borrower.is_none() {
            return Err(AppError::NotFound(format!(
                "Borrower with id {} not found",
                borrower_id
            )));
        }

        let next = book.lend()?;

        let loan = sqlx::query_as::<_, Loan>(
            "INSERT INTO loans (book_id, borrower_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(book_id)
        .bind(borrower_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET available = $1 WHERE id = $2")
            .bind(next.is_available())
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(loan)
    }

    async fn return_book(&self, book_id: i32) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| book_not_found(book_id))?;

        let next = book.take_back()?;

        let book = sqlx::query_as::<_, Book>(
            "UPDATE books SET available = $1 WHERE id = $2 RETURNING *",
        )
        .bind(next.is_available())
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    async fn list_details(&self, page: Page) -> AppResult<Vec<LoanDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.borrowed_at,
                   b.id AS book_id, b.title, b.author, b.publication_year, b.available,
                   br.id AS borrower_id, br.name, br.email
            FROM loans l
            JOIN books b ON l.book_id = b.id
            JOIN borrowers br ON l.borrower_id = br.id
            ORDER BY l.id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;

        let loans = rows
            .into_iter()
            .map(|row| LoanDetails {
                id: row.get("id"),
                borrowed_at: row.get("borrowed_at"),
                book: BookSummary {
                    id: row.get("book_id"),
                    title: row.get("title"),
                    author: row.get("author"),
                    publication_year: row.get("publication_year"),
                    available: row.get("available"),
                },
                borrower: BorrowerSummary {
                    id: row.get("borrower_id"),
                    name: row.get("name"),
                    email: row.get("email"),
                },
            })
            .collect();

        Ok(loans)
    }
}
