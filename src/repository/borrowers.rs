//! Borrowers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        borrower::{Borrower, CreateBorrower},
        pagination::Page,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowerRepository: Send + Sync {
    async fn list(&self, page: Page) -> AppResult<Vec<Borrower>>;
    async fn get_by_id(&self, id: i32) -> AppResult<Borrower>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Borrower>>;
    async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower>;
    /// Number of loan records, past or current, naming this borrower
    async fn count_loans(&self, id: i32) -> AppResult<i64>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgBorrowerRepository {
    pool: Pool<Postgres>,
}

impl PgBorrowerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowerRepository for PgBorrowerRepository {
    async fn list(&self, page: Page) -> AppResult<Vec<Borrower>> {
        let borrowers = sqlx::query_as::<_, Borrower>(
            "SELECT * FROM borrowers ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(page.offset)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(borrowers)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrower with id {} not found", id)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Borrower>> {
        let borrower = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(borrower)
    }

    async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            "INSERT INTO borrowers (name, email) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                &format!("A borrower with email {} already exists", data.email),
            )
        })
    }

    async fn count_loans(&self, id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE borrower_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM borrowers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    &format!("Cannot delete borrower {}: it has loan records", id),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Borrower with id {} not found", id)));
        }
        Ok(())
    }
}
