//! Repository layer for database operations

pub mod books;
pub mod borrowers;
pub mod loans;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use books::{BookRepository, PgBookRepository};
pub use borrowers::{BorrowerRepository, PgBorrowerRepository};
pub use loans::{LoanRepository, PgLoanRepository};

/// Store connectivity probe used by the readiness endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgHealthRepository {
    pool: Pool<Postgres>,
}

impl PgHealthRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRepository for PgHealthRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Main repository struct holding one store per entity
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
    pub borrowers: Arc<dyn BorrowerRepository>,
    pub loans: Arc<dyn LoanRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool.clone())),
            borrowers: Arc::new(PgBorrowerRepository::new(pool.clone())),
            loans: Arc::new(PgLoanRepository::new(pool.clone())),
            health: Arc::new(PgHealthRepository::new(pool)),
        }
    }
}
