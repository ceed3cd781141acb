//! Book catalogue service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        pagination::Page,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: Page) -> AppResult<Vec<Book>> {
        self.repository.books.list(page).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book to the catalogue; it starts available
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book created");
        Ok(book)
    }

    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.books.update(id, data).await
    }

    /// Delete a book; refused while loan records reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await.map_err(|e| {
            tracing::warn!(book_id = id, error = %e, "Book deletion refused");
            e
        })?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
