//! Data models for the Bibliothèque server

pub mod book;
pub mod borrower;
pub mod loan;
pub mod pagination;

// Re-export commonly used types
pub use book::{Availability, Book, BookSummary, CreateBook, UpdateBook};
pub use borrower::{Borrower, BorrowerDeleted, BorrowerSummary, CreateBorrower};
pub use loan::{CreateLoan, Loan, LoanDetails};
pub use pagination::{Page, PageQuery};
