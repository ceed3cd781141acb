//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::Book,
        loan::{CreateLoan, Loan, LoanDetails},
        pagination::PageQuery,
    },
};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/emprunts",
    tag = "emprunts",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan recorded", body = Loan),
        (status = 400, description = "Book is not available"),
        (status = 404, description = "Book or borrower not found")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state.services.loans.borrow(&request).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// List loans with book and borrower details
#[utoipa::path(
    get,
    path = "/emprunts",
    tag = "emprunts",
    params(PageQuery),
    responses(
        (status = 200, description = "Loan history", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let page = query.resolve(&state.config.pagination)?;
    let loans = state.services.loans.list(page).await?;
    Ok(Json(loans))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/emprunts/retours/{livre_id}",
    tag = "emprunts",
    params(("livre_id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book available again", body = Book),
        (status = 400, description = "Book is already available"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.loans.return_book(book_id).await?;
    Ok(Json(book))
}
