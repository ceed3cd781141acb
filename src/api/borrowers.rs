//! Borrower endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        borrower::{Borrower, BorrowerDeleted, CreateBorrower},
        pagination::PageQuery,
    },
};

/// List borrowers
#[utoipa::path(
    get,
    path = "/emprunteurs",
    tag = "emprunteurs",
    params(PageQuery),
    responses(
        (status = 200, description = "List of borrowers", body = Vec<Borrower>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<Borrower>>> {
    let page = query.resolve(&state.config.pagination)?;
    let borrowers = state.services.borrowers.list(page).await?;
    Ok(Json(borrowers))
}

/// Get borrower by ID
#[utoipa::path(
    get,
    path = "/emprunteurs/{id}",
    tag = "emprunteurs",
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower details", body = Borrower),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.get_by_id(id).await?;
    Ok(Json(borrower))
}

/// Register a borrower
#[utoipa::path(
    post,
    path = "/emprunteurs",
    tag = "emprunteurs",
    request_body = CreateBorrower,
    responses(
        (status = 201, description = "Borrower created", body = Borrower),
        (status = 400, description = "Invalid data or email already registered")
    )
)]
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBorrower>,
) -> AppResult<(StatusCode, Json<Borrower>)> {
    let borrower = state.services.borrowers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

/// Delete a borrower
#[utoipa::path(
    delete,
    path = "/emprunteurs/{id}",
    tag = "emprunteurs",
    params(("id" = i32, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower deleted", body = BorrowerDeleted),
        (status = 400, description = "Borrower has loan records"),
        (status = 404, description = "Borrower not found")
    )
)]
pub async fn delete_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BorrowerDeleted>> {
    let deleted = state.services.borrowers.delete(id).await?;
    Ok(Json(deleted))
}
