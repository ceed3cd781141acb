//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, health, loans};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliothèque API",
        version = "1.0.0",
        description = "Library loan record-keeping REST API"
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::get_borrower,
        borrowers::create_borrower,
        borrowers::delete_borrower,
        // Loans
        loans::create_loan,
        loans::list_loans,
        loans::return_book,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::Availability,
            // Borrowers
            crate::models::borrower::Borrower,
            crate::models::borrower::BorrowerSummary,
            crate::models::borrower::CreateBorrower,
            crate::models::borrower::BorrowerDeleted,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            // Health
            health::HealthResponse,
            health::ServiceInfo,
            health::EndpointMap,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service info and health checks"),
        (name = "livres", description = "Book catalogue"),
        (name = "emprunteurs", description = "Borrower registry"),
        (name = "emprunts", description = "Loans and returns")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
