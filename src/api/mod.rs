//! API handlers for the Bibliothèque REST endpoints

pub mod books;
pub mod borrowers;
pub mod health;
pub mod loans;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Service info and health
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/livres", get(books::list_books).post(books::create_book))
        .route(
            "/livres/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Borrowers
        .route(
            "/emprunteurs",
            get(borrowers::list_borrowers).post(borrowers::create_borrower),
        )
        .route(
            "/emprunteurs/:id",
            get(borrowers::get_borrower).delete(borrowers::delete_borrower),
        )
        // Loans
        .route("/emprunts", get(loans::list_loans).post(loans::create_loan))
        .route("/emprunts/retours/:livre_id", post(loans::return_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use mockall::{predicate::eq, Sequence};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        error::AppError,
        models::pagination::Page,
        services::{
            test_support::{book, borrower, loan, Mocks},
            Services,
        },
    };

    fn app(mocks: Mocks) -> Router {
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(mocks.into_repository())),
        })
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn send(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app(Mocks::default()).oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_store_failure() {
        let mut mocks = Mocks::default();
        mocks
            .health
            .expect_ping()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = app(mocks).oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let response = app(Mocks::default()).oneshot(get_request("/")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["endpoints"]["emprunts"], "/emprunts");
    }

    #[tokio::test]
    async fn test_list_books_clamps_limit() {
        let mut mocks = Mocks::default();
        mocks
            .books
            .expect_list()
            .with(eq(Page { offset: 5, limit: 100 }))
            .returning(|_| Ok(vec![book(6, "Germinal", true)]));

        let response = app(mocks)
            .oneshot(get_request("/livres?skip=5&limit=1000"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await[0]["titre"], "Germinal");
    }

    #[tokio::test]
    async fn test_get_missing_book_is_404() {
        let mut mocks = Mocks::default();
        mocks
            .books
            .expect_get_by_id()
            .returning(|id| Err(AppError::NotFound(format!("Book with id {} not found", id))));

        let response = app(mocks).oneshot(get_request("/livres/77")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "NotFound");
    }

    #[tokio::test]
    async fn test_create_book_out_of_range_year_is_400() {
        let response = app(Mocks::default())
            .oneshot(send(
                "POST",
                "/livres",
                Some(json!({ "titre": "Beowulf", "auteur": "Anonyme", "annee_publication": 700 })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_book_is_201_and_available() {
        let mut mocks = Mocks::default();
        mocks
            .books
            .expect_create()
            .returning(|data| Ok(book(11, &data.title, true)));

        let response = app(mocks)
            .oneshot(send(
                "POST",
                "/livres",
                Some(json!({ "titre": "Germinal", "auteur": "Émile Zola", "annee_publication": 1885 })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["disponible"], true);
    }

    #[tokio::test]
    async fn test_delete_book_with_loans_is_400() {
        let mut mocks = Mocks::default();
        mocks.books.expect_delete().returning(|id| {
            Err(AppError::IntegrityViolation(format!(
                "Cannot delete book {}: it has loan records",
                id
            )))
        });

        let response = app(mocks).oneshot(send("DELETE", "/livres/1", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_book_is_204() {
        let mut mocks = Mocks::default();
        mocks.books.expect_delete().with(eq(2)).returning(|_| Ok(()));

        let response = app(mocks).oneshot(send("DELETE", "/livres/2", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_duplicate_borrower_email_is_400() {
        let mut mocks = Mocks::default();
        mocks
            .borrowers
            .expect_find_by_email()
            .returning(|email| Ok(Some(borrower(1, "Jean Dupont", email))));

        let response = app(mocks)
            .oneshot(send(
                "POST",
                "/emprunteurs",
                Some(json!({ "nom": "Jean Dupont", "email": "jean.dupont@email.com" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Duplicate");
    }

    #[tokio::test]
    async fn test_delete_borrower_confirmation() {
        let mut mocks = Mocks::default();
        mocks
            .borrowers
            .expect_get_by_id()
            .returning(|id| Ok(borrower(id, "Lucas Petit", "lucas.petit@email.com")));
        mocks.borrowers.expect_count_loans().returning(|_| Ok(0));
        mocks.borrowers.expect_delete().returning(|_| Ok(()));

        let response = app(mocks)
            .oneshot(send("DELETE", "/emprunteurs/5", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["emprunteur_id"], 5);
    }

    #[tokio::test]
    async fn test_borrow_unknown_book_is_404() {
        let mut mocks = Mocks::default();
        mocks
            .loans
            .expect_borrow()
            .returning(|id, _| Err(AppError::NotFound(format!("Book with id {} not found", id))));

        let response = app(mocks)
            .oneshot(send("POST", "/emprunts", Some(json!({ "livre_id": 404, "emprunteur_id": 1 }))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_borrow_twice_then_return() {
        let mut seq = Sequence::new();
        let mut mocks = Mocks::default();
        mocks
            .loans
            .expect_borrow()
            .with(eq(1), eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|book_id, borrower_id| Ok(loan(1, book_id, borrower_id)));
        mocks
            .books
            .expect_get_by_id()
            .with(eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(book(id, "Les Misérables", false)));
        mocks
            .loans
            .expect_borrow()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Err(AppError::InvalidState(
                    "Book 'Les Misérables' is not available for loan".into(),
                ))
            });
        mocks
            .loans
            .expect_return_book()
            .with(eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(book(id, "Les Misérables", true)));
        let app = app(mocks);
        let request = json!({ "livre_id": 1, "emprunteur_id": 1 });

        let first = app
            .clone()
            .oneshot(send("POST", "/emprunts", Some(request.clone())))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(json_body(first).await["livre_id"], 1);

        let on_loan = app.clone().oneshot(get_request("/livres/1")).await.unwrap();
        assert_eq!(json_body(on_loan).await["disponible"], false);

        let second = app
            .clone()
            .oneshot(send("POST", "/emprunts", Some(request)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(second).await["error"], "InvalidState");

        let returned = app
            .oneshot(send("POST", "/emprunts/retours/1", None))
            .await
            .unwrap();
        assert_eq!(returned.status(), StatusCode::OK);
        assert_eq!(json_body(returned).await["disponible"], true);
    }

    #[tokio::test]
    async fn test_negative_skip_is_400() {
        let response = app(Mocks::default())
            .oneshot(get_request("/emprunts?skip=-3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
