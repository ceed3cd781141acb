//! Demonstration data loaded on request at startup

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

const DEMO_BORROWERS: &[(&str, &str)] = &[
    ("Jean Dupont", "jean.dupont@email.com"),
    ("Marie Martin", "marie.martin@email.com"),
    ("Pierre Durand", "pierre.durand@email.com"),
    ("Sophie Bernard", "sophie.bernard@email.com"),
    ("Lucas Petit", "lucas.petit@email.com"),
];

const DEMO_BOOKS: &[(&str, &str, i32)] = &[
    ("Les Misérables", "Victor Hugo", 1862),
    ("Don Quichotte", "Miguel de Cervantes", 1605),
    ("Madame Bovary", "Gustave Flaubert", 1857),
    ("L'Étranger", "Albert Camus", 1942),
    ("Le Comte de Monte-Cristo", "Alexandre Dumas", 1844),
    ("Anna Karénine", "Léon Tolstoï", 1877),
    ("Les Fleurs du Mal", "Charles Baudelaire", 1857),
    ("Germinal", "Émile Zola", 1885),
    ("Le Rouge et le Noir", "Stendhal", 1830),
    ("Notre-Dame de Paris", "Victor Hugo", 1831),
];

/// Rows inserted by [`seed_demo_data`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub borrowers_added: usize,
    pub books_added: usize,
}

/// Insert demo borrowers and books into empty tables.
///
/// Tables that already hold rows are left untouched.
pub async fn seed_demo_data(pool: &Pool<Postgres>) -> AppResult<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    let borrowers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrowers")
        .fetch_one(&mut *tx)
        .await?;
    if borrowers == 0 {
        for (name, email) in DEMO_BORROWERS {
            sqlx::query("INSERT INTO borrowers (name, email) VALUES ($1, $2)")
                .bind(*name)
                .bind(*email)
                .execute(&mut *tx)
                .await?;
        }
        report.borrowers_added = DEMO_BORROWERS.len();
    }

    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&mut *tx)
        .await?;
    if books == 0 {
        for (title, author, year) in DEMO_BOOKS {
            sqlx::query(
                "INSERT INTO books (title, author, publication_year, available) VALUES ($1, $2, $3, TRUE)",
            )
            .bind(*title)
            .bind(*author)
            .bind(*year)
            .execute(&mut *tx)
            .await?;
        }
        report.books_added = DEMO_BOOKS.len();
    }

    tx.commit().await?;
    Ok(report)
}
