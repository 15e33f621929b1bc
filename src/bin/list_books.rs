//! Print every book in the catalog. Doubles as a database connectivity check.

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use catalog_server::{config::AppConfig, repository::Repository, services::Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=warn".into()),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await
        .context("Error connecting to database")?;

    let repository = Repository::new(pool);
    let services = Services::new(&repository, config.catalog.clone());

    let books = services.catalog.all_books().await;
    repository.close().await;

    for book in books.context("Error listing books")? {
        println!(
            "{:>5}  {}  |  {}  |  {}  |  {}",
            book.id, book.title, book.author, book.genre, book.year
        );
    }

    Ok(())
}
