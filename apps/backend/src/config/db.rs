use std::env;

use crate::error::AppError;

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
    /// Private SQLite in-memory database, one per connection pool
    InMemory,
}

/// Resolve the database URL for `profile`.
///
/// `DATABASE_URL` wins for `Prod`/`Test` when set; otherwise the URL is
/// built from `POSTGRES_*`/`APP_DB_*` variables. The test profile refuses
/// any database whose name doesn't end with `_test`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if profile == DbProfile::InMemory {
        return Ok(SQLITE_MEMORY_URL.to_string());
    }

    let url = match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            let db_name = match profile {
                DbProfile::Test => must_var("TEST_DB")?,
                _ => must_var("PROD_DB")?,
            };
            format!("postgresql://{username}:{password}@{host}:{port}/{db_name}")
        }
    };

    if profile == DbProfile::Test {
        ensure_test_database(&url)?;
    }
    Ok(url)
}

/// Safety guard: test runs may only touch databases named `*_test`.
fn ensure_test_database(url: &str) -> Result<(), AppError> {
    let db_name = url
        .rsplit('/')
        .next()
        .map(|tail| tail.split('?').next().unwrap_or(tail))
        .unwrap_or_default();
    let db_name = db_name.trim_end_matches(".db").trim_end_matches(".sqlite");
    if !db_name.ends_with("_test") {
        return Err(AppError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{db_name}'"
        )));
    }
    Ok(())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
