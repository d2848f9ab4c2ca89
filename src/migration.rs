//! Startup DDL: target database and the two tables.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const CREATE_TODOLISTS: &str = r#"
    CREATE TABLE IF NOT EXISTS todolists (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
"#;

const CREATE_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        text TEXT,
        is_done BOOLEAN NOT NULL DEFAULT FALSE,
        todolist_id BIGINT NOT NULL REFERENCES todolists (id) ON DELETE CASCADE
    )
"#;

const CREATE_ITEMS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS items_todolist_id_idx ON items (todolist_id)";

/// Create `todolists` and `items` if they do not exist. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [CREATE_TODOLISTS, CREATE_ITEMS, CREATE_ITEMS_INDEX] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

/// Connects to the `postgres` maintenance database and creates the database named in
/// `database_url` if it is missing. No-op when the URL already targets `postgres`.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn = opts.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Splits a connection URL into (admin URL pointing at `postgres`, database name).
fn split_database_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: url.to_string(),
        })?;
    let (base, path_and_query) = url.split_at(path_start);
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let mut admin_url = format!("{}postgres", base);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = split_database_url("postgres://u:p@localhost:5432/todo").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "todo");
    }

    #[test]
    fn keeps_query_on_admin_url() {
        let (admin, name) = split_database_url("postgres://localhost/todo?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "todo");
    }

    #[test]
    fn rejects_url_without_path() {
        let err = split_database_url("postgres://localhost").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_URL", .. }));
    }

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let err = ensure_database_exists("postgres://localhost").await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. })));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("to\"do"), "\"to\"\"do\"");
    }
}
