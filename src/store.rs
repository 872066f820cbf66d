//! Catalog table DDL and database bootstrap.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Tables in dependency order: `beers` references the other three.
/// `styles.cat_id` carries no foreign key.
const CATALOG_DDL: &[(&str, &str)] = &[
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            cat_name VARCHAR(255) NOT NULL,
            last_mod TIMESTAMP NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "styles",
        r#"
        CREATE TABLE IF NOT EXISTS styles (
            id SERIAL PRIMARY KEY,
            cat_id INTEGER NOT NULL,
            style_name VARCHAR(255) NOT NULL,
            last_mod TIMESTAMP NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "breweries",
        r#"
        CREATE TABLE IF NOT EXISTS breweries (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            address1 VARCHAR(255) NOT NULL DEFAULT '',
            address2 VARCHAR(255) NOT NULL DEFAULT '',
            city VARCHAR(255) NOT NULL DEFAULT '',
            state VARCHAR(255) NOT NULL DEFAULT '',
            code VARCHAR(25) NOT NULL DEFAULT '',
            country VARCHAR(255) NOT NULL DEFAULT '',
            phone VARCHAR(50) NOT NULL DEFAULT '',
            website VARCHAR(255) NOT NULL DEFAULT '',
            filepath VARCHAR(255) NOT NULL DEFAULT '',
            descript TEXT NOT NULL DEFAULT '',
            add_user INTEGER NOT NULL DEFAULT 0,
            last_mod TIMESTAMP NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "beers",
        r#"
        CREATE TABLE IF NOT EXISTS beers (
            id SERIAL PRIMARY KEY,
            brewery_id INTEGER NOT NULL REFERENCES breweries (id),
            name VARCHAR(255) NOT NULL,
            cat_id INTEGER NOT NULL REFERENCES categories (id),
            style_id INTEGER NOT NULL REFERENCES styles (id),
            abv REAL NOT NULL,
            ibu REAL NOT NULL,
            srm REAL NOT NULL,
            upc INTEGER NOT NULL,
            filepath VARCHAR(255) NOT NULL DEFAULT '',
            descript TEXT NOT NULL DEFAULT '',
            add_user INTEGER NOT NULL DEFAULT 0,
            last_mod TIMESTAMP NOT NULL DEFAULT NOW()
        )
        "#,
    ),
];

/// Lookup indexes for the list filters.
const CATALOG_INDEXES: &[(&str, &str)] = &[
    (
        "beers_brewery_id_idx",
        "CREATE INDEX IF NOT EXISTS beers_brewery_id_idx ON beers (brewery_id)",
    ),
    (
        "styles_cat_id_idx",
        "CREATE INDEX IF NOT EXISTS styles_cat_id_idx ON styles (cat_id)",
    ),
];

/// Create the four catalog tables and their indexes if they do not exist. Existing
/// tables are left as-is.
pub async fn ensure_catalog_tables(pool: &PgPool) -> Result<(), AppError> {
    for (table, ddl) in CATALOG_DDL {
        tracing::debug!(table, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    for (index, ddl) in CATALOG_INDEXES {
        tracing::debug!(index, "ensure index");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ConfigError::DatabaseUrl("no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@db:5432/beer_catalog?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@db:5432/postgres");
        assert_eq!(name, "beer_catalog");
    }

    #[test]
    fn rejects_url_without_path() {
        assert!(matches!(
            parse_db_name_from_url("localhost"),
            Err(ConfigError::DatabaseUrl(_))
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("beer\"s"), "\"beer\"\"s\"");
    }

    #[test]
    fn beers_is_created_after_its_references() {
        let order: Vec<&str> = CATALOG_DDL.iter().map(|(t, _)| *t).collect();
        assert_eq!(order, ["categories", "styles", "breweries", "beers"]);
        assert!(!CATALOG_DDL[1].1.contains("REFERENCES"));
    }

    #[test]
    fn indexes_target_catalog_tables() {
        for (name, ddl) in CATALOG_INDEXES {
            assert!(ddl.contains(name));
            assert!(ddl.starts_with("CREATE INDEX IF NOT EXISTS"));
            assert!(CATALOG_DDL.iter().any(|(table, _)| ddl.contains(&format!(" ON {} (", table))));
        }
    }
}
