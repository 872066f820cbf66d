//! PostgreSQL catalog. Beer reads join the three related tables; filters are built with
//! bound parameters only.

use super::{BeerRepository, BreweryRepository, CategoryRepository, StyleRepository};
use crate::error::AppError;
use crate::model::{
    Beer, BeerFilter, BeerRecord, Brewery, BreweryFilter, Category, CategoryFilter, Style, StyleFilter,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

const BEER_SELECT: &str = r#"
SELECT b.id, b.name, b.abv, b.ibu, b.srm, b.upc, b.filepath, b.descript, b.add_user, b.last_mod,
       br.id AS brewery_id, br.name AS brewery_name, br.address1 AS brewery_address1,
       br.address2 AS brewery_address2, br.city AS brewery_city, br.state AS brewery_state,
       br.code AS brewery_code, br.country AS brewery_country, br.phone AS brewery_phone,
       br.website AS brewery_website, br.filepath AS brewery_filepath,
       br.descript AS brewery_descript, br.add_user AS brewery_add_user,
       br.last_mod AS brewery_last_mod,
       c.id AS category_id, c.cat_name AS category_cat_name, c.last_mod AS category_last_mod,
       s.id AS style_id, s.cat_id AS style_cat_id, s.style_name AS style_style_name,
       s.last_mod AS style_last_mod
FROM beers b
JOIN breweries br ON br.id = b.brewery_id
JOIN categories c ON c.id = b.cat_id
JOIN styles s ON s.id = b.style_id"#;

const BREWERY_SELECT: &str = "SELECT id, name, address1, address2, city, state, code, country, \
     phone, website, filepath, descript, add_user, last_mod FROM breweries";

const CATEGORY_SELECT: &str = "SELECT id, cat_name, last_mod FROM categories";

const STYLE_SELECT: &str = "SELECT id, cat_id, style_name, last_mod FROM styles";

const INSERT_BEER: &str = r#"
INSERT INTO beers (brewery_id, cat_id, style_id, name, abv, ibu, srm, upc, filepath, descript, add_user, last_mod)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
RETURNING id"#;

const UPDATE_BEER: &str = r#"
UPDATE beers
SET brewery_id = $2, cat_id = $3, style_id = $4, name = $5, abv = $6, ibu = $7, srm = $8,
    upc = $9, filepath = $10, descript = $11, add_user = $12, last_mod = NOW()
WHERE id = $1
RETURNING id"#;

/// Flat shape of one `BEER_SELECT` row.
#[derive(sqlx::FromRow)]
struct BeerRow {
    id: i32,
    name: String,
    abv: f32,
    ibu: f32,
    srm: f32,
    upc: i32,
    filepath: String,
    descript: String,
    add_user: i32,
    last_mod: NaiveDateTime,
    brewery_id: i32,
    brewery_name: String,
    brewery_address1: String,
    brewery_address2: String,
    brewery_city: String,
    brewery_state: String,
    brewery_code: String,
    brewery_country: String,
    brewery_phone: String,
    brewery_website: String,
    brewery_filepath: String,
    brewery_descript: String,
    brewery_add_user: i32,
    brewery_last_mod: NaiveDateTime,
    category_id: i32,
    category_cat_name: String,
    category_last_mod: NaiveDateTime,
    style_id: i32,
    style_cat_id: i32,
    style_style_name: String,
    style_last_mod: NaiveDateTime,
}

impl From<BeerRow> for Beer {
    fn from(row: BeerRow) -> Self {
        Beer {
            id: row.id,
            brewery: Brewery {
                id: row.brewery_id,
                name: row.brewery_name,
                address1: row.brewery_address1,
                address2: row.brewery_address2,
                city: row.brewery_city,
                state: row.brewery_state,
                code: row.brewery_code,
                country: row.brewery_country,
                phone: row.brewery_phone,
                website: row.brewery_website,
                filepath: row.brewery_filepath,
                descript: row.brewery_descript,
                add_user: row.brewery_add_user,
                last_mod: row.brewery_last_mod,
            },
            name: row.name,
            category: Category {
                id: row.category_id,
                cat_name: row.category_cat_name,
                last_mod: row.category_last_mod,
            },
            style: Style {
                id: row.style_id,
                cat_id: row.style_cat_id,
                style_name: row.style_style_name,
                last_mod: row.style_last_mod,
            },
            abv: row.abv,
            ibu: row.ibu,
            srm: row.srm,
            upc: row.upc,
            filepath: row.filepath,
            descript: row.descript,
            add_user: row.add_user,
            last_mod: row.last_mod,
        }
    }
}

/// Escape LIKE wildcards and wrap for a substring match.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Push ` WHERE ` before the first condition and ` AND ` before the rest.
fn and_where(qb: &mut QueryBuilder<'_, Postgres>, started: &mut bool) {
    qb.push(if *started { " AND " } else { " WHERE " });
    *started = true;
}

/// Foreign-key violations mean a referenced row disappeared after the service checked it.
fn write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return AppError::BadRequest(format!("referenced row does not exist: {}", db.message()));
        }
    }
    AppError::Db(err)
}

async fn fetch_beer<'e, E>(executor: E, id: i32) -> Result<Option<Beer>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let sql = format!("{} WHERE b.id = $1", BEER_SELECT);
    tracing::debug!(sql = %sql, id, "query");
    let row = sqlx::query_as::<_, BeerRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(Beer::from))
}

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        PgCatalog { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BeerRepository for PgCatalog {
    async fn find(&self, filter: &BeerFilter) -> Result<Vec<Beer>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(BEER_SELECT);
        let mut started = false;
        if let Some(name) = &filter.name {
            and_where(&mut qb, &mut started);
            qb.push("b.name ILIKE ").push_bind(like_pattern(name));
        }
        if let Some(id) = filter.brewery_id {
            and_where(&mut qb, &mut started);
            qb.push("b.brewery_id = ").push_bind(id);
        }
        if let Some(id) = filter.category_id {
            and_where(&mut qb, &mut started);
            qb.push("b.cat_id = ").push_bind(id);
        }
        if let Some(id) = filter.style_id {
            and_where(&mut qb, &mut started);
            qb.push("b.style_id = ").push_bind(id);
        }
        qb.push(" ORDER BY b.id");
        tracing::debug!(sql = %qb.sql(), filter = ?filter, "query");
        let rows = qb.build_query_as::<BeerRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Beer::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, AppError> {
        Ok(fetch_beer(&self.pool, id).await?)
    }

    async fn insert(&self, record: &BeerRecord) -> Result<Beer, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = %INSERT_BEER, record = ?record, "query (tx)");
        let id: i32 = sqlx::query_scalar(INSERT_BEER)
            .bind(record.brewery_id)
            .bind(record.category_id)
            .bind(record.style_id)
            .bind(&record.name)
            .bind(record.abv)
            .bind(record.ibu)
            .bind(record.srm)
            .bind(record.upc)
            .bind(&record.filepath)
            .bind(&record.descript)
            .bind(record.add_user)
            .fetch_one(&mut *tx)
            .await
            .map_err(write_error)?;
        let beer = fetch_beer(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("beer {} missing after insert", id)))?;
        tx.commit().await?;
        tracing::info!(beer_id = id, "beer created");
        Ok(beer)
    }

    async fn update(&self, id: i32, record: &BeerRecord) -> Result<Option<Beer>, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = %UPDATE_BEER, id, record = ?record, "query (tx)");
        let updated: Option<i32> = sqlx::query_scalar(UPDATE_BEER)
            .bind(id)
            .bind(record.brewery_id)
            .bind(record.category_id)
            .bind(record.style_id)
            .bind(&record.name)
            .bind(record.abv)
            .bind(record.ibu)
            .bind(record.srm)
            .bind(record.upc)
            .bind(&record.filepath)
            .bind(&record.descript)
            .bind(record.add_user)
            .fetch_optional(&mut *tx)
            .await
            .map_err(write_error)?;
        if updated.is_none() {
            return Ok(None);
        }
        let beer = fetch_beer(&mut *tx, id).await?;
        tx.commit().await?;
        tracing::info!(beer_id = id, "beer updated");
        Ok(beer)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(beer_id = id, "beer deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl BreweryRepository for PgCatalog {
    async fn find(&self, filter: &BreweryFilter) -> Result<Vec<Brewery>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(BREWERY_SELECT);
        let mut started = false;
        if let Some(name) = &filter.name {
            and_where(&mut qb, &mut started);
            qb.push("name ILIKE ").push_bind(like_pattern(name));
        }
        if let Some(city) = &filter.city {
            and_where(&mut qb, &mut started);
            qb.push("city = ").push_bind(city.clone());
        }
        if let Some(country) = &filter.country {
            and_where(&mut qb, &mut started);
            qb.push("country = ").push_bind(country.clone());
        }
        qb.push(" ORDER BY id");
        tracing::debug!(sql = %qb.sql(), filter = ?filter, "query");
        Ok(qb.build_query_as::<Brewery>().fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Brewery>, AppError> {
        let sql = format!("{} WHERE id = $1", BREWERY_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Brewery>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }
}

#[async_trait]
impl CategoryRepository for PgCatalog {
    async fn find(&self, filter: &CategoryFilter) -> Result<Vec<Category>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(CATEGORY_SELECT);
        if let Some(name) = &filter.name {
            qb.push(" WHERE cat_name ILIKE ").push_bind(like_pattern(name));
        }
        qb.push(" ORDER BY id");
        tracing::debug!(sql = %qb.sql(), filter = ?filter, "query");
        Ok(qb.build_query_as::<Category>().fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        let sql = format!("{} WHERE id = $1", CATEGORY_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Category>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }
}

#[async_trait]
impl StyleRepository for PgCatalog {
    async fn find(&self, filter: &StyleFilter) -> Result<Vec<Style>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(STYLE_SELECT);
        let mut started = false;
        if let Some(name) = &filter.name {
            and_where(&mut qb, &mut started);
            qb.push("style_name ILIKE ").push_bind(like_pattern(name));
        }
        if let Some(id) = filter.category_id {
            and_where(&mut qb, &mut started);
            qb.push("cat_id = ").push_bind(id);
        }
        qb.push(" ORDER BY id");
        tracing::debug!(sql = %qb.sql(), filter = ?filter, "query");
        Ok(qb.build_query_as::<Style>().fetch_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Style>, AppError> {
        let sql = format!("{} WHERE id = $1", STYLE_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Style>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }
}
