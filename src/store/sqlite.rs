use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{schema, CatalogStore};
use crate::error::{Error, Result};
use crate::model::{Attribute, Build, Category, Component, ComponentRecord, SizeClass, Stats};
use crate::query::StorageFilter;

/// Catalog backed by a single SQLite database file.
///
/// The pool holds one connection so an in-memory database survives for the
/// lifetime of the store.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open (creating if missing) the database at `path`.
    pub async fn connect(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        tracing::debug!(path = %path.display(), "opening catalog database");
        Self::with_options(options).await
    }

    pub async fn connect_in_memory() -> Result<Self> {
        Self::with_options(SqliteConnectOptions::from_str("sqlite::memory:")?).await
    }

    async fn with_options(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn require_table(&self, table: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(&self.pool)
            .await?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("table '{}'", table))),
        }
    }
}

fn read_stats(row: &SqliteRow, offset: usize) -> Result<Stats> {
    let mut stats = Stats::zero();
    for (i, attribute) in Attribute::ALL.iter().enumerate() {
        stats[*attribute] = row.try_get::<f64, _>(offset + i)?;
    }
    Ok(stats)
}

fn read_component(category: Category, row: &SqliteRow) -> Result<Component> {
    let id: i64 = row.try_get(0)?;
    let mut component = Component::new(category, id, read_stats(row, 1)?);
    if category == Category::Driver {
        let size: Option<String> = row.try_get(1 + Attribute::ALL.len())?;
        component.size = size.as_deref().and_then(SizeClass::parse);
    }
    Ok(component)
}

fn read_build(row: &SqliteRow) -> Result<Build> {
    let mut ids = [None; 4];
    for (i, slot) in ids.iter_mut().enumerate() {
        *slot = Some(row.try_get::<i64, _>(i)?);
    }
    Ok(Build::new(ids, read_stats(row, Category::ALL.len())?))
}

impl CatalogStore for SqliteCatalog {
    async fn query_components(&self, category: Category) -> Result<Vec<Component>> {
        self.require_table(category.table()).await?;
        let sql = schema::select_components(category);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(|row| read_component(category, row)).collect()
    }

    async fn query_builds(&self, filters: &[StorageFilter]) -> Result<Vec<Build>> {
        self.require_table(schema::BUILDS_TABLE).await?;

        let conditions: Vec<(Attribute, &str)> = filters
            .iter()
            .map(|f| (f.attribute, f.bound.sql_operator()))
            .collect();
        let sql = schema::select_builds(&conditions);

        let mut query = sqlx::query(&sql);
        for filter in filters {
            query = query.bind(filter.value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        tracing::debug!(filters = filters.len(), rows = rows.len(), "queried builds");
        rows.iter().map(read_build).collect()
    }

    async fn display_names(&self, category: Category, id: i64) -> Result<Vec<String>> {
        self.require_table(category.names_table()).await?;
        let sql = schema::select_names(category);
        let rows = sqlx::query(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>(0).map_err(Error::from))
            .collect()
    }

    async fn replace_components(
        &mut self,
        category: Category,
        records: &[ComponentRecord],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for table in [category.table(), category.names_table()] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(&schema::component_table(category))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&schema::names_table(category))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&schema::names_index(category))
            .execute(&mut *tx)
            .await?;

        let insert_component = schema::insert_component(category);
        let insert_name = schema::insert_name(category);
        for record in records {
            let component = &record.component;
            let mut query = sqlx::query(&insert_component).bind(component.id);
            for attribute in Attribute::ALL {
                query = query.bind(component.stats[attribute]);
            }
            if category == Category::Driver {
                query = query.bind(component.size.map(SizeClass::as_str));
            }
            query.execute(&mut *tx).await?;

            for name in &record.names {
                sqlx::query(&insert_name)
                    .bind(component.id)
                    .bind(name.as_str())
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        tracing::debug!(table = category.table(), rows = records.len(), "replaced components");
        Ok(())
    }

    async fn replace_builds(&mut self, builds: &[Build]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {}", schema::BUILDS_TABLE))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&schema::builds_table())
            .execute(&mut *tx)
            .await?;

        let insert = schema::insert_build();
        for (row_id, build) in builds.iter().enumerate() {
            let mut query = sqlx::query(&insert).bind(row_id as i64);
            for category in Category::ALL {
                let id = build.id(category).ok_or_else(|| {
                    Error::InvalidOperand("only complete builds can be stored".to_string())
                })?;
                query = query.bind(id);
            }
            for attribute in Attribute::ALL {
                query = query.bind(build.stats[attribute]);
            }
            query.execute(&mut *tx).await?;
        }

        tx.commit().await?;
        tracing::debug!(rows = builds.len(), "replaced build table");
        Ok(())
    }
}
