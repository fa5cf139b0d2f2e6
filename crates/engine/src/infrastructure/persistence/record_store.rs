//! Generic SQLite record store.

use std::marker::PhantomData;

use async_trait::async_trait;
use endqueue_domain::RecordId;
use sqlx::error::ErrorKind;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool};

use super::connection::SqliteDatabase;
use super::records::{SqlRecord, SqlValue};
use crate::infrastructure::ports::{RecordStore, RepoError};

/// SQLite implementation of [`RecordStore`] for any mapped record type.
pub struct SqliteRecordStore<R> {
    pool: SqlitePool,
    _record: PhantomData<fn() -> R>,
}

impl<R: SqlRecord> SqliteRecordStore<R> {
    pub fn new(database: &SqliteDatabase) -> Self {
        Self {
            pool: database.pool().clone(),
            _record: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", R::COLUMNS.join(", "), R::TABLE)
    }

    async fn insert(&self, record: R) -> Result<R, RepoError> {
        let placeholders = vec!["?"; R::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders
        );

        let result = bind_values(sqlx::query(&sql), record.values())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error::<R>("insert", e))?;

        Ok(record.persisted(R::Id::from_raw(result.last_insert_rowid())))
    }

    async fn update(&self, id: R::Id, record: R) -> Result<R, RepoError> {
        let assignments = R::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", R::TABLE, assignments);

        let result = bind_values(sqlx::query(&sql), record.values())
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error::<R>("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found(R::DISPLAY_NAME, id));
        }

        Ok(record)
    }
}

#[async_trait]
impl<R: SqlRecord> RecordStore<R> for SqliteRecordStore<R> {
    async fn save(&self, record: R) -> Result<R, RepoError> {
        match record.id() {
            None => self.insert(record).await,
            Some(id) => self.update(id, record).await,
        }
    }

    async fn find_by_id(&self, id: R::Id) -> Result<Option<R>, RepoError> {
        let sql = format!("{} WHERE id = ?", Self::select_sql());

        let row = sqlx::query(&sql)
            .bind(id.raw())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_by_id", format!("{}: {e}", R::TABLE)))?;

        row.map(|row| R::from_row(&row).map_err(RepoError::serialization))
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<R>, RepoError> {
        let sql = format!("{} ORDER BY id", Self::select_sql());

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_all", format!("{}: {e}", R::TABLE)))?;

        rows.iter()
            .map(|row| R::from_row(row).map_err(RepoError::serialization))
            .collect()
    }

    async fn delete_by_id(&self, id: R::Id) -> Result<bool, RepoError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);

        let result = sqlx::query(&sql)
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error::<R>("delete_by_id", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn bind_values<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: Vec<SqlValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Text(text) => query.bind(text),
            SqlValue::Integer(integer) => query.bind(integer),
        };
    }
    query
}

fn write_error<R: SqlRecord>(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db_error) = &error {
        if !matches!(db_error.kind(), ErrorKind::Other) {
            return RepoError::constraint(format!("{}: {}", R::TABLE, db_error.message()));
        }
    }
    RepoError::database(operation, format!("{}: {error}", R::TABLE))
}
