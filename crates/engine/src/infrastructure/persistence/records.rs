//! Table mappings for each record type.

use endqueue_domain::{
    Admin, DynamicQueue, Identity, Organization, Participant, Queue, Record, RecordId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// A column value bound into an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(Option<String>),
    Integer(Option<i64>),
}

/// Relational mapping of a record type.
pub trait SqlRecord: Record {
    const TABLE: &'static str;
    const SCHEMA: &'static str;
    /// Writable columns, key excluded, in the order [`SqlRecord::values`] yields them.
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<SqlValue>;

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

fn key<I: RecordId>(row: &SqliteRow) -> Result<Identity<I>, sqlx::Error> {
    Ok(Identity::Persisted(I::from_raw(row.try_get("id")?)))
}

fn reference<I: RecordId>(row: &SqliteRow, column: &str) -> Result<Option<I>, sqlx::Error> {
    Ok(row.try_get::<Option<i64>, _>(column)?.map(I::from_raw))
}

fn text(value: &Option<String>) -> SqlValue {
    SqlValue::Text(value.clone())
}

fn integer<T: Into<i64>>(value: Option<T>) -> SqlValue {
    SqlValue::Integer(value.map(Into::into))
}

impl SqlRecord for Admin {
    const TABLE: &'static str = "admin";
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS admin (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            email TEXT
        )
    "#;
    const COLUMNS: &'static [&'static str] = &["name", "email"];

    fn values(&self) -> Vec<SqlValue> {
        vec![text(&self.name), text(&self.email)]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: key(row)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

impl SqlRecord for Organization {
    const TABLE: &'static str = "organization";
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS organization (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT
        )
    "#;
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.name.clone())),
            text(&self.description),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: key(row)?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }
}

impl SqlRecord for DynamicQueue {
    const TABLE: &'static str = "dynamic_queue";
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS dynamic_queue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            num_participants INTEGER,
            rate INTEGER
        )
    "#;
    const COLUMNS: &'static [&'static str] = &["num_participants", "rate"];

    fn values(&self) -> Vec<SqlValue> {
        vec![integer(self.num_participants), integer(self.rate)]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: key(row)?,
            num_participants: row.try_get("num_participants")?,
            rate: row.try_get("rate")?,
        })
    }
}

impl SqlRecord for Queue {
    const TABLE: &'static str = "queue";
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS queue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            description TEXT,
            max_capacity INTEGER,
            site TEXT,
            dynamic_info_id INTEGER UNIQUE REFERENCES dynamic_queue(id) ON DELETE SET NULL,
            manager_id INTEGER REFERENCES admin(id) ON DELETE SET NULL,
            organization_id INTEGER REFERENCES organization(id) ON DELETE SET NULL
        )
    "#;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "max_capacity",
        "site",
        "dynamic_info_id",
        "manager_id",
        "organization_id",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            text(&self.name),
            text(&self.desc),
            integer(self.max_capacity),
            text(&self.site),
            integer(self.dynamic_info_id),
            integer(self.manager_id),
            integer(self.organization_id),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: key(row)?,
            name: row.try_get("name")?,
            desc: row.try_get("description")?,
            max_capacity: row.try_get("max_capacity")?,
            site: row.try_get("site")?,
            dynamic_info_id: reference(row, "dynamic_info_id")?,
            manager_id: reference(row, "manager_id")?,
            organization_id: reference(row, "organization_id")?,
        })
    }
}

impl SqlRecord for Participant {
    const TABLE: &'static str = "participant";
    // Persons live outside this service, so person_id is not a foreign key.
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS participant (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            position INTEGER,
            dynamic_queue_id INTEGER REFERENCES dynamic_queue(id) ON DELETE SET NULL,
            person_id INTEGER
        )
    "#;
    const COLUMNS: &'static [&'static str] = &["position", "dynamic_queue_id", "person_id"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            integer(self.position),
            integer(self.dynamic_queue_id),
            integer(self.person_id),
        ]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: key(row)?,
            position: row.try_get("position")?,
            dynamic_queue_id: reference(row, "dynamic_queue_id")?,
            person_id: reference(row, "person_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_columns_match<R: SqlRecord>(record: &R) {
        assert_eq!(R::COLUMNS.len(), record.values().len(), "{}", R::TABLE);
    }

    #[test]
    fn every_mapping_binds_one_value_per_column() {
        assert_columns_match(&Admin::new("a"));
        assert_columns_match(&Organization::new("o"));
        assert_columns_match(&DynamicQueue::new(1, 1));
        assert_columns_match(&Queue::new("q"));
        assert_columns_match(&Participant::new(1));
    }

    #[test]
    fn queue_values_follow_column_order() {
        let queue = Queue::new("A")
            .with_desc("B")
            .with_max_capacity(3)
            .with_site("S");
        let values = queue.values();

        assert_eq!(values[0], SqlValue::Text(Some("A".into())));
        assert_eq!(values[1], SqlValue::Text(Some("B".into())));
        assert_eq!(values[2], SqlValue::Integer(Some(3)));
        assert_eq!(values[4], SqlValue::Integer(None));
    }
}
