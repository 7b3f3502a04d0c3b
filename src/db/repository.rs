//! Persistence port shared by every record type.

use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use sqlx::postgres::PgRow;

/// A column value bound into an insert or update statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text column.
    Text(Option<String>),
    /// Double precision column.
    Float(Option<f64>),
    /// Integer column.
    Int(Option<i32>),
    /// Timestamp without time zone.
    Timestamp(Option<NaiveDateTime>),
}

/// A record kind stored in its own table with a store-generated integer key.
pub trait Entity: Clone + Send + Sync + Unpin + 'static + for<'r> FromRow<'r, PgRow> {
    /// Table name.
    const TABLE: &'static str;

    /// Non-key columns, in the order [`Entity::values`] returns them.
    const COLUMNS: &'static [&'static str];

    /// Store-assigned identifier, absent before the first save.
    fn id(&self) -> Option<i32>;

    /// Sets the identifier.
    fn set_id(&mut self, id: i32);

    /// Column values aligned with [`Entity::COLUMNS`].
    fn values(&self) -> Vec<SqlValue>;
}

/// Storage operations for one record kind.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Finds a record by id; `None` when no row matches.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<T>>;

    /// All records, in primary-key order.
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// Inserts a record without an id, or fully overwrites the row with the
    /// record's id. A record whose id has no row is inserted under a fresh id.
    async fn save(&self, entity: T) -> AppResult<T>;

    /// Deletes a record. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}
