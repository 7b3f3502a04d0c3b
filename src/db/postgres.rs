//! PostgreSQL-backed repositories.

use crate::db::repository::{Entity, Repository, SqlValue};
use crate::db::{DatabasePool, UserRepository};
use crate::error::AppResult;
use crate::models::User;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::marker::PhantomData;

/// Generic repository issuing plain SQL against the entity's table.
pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> PgRepository<T> {
    /// Creates a repository on the given pool.
    #[must_use]
    pub fn new(db: &DatabasePool) -> Self {
        Self {
            pool: db.pool().clone(),
            _entity: PhantomData,
        }
    }

    async fn insert(&self, entity: &T) -> AppResult<T> {
        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO ");
        builder.push(T::TABLE).push(" (");
        builder.push(quoted_columns::<T>().join(", "));
        builder.push(") VALUES (");
        for (i, value) in entity.values().into_iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(") RETURNING *");

        let row = builder.build_query_as::<T>().fetch_one(&self.pool).await?;
        Ok(row)
    }

    async fn update(&self, id: i32, entity: &T) -> AppResult<Option<T>> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE ");
        builder.push(T::TABLE).push(" SET ");
        let columns = quoted_columns::<T>();
        for (i, (column, value)) in columns.iter().zip(entity.values()).enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(column).push(" = ");
            push_value(&mut builder, value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING *");

        let row = builder
            .build_query_as::<T>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

fn quoted_columns<T: Entity>() -> Vec<String> {
    T::COLUMNS.iter().map(|c| format!("\"{}\"", c)).collect()
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: SqlValue) {
    match value {
        SqlValue::Text(v) => builder.push_bind(v),
        SqlValue::Float(v) => builder.push_bind(v),
        SqlValue::Int(v) => builder.push_bind(v),
        SqlValue::Timestamp(v) => builder.push_bind(v),
    };
}

#[async_trait]
impl<T: Entity> Repository<T> for PgRepository<T> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<T>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn save(&self, entity: T) -> AppResult<T> {
        if let Some(id) = entity.id()
            && let Some(updated) = self.update(id, &entity).await?
        {
            return Ok(updated);
        }
        self.insert(&entity).await
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgRepository<User> {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT * FROM {} WHERE username = $1", User::TABLE);
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
