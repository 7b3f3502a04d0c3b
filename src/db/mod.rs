//! Database module: connection pool, persistence port and its adapters.

mod memory;
mod pool;
mod postgres;
mod repository;

pub use memory::InMemoryRepository;
pub use pool::DatabasePool;
pub use postgres::PgRepository;
pub use repository::{Entity, Repository, SqlValue};

use crate::error::AppResult;
use crate::models::User;
use async_trait::async_trait;

/// User storage, with the lookup the login flow needs.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Finds a user by login name.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
