//! Service layer between the controllers and the repositories.
//!
//! Services delegate to their repository without transformation; they keep
//! the controllers independent of the storage technology.

use crate::db::{Entity, Repository, UserRepository};
use crate::error::AppResult;
use crate::models::User;
use std::marker::PhantomData;
use std::sync::Arc;

/// CRUD service for one record kind.
pub struct CrudService<T, R: ?Sized = dyn Repository<T>> {
    repository: Arc<R>,
    _entity: PhantomData<fn() -> T>,
}

/// Service over the user repository, which also resolves logins.
pub type UserService = CrudService<User, dyn UserRepository>;

impl<T, R: ?Sized> Clone for CrudService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            _entity: PhantomData,
        }
    }
}

impl<T, R> CrudService<T, R>
where
    T: Entity,
    R: Repository<T> + ?Sized,
{
    /// Creates a service on the given repository.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    /// Finds a record by id.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<T>> {
        self.repository.find_by_id(id).await
    }

    /// All records.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn find_all(&self) -> AppResult<Vec<T>> {
        self.repository.find_all().await
    }

    /// Inserts or overwrites a record.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn save(&self, entity: T) -> AppResult<T> {
        self.repository.save(entity).await
    }

    /// Deletes a record by id.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        self.repository.delete_by_id(id).await
    }
}

impl UserService {
    /// Finds a user by login name.
    ///
    /// # Errors
    /// Returns an error if the store fails.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repository.find_by_username(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::db::InMemoryRepository;
    use crate::models::Trade;

    #[tokio::test]
    async fn test_service_delegates_to_repository() {
        let store = Arc::new(InMemoryRepository::<Trade>::new());
        let repository: Arc<dyn Repository<Trade>> = store.clone();
        let service: CrudService<Trade> = CrudService::new(repository);

        let saved = service
            .save(Trade {
                account: "Account Test".to_string(),
                trade_type: "Type Test".to_string(),
                buy_quantity: Some(100.0),
                ..Trade::default()
            })
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(service.find_all().await.unwrap(), vec![saved.clone()]);
        assert_eq!(service.find_by_id(saved.id.unwrap()).await.unwrap(), Some(saved.clone()));

        service.delete_by_id(saved.id.unwrap()).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_user_service_find_by_username() {
        let repository: Arc<dyn UserRepository> = Arc::new(InMemoryRepository::<User>::new());
        let service: UserService = CrudService::new(repository);
        service
            .save(User {
                id: None,
                username: "user1".to_string(),
                password: "hash".to_string(),
                fullname: "Test User".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        assert!(service.find_by_username("user1").await.unwrap().is_some());
        assert!(service.find_by_username("user2").await.unwrap().is_none());
    }
}
