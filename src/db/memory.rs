//! In-memory repositories.
//!
//! Used when no database is configured, and by tests.

use crate::db::UserRepository;
use crate::db::repository::{Entity, Repository};
use crate::error::AppResult;
use crate::models::User;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

/// Thread-safe store keeping rows in primary-key order.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<T>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        Ok(self.table.read().rows.values().cloned().collect())
    }

    async fn save(&self, mut entity: T) -> AppResult<T> {
        let mut table = self.table.write();
        let id = match entity.id() {
            Some(id) if table.rows.contains_key(&id) => id,
            _ => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
        };
        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        self.table.write().rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .table
            .read()
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::models::{BidList, Rating};

    fn bid(account: &str, quantity: f64) -> BidList {
        BidList {
            account: account.to_string(),
            bid_type: "Type #1".to_string(),
            bid_quantity: Some(quantity),
            ..BidList::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_fresh_ids() {
        let repo = InMemoryRepository::<BidList>::new();
        let first = repo.save(bid("Account #1", 2.0)).await.unwrap();
        let second = repo.save(bid("Account #2", 9.0)).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_save_with_id_overwrites_row() {
        let repo = InMemoryRepository::<BidList>::new();
        let mut saved = repo.save(bid("Account #1", 2.0)).await.unwrap();
        saved.account = "Account #1b".to_string();
        saved.bid_quantity = None;
        repo.save(saved.clone()).await.unwrap();

        let found = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_inserts() {
        let repo = InMemoryRepository::<BidList>::new();
        let mut record = bid("Account #1", 2.0);
        record.id = Some(42);
        let saved = repo.save(record).await.unwrap();
        assert_eq!(saved.id, Some(1));
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_in_key_order() {
        let repo = InMemoryRepository::<BidList>::new();
        for i in 0..5 {
            repo.save(bid(&format!("Account #{}", i), 1.0)).await.unwrap();
        }
        let accounts: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.account)
            .collect();
        assert_eq!(
            accounts,
            vec!["Account #0", "Account #1", "Account #2", "Account #3", "Account #4"]
        );
    }

    #[tokio::test]
    async fn test_delete_then_find_is_absent() {
        let repo = InMemoryRepository::<Rating>::new();
        let saved = repo
            .save(Rating {
                moodys_rating: Some(1),
                sand_p_rating: Some(2),
                fitch_rating: Some(3),
                order_number: Some(4),
                ..Rating::default()
            })
            .await
            .unwrap();
        let id = saved.id.unwrap();
        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let repo = InMemoryRepository::<Rating>::new();
        assert!(repo.delete_by_id(999).await.is_ok());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::<BidList>::new();
        let first = repo.save(bid("Account #1", 1.0)).await.unwrap();
        repo.delete_by_id(first.id.unwrap()).await.unwrap();
        let second = repo.save(bid("Account #2", 1.0)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = InMemoryRepository::<User>::new();
        repo.save(User {
            id: None,
            username: "admin".to_string(),
            password: "hash".to_string(),
            fullname: "Administrator".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();

        let found = repo.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.role, Role::Admin);
        assert!(repo.find_by_username("nobody").await.unwrap().is_none());
    }
}
