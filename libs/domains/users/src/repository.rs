use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Build and persist a new user, returning the stored row with its
    /// assigned id
    async fn insert(&self, input: CreateUser) -> UserResult<User>;

    /// Fetch every user
    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Fetch a user by primary key
    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Update a user by primary key, returning the affected-row count
    async fn update_by_id(&self, id: i32, changes: UpdateUser) -> UserResult<u64>;

    /// Delete a user by primary key, returning the affected-row count
    async fn delete_by_id(&self, id: i32) -> UserResult<u64>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: HashMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let mut state = self.state.write().await;

        state.next_id += 1;
        let user = User {
            id: state.next_id,
            firstname: input.firstname,
            lastname: input.lastname,
        };
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let state = self.state.read().await;

        let mut result: Vec<User> = state.users.values().cloned().collect();
        result.sort_by_key(|u| u.id);

        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn update_by_id(&self, id: i32, changes: UpdateUser) -> UserResult<u64> {
        let mut state = self.state.write().await;

        match state.users.get_mut(&id) {
            Some(user) => {
                user.apply_update(changes);
                tracing::info!(user_id = %id, "Updated user");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: i32) -> UserResult<u64> {
        let mut state = self.state.write().await;

        if state.users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(1)
        } else {
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .insert(CreateUser {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            })
            .await
            .unwrap();

        let second = repo
            .insert(CreateUser {
                firstname: "Jane".to_string(),
                lastname: "Smith".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .insert(CreateUser {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            })
            .await
            .unwrap();

        let fetched = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_find_all_returns_every_row() {
        let repo = InMemoryUserRepository::new();

        assert!(repo.find_all().await.unwrap().is_empty());

        repo.insert(CreateUser {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
        })
        .await
        .unwrap();
        repo.insert(CreateUser {
            firstname: "Jane".to_string(),
            lastname: "Smith".to_string(),
        })
        .await
        .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].firstname, "John");
        assert_eq!(all[1].firstname, "Jane");
    }

    #[tokio::test]
    async fn test_update_by_id_reports_affected_rows() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .insert(CreateUser {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            })
            .await
            .unwrap();

        let affected = repo
            .update_by_id(
                created.id,
                UpdateUser {
                    firstname: Some("Jane".to_string()),
                    lastname: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.firstname, "Jane");
        assert_eq!(updated.lastname, "Doe");

        let affected = repo.update_by_id(999, UpdateUser::default()).await.unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_affected_rows() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .insert(CreateUser {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(created.id).await.unwrap(), 0);
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), None);
    }
}
