use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User business logic
///
/// The only place where an absent row becomes an explicit
/// [`UserError::NotFound`]; store failures pass through untouched.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every user
    pub async fn find_all(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Create a new user and return it with its assigned id
    pub async fn create(&self, input: CreateUser) -> UserResult<User> {
        self.repository.insert(input).await
    }

    /// Get a user by ID
    pub async fn find_one(&self, id: i32) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Update a user, then re-read it to return the stored state
    ///
    /// The update call itself never raises NotFound; the re-read decides
    /// whether the id resolves.
    pub async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        self.repository.update_by_id(id, input).await?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Remove a user
    ///
    /// Deleting an id that does not exist is a NotFound, symmetric with
    /// `find_one` and `update`.
    pub async fn remove(&self, id: i32) -> UserResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;

        if deleted == 0 {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn john_doe() -> CreateUser {
        CreateUser {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_all_returns_users() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_all().returning(|| {
            Ok(vec![
                User {
                    id: 1,
                    firstname: "John".to_string(),
                    lastname: "Doe".to_string(),
                },
                User {
                    id: 2,
                    firstname: "Jane".to_string(),
                    lastname: "Smith".to_string(),
                },
            ])
        });

        let service = UserService::new(mock_repo);
        let users = service.find_all().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[1].firstname, "Jane");
    }

    #[tokio::test]
    async fn test_find_all_propagates_store_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(DbErr::Custom("Database error".to_string()).into()));

        let service = UserService::new(mock_repo);
        let result = service.find_all().await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }

    #[tokio::test]
    async fn test_create_returns_user_with_assigned_id() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .with(eq(john_doe()))
            .returning(|input| {
                Ok(User {
                    id: 1,
                    firstname: input.firstname,
                    lastname: input.lastname,
                })
            });

        let service = UserService::new(mock_repo);
        let user = service.create(john_doe()).await.unwrap();

        assert_eq!(
            user,
            User {
                id: 1,
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_create_propagates_store_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Err(DbErr::Custom("Database error".to_string()).into()));

        let service = UserService::new(mock_repo);
        let result = service.create(john_doe()).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }

    #[tokio::test]
    async fn test_find_one_returns_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| {
                Ok(Some(User {
                    id,
                    firstname: "John".to_string(),
                    lastname: "Doe".to_string(),
                }))
            });

        let service = UserService::new(mock_repo);
        let user = service.find_one(1).await.unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_find_one_missing_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let err = service.find_one(999).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(999)));
        assert_eq!(err.to_string(), "User with ID 999 not found");
    }

    #[tokio::test]
    async fn test_update_rereads_the_stored_row() {
        let patch = UpdateUser {
            firstname: Some("Jane".to_string()),
            lastname: None,
        };

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_by_id()
            .with(eq(1), eq(patch.clone()))
            .returning(|_, _| Ok(1));
        mock_repo.expect_find_by_id().with(eq(1)).returning(|id| {
            Ok(Some(User {
                id,
                firstname: "Jane".to_string(),
                lastname: "Doe".to_string(),
            }))
        });

        let service = UserService::new(mock_repo);
        let user = service.update(1, patch).await.unwrap();

        assert_eq!(user.firstname, "Jane");
        assert_eq!(user.lastname, "Doe");
    }

    #[tokio::test]
    async fn test_update_propagates_store_failure_unchanged() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_by_id()
            .returning(|_, _| Err(DbErr::Custom("Update failed".to_string()).into()));

        let service = UserService::new(mock_repo);
        let result = service.update(1, UpdateUser::default()).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found_after_reread() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update_by_id().returning(|_, _| Ok(0));
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let err = service
            .update(
                999,
                UpdateUser {
                    firstname: Some("Jane".to_string()),
                    lastname: None,
                },
            )
            .await
            .unwrap_err();

        // The original id, not the patched fields, names the failure
        assert_eq!(err.to_string(), "User with ID 999 not found");
    }

    #[tokio::test]
    async fn test_remove_existing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete_by_id()
            .with(eq(1))
            .returning(|_| Ok(1));

        let service = UserService::new(mock_repo);
        assert!(service.remove(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_missing_id_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_delete_by_id().returning(|_| Ok(0));

        let service = UserService::new(mock_repo);
        let err = service.remove(999).await.unwrap_err();

        assert!(matches!(err, UserError::NotFound(999)));
    }

    #[tokio::test]
    async fn test_remove_propagates_store_failure() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete_by_id()
            .returning(|_| Err(DbErr::Custom("Delete failed".to_string()).into()));

        let service = UserService::new(mock_repo);
        let result = service.remove(1).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }

    // End-to-end over the in-memory store

    #[tokio::test]
    async fn test_lifecycle_against_in_memory_store() {
        let service = UserService::new(InMemoryUserRepository::new());

        assert!(service.find_all().await.unwrap().is_empty());

        let created = service.create(john_doe()).await.unwrap();
        assert_eq!(created.id, 1);

        let updated = service
            .update(
                created.id,
                UpdateUser {
                    firstname: Some("Jane".to_string()),
                    lastname: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.firstname, "Jane");
        assert_eq!(updated.lastname, "Doe");

        service.remove(created.id).await.unwrap();

        let err = service.find_one(created.id).await.unwrap_err();
        assert_eq!(err.to_string(), "User with ID 1 not found");
    }
}
