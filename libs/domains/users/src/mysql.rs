use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entity;
use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// MySQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct MysqlUserRepository {
    db: DatabaseConnection,
}

impl MysqlUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for MysqlUserRepository {
    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        // Create-then-save: the ActiveModel is the in-memory row, insert
        // persists it and yields the assigned id
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn update_by_id(&self, id: i32, changes: UpdateUser) -> UserResult<u64> {
        if changes.is_empty() {
            // Nothing to write; report whether the row exists
            let exists = entity::Entity::find_by_id(id).one(&self.db).await?;
            return Ok(exists.map_or(0, |_| 1));
        }

        let mut update = entity::Entity::update_many().filter(entity::Column::Id.eq(id));

        if let Some(firstname) = changes.firstname {
            update = update.col_expr(entity::Column::Firstname, Expr::value(firstname));
        }
        if let Some(lastname) = changes.lastname {
            update = update.col_expr(entity::Column::Lastname, Expr::value(lastname));
        }

        let result = update.exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Updated user");
        }
        Ok(result.rows_affected)
    }

    async fn delete_by_id(&self, id: i32) -> UserResult<u64> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(result.rows_affected)
    }
}
