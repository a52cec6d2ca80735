use axum::Router;
use domain_users::{MysqlUserRepository, UserService, handlers};

pub fn router(state: &crate::AppState) -> Router {
    let repository = MysqlUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service)
}
