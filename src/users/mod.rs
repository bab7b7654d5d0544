use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod model;
pub mod password;
pub mod repo;

pub use error::{ErrorKind, RepoError};
pub use model::User;
pub use repo::UserRepository;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::person_routes())
}
