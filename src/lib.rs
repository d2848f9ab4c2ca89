//! To-do list service: lists own items, exposed as a JSON REST API over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, ErrorBody};
pub use migration::{apply_migrations, ensure_database_exists};
pub use models::{Item, ItemPatch, NewItem, NewTodoList, TodoList, TodoListPatch};
pub use routes::{app, common_routes_with_ready, docs_routes, todo_routes, ApiDoc};
pub use state::AppState;
pub use store::{PgStore, TodoStore};
