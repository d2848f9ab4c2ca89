//! Data access for to-do lists and items.
//!
//! Handlers talk to storage only through [`TodoStore`]. Each method is one
//! unit of work: implementations must not leave partial writes behind when
//! they return an error.

mod postgres;

pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Item, ItemPatch, NewItem, NewTodoList, TodoList, TodoListPatch};
use async_trait::async_trait;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;

    async fn create_list(&self, new: &NewTodoList) -> Result<TodoList, AppError>;

    async fn list_lists(&self) -> Result<Vec<TodoList>, AppError>;

    async fn get_list(&self, id: i64) -> Result<Option<TodoList>, AppError>;

    /// Returns `None` when no list has this id.
    async fn update_list(&self, id: i64, patch: &TodoListPatch) -> Result<Option<TodoList>, AppError>;

    /// Deletes the list and every item it owns. Returns false when the list did not exist.
    async fn delete_list(&self, id: i64) -> Result<bool, AppError>;

    /// Returns `None` (and writes nothing) when the owning list does not exist.
    async fn create_item(&self, todolist_id: i64, new: &NewItem) -> Result<Option<Item>, AppError>;

    /// Items owned by the list. No existence check on the list itself.
    async fn list_items(&self, todolist_id: i64) -> Result<Vec<Item>, AppError>;

    async fn get_item(&self, id: i64) -> Result<Option<Item>, AppError>;

    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError>;

    async fn delete_item(&self, id: i64) -> Result<bool, AppError>;
}
