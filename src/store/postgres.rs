//! PostgreSQL implementation of [`TodoStore`].

use super::TodoStore;
use crate::error::AppError;
use crate::models::{Item, ItemPatch, NewItem, NewTodoList, TodoList, TodoListPatch};
use async_trait::async_trait;
use sqlx::PgPool;

const INSERT_LIST: &str = "INSERT INTO todolists (name) VALUES ($1) RETURNING id, name";
const SELECT_LISTS: &str = "SELECT id, name FROM todolists ORDER BY id";
const SELECT_LIST: &str = "SELECT id, name FROM todolists WHERE id = $1";
const UPDATE_LIST: &str =
    "UPDATE todolists SET name = COALESCE($2, name) WHERE id = $1 RETURNING id, name";
const LOCK_LIST_FOR_UPDATE: &str = "SELECT id FROM todolists WHERE id = $1 FOR UPDATE";
const LOCK_LIST_FOR_SHARE: &str = "SELECT id FROM todolists WHERE id = $1 FOR SHARE";
const DELETE_ITEMS_OF_LIST: &str = "DELETE FROM items WHERE todolist_id = $1";
const DELETE_LIST: &str = "DELETE FROM todolists WHERE id = $1";

const INSERT_ITEM: &str = "INSERT INTO items (name, text, is_done, todolist_id) VALUES ($1, $2, $3, $4) \
     RETURNING id, name, text, is_done";
const SELECT_ITEMS_OF_LIST: &str =
    "SELECT id, name, text, is_done FROM items WHERE todolist_id = $1 ORDER BY id";
const SELECT_ITEM: &str = "SELECT id, name, text, is_done FROM items WHERE id = $1";
const UPDATE_ITEM: &str = "UPDATE items SET \
     name = COALESCE($2, name), \
     text = CASE WHEN $3 THEN $4 ELSE text END, \
     is_done = COALESCE($5, is_done) \
     WHERE id = $1 RETURNING id, name, text, is_done";
const DELETE_ITEM: &str = "DELETE FROM items WHERE id = $1";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn create_list(&self, new: &NewTodoList) -> Result<TodoList, AppError> {
        tracing::debug!(sql = %INSERT_LIST, "query");
        let row = sqlx::query_as::<_, TodoList>(INSERT_LIST)
            .bind(&new.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_lists(&self) -> Result<Vec<TodoList>, AppError> {
        tracing::debug!(sql = %SELECT_LISTS, "query");
        let rows = sqlx::query_as::<_, TodoList>(SELECT_LISTS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_list(&self, id: i64) -> Result<Option<TodoList>, AppError> {
        tracing::debug!(sql = %SELECT_LIST, id, "query");
        let row = sqlx::query_as::<_, TodoList>(SELECT_LIST)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_list(&self, id: i64, patch: &TodoListPatch) -> Result<Option<TodoList>, AppError> {
        tracing::debug!(sql = %UPDATE_LIST, id, "query");
        let row = sqlx::query_as::<_, TodoList>(UPDATE_LIST)
            .bind(id)
            .bind(patch.name.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_list(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = %LOCK_LIST_FOR_UPDATE, id, "query (tx)");
        let found: Option<i64> = sqlx::query_scalar(LOCK_LIST_FOR_UPDATE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }
        tracing::debug!(sql = %DELETE_ITEMS_OF_LIST, id, "query (tx)");
        let items = sqlx::query(DELETE_ITEMS_OF_LIST)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(sql = %DELETE_LIST, id, "query (tx)");
        sqlx::query(DELETE_LIST).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        tracing::debug!(id, items, "cascaded item delete");
        Ok(true)
    }

    async fn create_item(&self, todolist_id: i64, new: &NewItem) -> Result<Option<Item>, AppError> {
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = %LOCK_LIST_FOR_SHARE, todolist_id, "query (tx)");
        let parent: Option<i64> = sqlx::query_scalar(LOCK_LIST_FOR_SHARE)
            .bind(todolist_id)
            .fetch_optional(&mut *tx)
            .await?;
        if parent.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        tracing::debug!(sql = %INSERT_ITEM, todolist_id, "query (tx)");
        let row = sqlx::query_as::<_, Item>(INSERT_ITEM)
            .bind(&new.name)
            .bind(new.text.as_deref())
            .bind(new.is_done)
            .bind(todolist_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(row))
    }

    async fn list_items(&self, todolist_id: i64) -> Result<Vec<Item>, AppError> {
        tracing::debug!(sql = %SELECT_ITEMS_OF_LIST, todolist_id, "query");
        let rows = sqlx::query_as::<_, Item>(SELECT_ITEMS_OF_LIST)
            .bind(todolist_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>, AppError> {
        tracing::debug!(sql = %SELECT_ITEM, id, "query");
        let row = sqlx::query_as::<_, Item>(SELECT_ITEM)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError> {
        tracing::debug!(sql = %UPDATE_ITEM, id, "query");
        let text = patch.text.clone().flatten();
        let row = sqlx::query_as::<_, Item>(UPDATE_ITEM)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.text.is_some())
            .bind(text)
            .bind(patch.is_done)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_item(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(sql = %DELETE_ITEM, id, "query");
        let affected = sqlx::query(DELETE_ITEM)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}
