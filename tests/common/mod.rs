//! Shared test harness: an in-memory store and request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use todo_service::{
    app, AppConfig, AppError, AppState, Item, ItemPatch, NewItem, NewTodoList, TodoList, TodoListPatch,
    TodoStore,
};
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    last_list_id: i64,
    last_item_id: i64,
    lists: BTreeMap<i64, TodoList>,
    /// item id -> (owning list id, row)
    items: BTreeMap<i64, (i64, Item)>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn list_count(&self) -> usize {
        self.tables.lock().unwrap().lists.len()
    }

    pub fn item_count(&self) -> usize {
        self.tables.lock().unwrap().items.len()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }

    async fn create_list(&self, new: &NewTodoList) -> Result<TodoList, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        t.last_list_id += 1;
        let list = TodoList {
            id: t.last_list_id,
            name: new.name.clone(),
        };
        t.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn list_lists(&self) -> Result<Vec<TodoList>, AppError> {
        self.check_online()?;
        Ok(self.tables.lock().unwrap().lists.values().cloned().collect())
    }

    async fn get_list(&self, id: i64) -> Result<Option<TodoList>, AppError> {
        self.check_online()?;
        Ok(self.tables.lock().unwrap().lists.get(&id).cloned())
    }

    async fn update_list(&self, id: i64, patch: &TodoListPatch) -> Result<Option<TodoList>, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        let updated = t.lists.get_mut(&id).map(|list| {
            patch.apply(list);
            list.clone()
        });
        Ok(updated)
    }

    async fn delete_list(&self, id: i64) -> Result<bool, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        if t.lists.remove(&id).is_none() {
            return Ok(false);
        }
        t.items.retain(|_, (owner, _)| *owner != id);
        Ok(true)
    }

    async fn create_item(&self, todolist_id: i64, new: &NewItem) -> Result<Option<Item>, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        if !t.lists.contains_key(&todolist_id) {
            return Ok(None);
        }
        t.last_item_id += 1;
        let item = Item {
            id: t.last_item_id,
            name: new.name.clone(),
            text: new.text.clone(),
            is_done: new.is_done,
        };
        t.items.insert(item.id, (todolist_id, item.clone()));
        Ok(Some(item))
    }

    async fn list_items(&self, todolist_id: i64) -> Result<Vec<Item>, AppError> {
        self.check_online()?;
        let t = self.tables.lock().unwrap();
        let items = t
            .items
            .values()
            .filter(|(owner, _)| *owner == todolist_id)
            .map(|(_, item)| item.clone())
            .collect();
        Ok(items)
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>, AppError> {
        self.check_online()?;
        Ok(self.tables.lock().unwrap().items.get(&id).map(|(_, item)| item.clone()))
    }

    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError> {
        self.check_online()?;
        let mut t = self.tables.lock().unwrap();
        let updated = t.items.get_mut(&id).map(|(_, item)| {
            patch.apply(item);
            item.clone()
        });
        Ok(updated)
    }

    async fn delete_item(&self, id: i64) -> Result<bool, AppError> {
        self.check_online()?;
        Ok(self.tables.lock().unwrap().items.remove(&id).is_some())
    }
}

pub struct TestApp<S = MemoryStore> {
    pub router: Router,
    pub store: Arc<S>,
}

pub fn test_config(database_url: &str) -> AppConfig {
    let database_url = database_url.to_string();
    AppConfig::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "BODY_LIMIT_BYTES" => Some("1024".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Router wired to the given store, with the store kept for direct inspection.
pub fn app_with_store<S: TodoStore + 'static>(store: S, database_url: &str) -> TestApp<S> {
    let store = Arc::new(store);
    let state = AppState { store: store.clone() };
    TestApp {
        router: app(state, &test_config(database_url)),
        store,
    }
}

pub fn test_app() -> TestApp {
    app_with_store(MemoryStore::default(), "postgres://localhost/todo_test")
}

impl<S> TestApp<S> {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        self.send_request(req).await
    }

    pub async fn send_request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn create_list(&self, name: &str) -> Value {
        let (status, body) = self
            .send("POST", "/todolists/", Some(serde_json::json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    pub async fn create_item(&self, list_id: i64, payload: Value) -> Value {
        let (status, body) = self
            .send("POST", &format!("/todolists/{}/items/", list_id), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }
}
