//! OpenAPI document for the CRUD surface.

use crate::error::ErrorBody;
use crate::handlers::{item, todolist};
use crate::models::{Item, ItemPatch, NewItem, NewTodoList, TodoList, TodoListPatch};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "todo-service"),
    paths(
        todolist::create_todolist,
        todolist::list_todolists,
        todolist::get_todolist,
        todolist::update_todolist,
        todolist::delete_todolist,
        item::create_item,
        item::list_items,
        item::get_item,
        item::update_item,
        item::delete_item,
    ),
    components(schemas(TodoList, NewTodoList, TodoListPatch, Item, NewItem, ItemPatch, ErrorBody)),
    tags(
        (name = "todolists", description = "To-do lists"),
        (name = "items", description = "Items owned by a list")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /openapi.json
pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}
