//! CRUD routes for lists and items. Collection paths keep their trailing slash;
//! the slash-less forms redirect to them.

use crate::handlers::{
    create_item, create_todolist, delete_item, delete_todolist, get_item, get_todolist, list_items,
    list_todolists, update_item, update_todolist,
};
use crate::state::AppState;
use axum::{
    extract::Path,
    response::Redirect,
    routing::{any, get},
    Router,
};

/// 307 keeps the method and body, so a POST to `/todolists` still creates.
async fn todolists_slash() -> Redirect {
    Redirect::temporary("/todolists/")
}

async fn items_slash(Path(id): Path<String>) -> Redirect {
    Redirect::temporary(&format!("/todolists/{}/items/", id))
}

pub fn todo_routes(state: AppState) -> Router {
    Router::new()
        .route("/todolists", any(todolists_slash))
        .route("/todolists/", get(list_todolists).post(create_todolist))
        .route(
            "/todolists/:id",
            get(get_todolist).patch(update_todolist).delete(delete_todolist),
        )
        .route("/todolists/:id/items", any(items_slash))
        .route("/todolists/:id/items/", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .with_state(state)
}
