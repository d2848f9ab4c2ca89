//! TodoList handlers: create, list, read, partial update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{parse_id, ValidJson};
use crate::models::{NewTodoList, TodoList, TodoListPatch};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/todolists/",
    tag = "todolists",
    request_body = NewTodoList,
    responses(
        (status = 201, description = "List created", body = TodoList),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn create_todolist(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewTodoList>,
) -> Result<impl IntoResponse, AppError> {
    let list = state.store.create_list(&body).await?;
    tracing::info!(id = list.id, "todolist created");
    Ok(created(list))
}

#[utoipa::path(
    get,
    path = "/todolists/",
    tag = "todolists",
    responses((status = 200, description = "All lists", body = Vec<TodoList>))
)]
pub async fn list_todolists(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let lists = state.store.list_lists().await?;
    Ok(ok(lists))
}

#[utoipa::path(
    get,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i64, Path, description = "TodoList id")),
    responses(
        (status = 200, description = "The list", body = TodoList),
        (status = 404, description = "TodoList not found", body = ErrorBody)
    )
)]
pub async fn get_todolist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let list = state
        .store
        .get_list(id)
        .await?
        .ok_or_else(AppError::todolist_not_found)?;
    Ok(ok(list))
}

#[utoipa::path(
    patch,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i64, Path, description = "TodoList id")),
    request_body = TodoListPatch,
    responses(
        (status = 200, description = "Updated list", body = TodoList),
        (status = 404, description = "TodoList not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn update_todolist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<TodoListPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let list = state
        .store
        .update_list(id, &patch)
        .await?
        .ok_or_else(AppError::todolist_not_found)?;
    Ok(ok(list))
}

#[utoipa::path(
    delete,
    path = "/todolists/{id}",
    tag = "todolists",
    params(("id" = i64, Path, description = "TodoList id")),
    responses(
        (status = 204, description = "List and its items deleted"),
        (status = 404, description = "TodoList not found", body = ErrorBody)
    )
)]
pub async fn delete_todolist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    if !state.store.delete_list(id).await? {
        return Err(AppError::todolist_not_found());
    }
    tracing::info!(id, "todolist deleted");
    Ok(StatusCode::NO_CONTENT)
}
