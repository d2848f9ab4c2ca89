//! Item handlers. Creation and listing are scoped to a list; the rest address items by id.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{parse_id, ValidJson};
use crate::models::{Item, ItemPatch, NewItem};
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/todolists/{id}/items/",
    tag = "items",
    params(("id" = i64, Path, description = "Owning TodoList id")),
    request_body = NewItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 404, description = "TodoList not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Path(todolist_id): Path<String>,
    ValidJson(body): ValidJson<NewItem>,
) -> Result<impl IntoResponse, AppError> {
    let todolist_id = parse_id(&todolist_id)?;
    let item = state
        .store
        .create_item(todolist_id, &body)
        .await?
        .ok_or_else(AppError::todolist_not_found)?;
    tracing::info!(id = item.id, todolist_id, "item created");
    Ok(created(item))
}

/// Lists the items of a list. An unknown list yields an empty array, not 404.
#[utoipa::path(
    get,
    path = "/todolists/{id}/items/",
    tag = "items",
    params(("id" = i64, Path, description = "Owning TodoList id")),
    responses((status = 200, description = "Items of the list", body = Vec<Item>))
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(todolist_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let todolist_id = parse_id(&todolist_id)?;
    let items = state.store.list_items(todolist_id).await?;
    Ok(ok(items))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "Item not found", body = ErrorBody)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let item = state
        .store
        .get_item(id)
        .await?
        .ok_or_else(AppError::item_not_found)?;
    Ok(ok(item))
}

#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Updated item", body = Item),
        (status = 404, description = "Item not found", body = ErrorBody),
        (status = 422, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(patch): ValidJson<ItemPatch>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let item = state
        .store
        .update_item(id, &patch)
        .await?
        .ok_or_else(AppError::item_not_found)?;
    Ok(ok(item))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorBody)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    if !state.store.delete_item(id).await? {
        return Err(AppError::item_not_found());
    }
    tracing::info!(id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
