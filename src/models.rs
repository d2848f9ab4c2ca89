//! Request and response payloads. One flat struct per operation.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct TodoList {
    pub id: i64,
    #[schema(example = "Groceries")]
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewTodoList {
    #[schema(example = "Groceries")]
    pub name: String,
}

/// Partial update. Absent or null `name` leaves the stored value alone.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct TodoListPatch {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub name: String,
    pub text: Option<String>,
    pub is_done: bool,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewItem {
    #[schema(example = "Buy milk")]
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}

/// Partial update of an item.
///
/// `name` and `is_done` are applied only when present and non-null, so an
/// explicit `"is_done": false` is applied while an omitted field is not.
/// `text` is nullable: `Some(None)` clears it, `None` keeps it. Unlike `name`,
/// an explicit `"text": null` is written rather than ignored; clients that send
/// null to mean "unchanged" must omit the field instead.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub text: Option<Option<String>>,
    #[serde(default)]
    pub is_done: Option<bool>,
}

impl ItemPatch {
    /// Applies the patch to an in-memory copy of the row.
    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(text) = &self.text {
            item.text = text.clone();
        }
        if let Some(is_done) = self.is_done {
            item.is_done = is_done;
        }
    }
}

impl TodoListPatch {
    pub fn apply(&self, list: &mut TodoList) {
        if let Some(name) = &self.name {
            list.name = name.clone();
        }
    }
}

/// Marks a field as supplied, keeping an explicit null distinct from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
