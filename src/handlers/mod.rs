//! HTTP handlers for to-do lists and their items.

pub mod item;
pub mod todolist;

pub use item::*;
pub use todolist::*;
