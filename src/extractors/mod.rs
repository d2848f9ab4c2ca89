//! Request extractors that report failures as [`AppError`](crate::error::AppError).

mod json;

pub use json::{parse_id, ValidJson};
