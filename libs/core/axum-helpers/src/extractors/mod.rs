//! Request extractors that reject with [`AppError`](crate::errors::AppError).

pub mod json_body;

pub use json_body::JsonBody;
