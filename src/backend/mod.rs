// src/backend/mod.rs
pub mod client;
pub mod error;
pub mod models;

pub use client::{AdminApi, BackendClient, BasicAuth, PublicApi};
pub use error::{ApiError, ApiResult};
