//! # Errores del servidor de la web
//!
//! `AppError` es lo que devuelven los handlers. Los fallos del backend se
//! traducen a `502 Bad Gateway` sin exponer la causa: la cadena completa
//! queda en el log.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::middleware::log_error_chain;
use crate::backend::ApiError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Fallo al hablar con el backend (red, estado HTTP o forma inesperada)
    #[error("Error del backend: {0}")]
    Backend(#[from] ApiError),

    /// Error de validación con campo específico
    #[error("Error de validación en campo '{field}': {message}")]
    ValidationWithField { field: String, message: String },
}

impl AppError {
    pub fn validation_field(field: &str, message: &str) -> Self {
        Self::ValidationWithField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::ValidationWithField { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Backend(source) => {
                log_error_chain(source, Some("backend request"));
                ErrorResponse {
                    error: "Backend non dispoñible".to_string(),
                    message: "Non se puido obter a información".to_string(),
                }
            }
            Self::ValidationWithField { field, message } => {
                tracing::warn!(field = %field, message = %message, "Validation error");
                ErrorResponse {
                    error: "Error de validación".to_string(),
                    message: format!("Campo '{}': {}", field, message),
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

pub type AppResult<T> = Result<T, AppError>;

pub trait ResultExt<T> {
    fn map_err_validation(self, field: &str) -> AppResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + 'static,
{
    fn map_err_validation(self, field: &str) -> AppResult<T> {
        self.map_err(|e| AppError::validation_field(field, &e.to_string()))
    }
}
