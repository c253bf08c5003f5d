//! # Errores del cliente del backend
//!
//! Tres familias de fallo: transporte, estado HTTP no 2xx y respuesta con una
//! forma distinta a la del contrato.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Fallo de red, DNS, TLS o conexión cortada
    #[error("Error de transporte en '{endpoint}': {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// El backend respondió con un estado no 2xx.
    ///
    /// `message` es el cuerpo de la respuesta o `HTTP <status>` si venía vacío.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Se esperaba un cuerpo JSON y no llegó nada (204, vacío o no JSON)
    #[error("Respuesta vacía en '{endpoint}'")]
    EmptyResponse { endpoint: String },

    /// El JSON no encaja con el contrato del endpoint
    #[error("Respuesta inesperada en '{endpoint}': {source}")]
    UnexpectedShape {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// URL base o ruta que no se pudo construir
    #[error("URL inválida: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// Construye el error de estado con la misma regla que la web:
    /// el texto del cuerpo si lo hay, `HTTP <status>` si no.
    pub fn status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
        Self::Status { status, message }
    }

    pub fn empty(endpoint: &str) -> Self {
        Self::EmptyResponse {
            endpoint: endpoint.to_string(),
        }
    }

    pub fn shape(endpoint: &str, source: serde_json::Error) -> Self {
        Self::UnexpectedShape {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// Código HTTP si el fallo fue un estado no 2xx
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
