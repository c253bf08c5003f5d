//! # Módulo API
//!
//! Rutas HTTP del servidor de la web.
//!
//! ## Módulos principales
//!
//! - [`views`] - Vistas JSON normalizadas (carta, axenda, configuración, disponibilidad)
//! - [`pages`] - Documento base de cada sección y `/health`
//! - [`errors`] - Manejo de errores de la aplicación
//! - [`middleware`] - Logging de cadenas de error

pub mod errors;
pub mod middleware;
pub mod pages;
pub mod views;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{AppError, AppResult, ErrorResponse, ResultExt};

use actix_web::web;

/// Configura todas las rutas
///
/// ## Rutas configuradas
///
/// - `/view/*` - Ver [`views::routes`]
/// - `/health` y cualquier otra ruta - Ver [`pages::routes`]
///
/// Necesita un `web::Data<dyn PublicApi>` registrado en la aplicación.
///
/// # Ejemplo
///
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::{web, App};
/// use ariala_site::api;
/// use ariala_site::backend::{BackendClient, PublicApi};
///
/// let client: Arc<dyn PublicApi> = Arc::new(BackendClient::new("http://localhost:8000").unwrap());
/// let app = App::new()
///     .app_data(web::Data::from(client))
///     .configure(api::init_routes);
/// ```
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    views::routes(cfg);
    pages::routes(cfg);
}
