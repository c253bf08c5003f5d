//! # Ariala Site Server
//!
//! Servidor de la web de Ariala construido con Rust y Actix Web sobre el
//! backend REST del local.
//!
//! ## Configuración
//!
//! El servidor se configura mediante variables de entorno (archivo `.env`):
//!
//! ```env
//! # Backend REST
//! BACKEND_URL=http://localhost:8000
//!
//! # Servidor
//! BIND_ADDRESS=0.0.0.0:8080
//! STATIC_DIR=./static
//!
//! # Logging
//! RUST_LOG=ariala_site=debug,actix_web=info
//! ```
//!
//! ## Arquitectura
//!
//! ```text
//! Navegador
//!     ↓ HTTP
//! Ariala Site (Actix Web)
//!     ↓ HTTP/JSON (reqwest)
//! Backend REST
//! ```

use std::env;
use std::sync::Arc;

use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::EnvFilter;

use ariala_site::api;
use ariala_site::backend::{BackendClient, PublicApi};

/// Filtro de logging cuando no hay `RUST_LOG`
const DEFAULT_LOG_FILTER: &str = "ariala_site=debug,actix_web=info";

/// Función principal que inicia el servidor web
///
/// 1. Carga variables de entorno desde `.env`
/// 2. Configura el sistema de logging con tracing
/// 3. Crea el cliente del backend
/// 4. Sirve vistas, páginas y estáticos en `BIND_ADDRESS`
///
/// # Errores
///
/// Retorna `std::io::Error` si `BACKEND_URL` no es una URL válida o no se
/// puede bindear al puerto.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Iniciando Ariala Site Server...");

    let backend: Arc<dyn PublicApi> = match BackendClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Error configurando el backend: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("BACKEND_URL inválida: {}", e),
            ));
        }
    };

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string());

    tracing::info!(static_dir = %static_dir, "Servidor iniciando en {}", bind_address);

    let backend = web::Data::from(backend);
    HttpServer::new(move || {
        App::new()
            .app_data(backend.clone())
            .wrap(Logger::default())
            .service(Files::new("/static", &static_dir))
            .configure(api::init_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
