//! # Normalizadores de vista
//!
//! Funciones puras y totales que adaptan las respuestas del backend a lo que
//! pinta la web. Sin E/S ni efectos secundarios.
//!
//! - [`menu`] - Carta de cocina y adega
//! - [`categories`] - Orden de categorías desde el árbol del backend
//! - [`events`] - Axenda
//! - [`config`] - Claves de configuración pública

pub mod categories;
pub mod config;
pub mod events;
pub mod menu;

pub use categories::flatten_category_order;
pub use config::SiteConfig;
pub use events::{filter_events, normalize_events, upcoming_events};
pub use menu::{admin_menu_rows, normalize_menu, public_menu, NormalizedMenu};
