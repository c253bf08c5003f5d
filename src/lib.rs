//! # Ariala
//!
//! Capa de vista y estado de la web de Ariala (taberna y espazo cultural):
//! secciones públicas, carta, axenda, reservas, propuestas de proyectos y el
//! panel de administración. Toda la lógica de negocio vive en un backend REST
//! externo; este crate solo lo consume.
//!
//! - [`backend`] - Cliente HTTP tipado del backend
//! - [`view`] - Normalizadores puros de carta, categorías y axenda
//! - [`router`] - Sección activa y rutas
//! - [`storage`] - Almacén clave/valor y consentimiento de cookies
//! - [`site`] - Estado de la web pública
//! - [`admin`] - Sesión y acciones del panel
//! - [`api`] - Servidor HTTP (actix-web)

pub mod admin;
pub mod api;
pub mod backend;
pub mod models;
pub mod router;
pub mod site;
pub mod storage;
pub mod view;

#[cfg(test)]
mod testing;
