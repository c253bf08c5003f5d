//! # Panel de administración (`/cmr`)
//!
//! - [`session`] - Acceso con credenciales Basic
//! - [`panel`] - Pestañas y acciones de alta, edición y borrado
//! - [`forms`] - Formularios del panel
//! - [`stats`] - Cifras del panel principal

pub mod forms;
pub mod panel;
pub mod session;
pub mod stats;

pub use panel::{AdminPanel, AdminTab};
pub use session::{AdminSession, SessionState, LOGIN_ERROR};
pub use stats::{unique_customers, DashboardStats};
