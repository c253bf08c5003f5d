//! Sesión del panel: credenciales Basic solo en memoria.

use crate::api::middleware::ErrorLogExt;
use crate::backend::{AdminApi, BasicAuth};

/// Único mensaje de error que ve el usuario al entrar
pub const LOGIN_ERROR: &str = "Credenciais incorrectas";

/// Usuario que aparece ya escrito en el formulario de acceso
pub const DEFAULT_USERNAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(BasicAuth),
}

#[derive(Debug, Clone)]
pub struct AdminSession {
    state: SessionState,
    pub error: Option<String>,
}

impl Default for AdminSession {
    fn default() -> Self {
        Self {
            state: SessionState::LoggedOut,
            error: None,
        }
    }
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    /// Credenciales de la sesión abierta
    pub fn auth(&self) -> Option<&BasicAuth> {
        match &self.state {
            SessionState::LoggedIn(auth) => Some(auth),
            SessionState::LoggedOut => None,
        }
    }

    /// Prueba las credenciales con una lectura privilegiada.
    ///
    /// Cualquier fallo (red o estado HTTP) deja la sesión cerrada y el mismo
    /// mensaje de error.
    pub async fn login(&mut self, api: &dyn AdminApi, username: &str, password: &str) -> bool {
        let auth = BasicAuth::new(username, password);
        match api
            .list_config(&auth)
            .await
            .log_error_level(tracing::Level::WARN, "admin login probe")
        {
            Ok(_) => {
                tracing::info!(username = %auth.username, "Sesión de administración abierta");
                self.state = SessionState::LoggedIn(auth);
                self.error = None;
                true
            }
            Err(_) => {
                self.state = SessionState::LoggedOut;
                self.error = Some(LOGIN_ERROR.to_string());
                false
            }
        }
    }

    pub fn exit(&mut self) {
        if let SessionState::LoggedIn(auth) = &self.state {
            tracing::info!(username = %auth.username, "Sesión de administración cerrada");
        }
        self.state = SessionState::LoggedOut;
        self.error = None;
    }
}
