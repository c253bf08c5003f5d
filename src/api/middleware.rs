//! # Utilidades de logging para errores
//!
//! La web nunca enseña la causa de un fallo al usuario: las recargas y las
//! mutaciones fallidas se ignoran y se conserva el último estado bueno. Lo que
//! sí se hace es dejar la cadena completa del error en el log.

use std::error::Error as StdError;

/// Recorre `source()` y devuelve cada nivel como texto
pub fn error_chain<E>(error: &E) -> Vec<String>
where
    E: StdError + 'static,
{
    let mut chain = Vec::new();
    let mut current: Option<&dyn StdError> = Some(error);
    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }
    chain
}

/// Registra la cadena completa de errores
///
/// # Ejemplo
/// ```rust,ignore
/// if let Err(e) = api.get_menu().await {
///     log_error_chain(&e, Some("loading menu"));
/// }
/// ```
pub fn log_error_chain<E>(error: &E, context: Option<&str>)
where
    E: StdError + 'static,
{
    let chain = error_chain(error);
    match context {
        Some(ctx) => tracing::error!(context = %ctx, error_chain = ?chain, "Error with full chain (with context)"),
        None => tracing::error!(error_chain = ?chain, "Error with full chain"),
    }
}

/// Extension trait para Results que añade logging de la cadena de errores
pub trait ErrorLogExt<T, E> {
    /// Loggea la cadena de errores con contexto adicional
    fn log_error_context(self, context: &str) -> Result<T, E>;

    /// Loggea la cadena de errores con un nivel específico
    fn log_error_level(self, level: tracing::Level, context: &str) -> Result<T, E>;

    /// Fallo tolerado: se registra como `warn` y se descarta.
    ///
    /// Es la política de la web para recargas y mutaciones: el llamador
    /// conserva el estado anterior cuando recibe `None`.
    fn ignore_error(self, context: &str) -> Option<T>;
}

impl<T, E> ErrorLogExt<T, E> for Result<T, E>
where
    E: StdError + 'static,
{
    fn log_error_context(self, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            log_error_chain(error, Some(context));
        }
        self
    }

    fn log_error_level(self, level: tracing::Level, context: &str) -> Result<T, E> {
        if let Err(ref error) = self {
            let chain = error_chain(error);
            match level {
                tracing::Level::ERROR => log_error_chain(error, Some(context)),
                tracing::Level::WARN => {
                    tracing::warn!(context = %context, error_chain = ?chain, "Warning with error chain")
                }
                _ => tracing::info!(context = %context, "Error occurred: {}", error),
            }
        }
        self
    }

    fn ignore_error(self, context: &str) -> Option<T> {
        self.log_error_level(tracing::Level::WARN, context).ok()
    }
}
