//! # Almacenamiento local y consentimiento de cookies
//!
//! El único estado persistente del cliente (aparte de la URL) es la decisión
//! sobre cookies. Se inyecta como almacén clave/valor para no depender del
//! `localStorage` del navegador.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub const COOKIE_CONSENT_KEY: &str = "ariala_cookie_consent";

/// Almacén clave/valor del cliente
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Almacén en memoria; los clones comparten contenido
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.lock() {
            Ok(values) => values.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut values = match self.values.lock() {
            Ok(values) => values,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieConsent {
    Accepted,
    Rejected,
}

impl CookieConsent {
    pub fn as_str(self) -> &'static str {
        match self {
            CookieConsent::Accepted => "accepted",
            CookieConsent::Rejected => "rejected",
        }
    }
}

/// Banner de cookies: visible mientras no haya ninguna decisión guardada
#[derive(Debug)]
pub struct CookieBanner<S: KeyValueStore> {
    store: S,
    visible: bool,
}

impl<S: KeyValueStore> CookieBanner<S> {
    pub fn new(store: S) -> Self {
        let visible = store.get(COOKIE_CONSENT_KEY).is_none();
        Self { store, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Decisión guardada; un valor desconocido cuenta como ausente
    pub fn consent(&self) -> Option<CookieConsent> {
        match self.store.get(COOKIE_CONSENT_KEY).as_deref() {
            Some("accepted") => Some(CookieConsent::Accepted),
            Some("rejected") => Some(CookieConsent::Rejected),
            _ => None,
        }
    }

    pub fn accept(&mut self) {
        self.decide(CookieConsent::Accepted);
    }

    pub fn reject(&mut self) {
        self.decide(CookieConsent::Rejected);
    }

    fn decide(&mut self, consent: CookieConsent) {
        self.store.set(COOKIE_CONSENT_KEY, consent.as_str());
        self.visible = false;
    }
}
