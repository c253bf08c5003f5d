//! Configuración pública de la web (`GET /api/v1/config`)

use serde::Serialize;

use crate::backend::models::ConfigEntry;

pub const KEY_RESERVATIONS_ENABLED: &str = "reserva-activa";
pub const KEY_CONTACT_PHONE: &str = "telefono-contacto";
pub const KEY_CONTACT_MAIL: &str = "mail-contacto";
pub const KEY_SCHEDULE: &str = "horario";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub reservations_enabled: bool,
    pub contact_phone: String,
    pub contact_mail: String,
    pub schedule_text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reservations_enabled: true,
            contact_phone: String::new(),
            contact_mail: String::new(),
            schedule_text: String::new(),
        }
    }
}

impl SiteConfig {
    /// Aplica las claves conocidas sobre `self`; el resto se ignora.
    ///
    /// `reserva-activa` solo cambia con un valor reconocible; cualquier otro
    /// texto conserva el valor anterior.
    pub fn apply(&mut self, entries: &[ConfigEntry]) {
        if let Some(raw) = find(entries, KEY_RESERVATIONS_ENABLED) {
            if let Some(enabled) = parse_flag(raw) {
                self.reservations_enabled = enabled;
            }
        }
        if let Some(phone) = find(entries, KEY_CONTACT_PHONE) {
            self.contact_phone = phone.trim().to_string();
        }
        if let Some(mail) = find(entries, KEY_CONTACT_MAIL) {
            self.contact_mail = mail.trim().to_string();
        }
        if let Some(schedule) = find(entries, KEY_SCHEDULE) {
            self.schedule_text = schedule.trim().to_string();
        }
    }

    pub fn from_entries(entries: &[ConfigEntry]) -> Self {
        let mut config = Self::default();
        config.apply(entries);
        config
    }

    /// El horario se guarda con `|` como separador de líneas
    pub fn schedule_lines(&self) -> Vec<String> {
        if self.schedule_text.is_empty() {
            return Vec::new();
        }
        self.schedule_text
            .split('|')
            .map(|line| line.trim().to_string())
            .collect()
    }
}

fn find<'a>(entries: &'a [ConfigEntry], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| entry.value.as_str())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "false" | "0" | "no" => Some(false),
        "true" | "1" | "si" | "sí" | "yes" => Some(true),
        _ => None,
    }
}
