//! # Router de secciones
//!
//! La web es una sola página con una sección activa. Cada sección tiene una
//! ruta canónica y algunas rutas alias; cualquier ruta desconocida es `home`.
//!
//! El historial del navegador se modela con el trait [`History`] para poder
//! probar la navegación sin navegador.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pantalla de primer nivel de la web
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    Events,
    Menu,
    Reservations,
    Projects,
    Careers,
    Cmr,
    Legal,
    Privacy,
    Cookies,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Home,
        Section::Events,
        Section::Menu,
        Section::Reservations,
        Section::Projects,
        Section::Careers,
        Section::Cmr,
        Section::Legal,
        Section::Privacy,
        Section::Cookies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Events => "events",
            Section::Menu => "menu",
            Section::Reservations => "reservations",
            Section::Projects => "projects",
            Section::Careers => "careers",
            Section::Cmr => "cmr",
            Section::Legal => "legal",
            Section::Privacy => "privacy",
            Section::Cookies => "cookies",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Sección desconocida: {}", s))
    }
}

/// Ruta canónica de cada sección
pub fn section_to_path(section: Section) -> &'static str {
    match section {
        Section::Home => "/home",
        Section::Events => "/axenda",
        Section::Menu => "/carta",
        Section::Reservations => "/reservas",
        Section::Projects => "/proxectos",
        Section::Careers => "/equipo",
        Section::Legal => "/legal",
        Section::Privacy => "/privacidade",
        Section::Cookies => "/cookies",
        Section::Cmr => "/cmr",
    }
}

/// Resuelve la sección de una ruta (sin distinguir mayúsculas ni espacios).
/// Todo lo que no se reconoce es `home`.
pub fn path_to_section(path: &str) -> Section {
    let clean = path.trim().to_lowercase();
    match clean.as_str() {
        "" | "/" | "/home" => Section::Home,
        "/axenda" => Section::Events,
        "/carta" => Section::Menu,
        "/reservas" => Section::Reservations,
        "/proxectos" => Section::Projects,
        "/equipo" | "/traballa" => Section::Careers,
        "/legal" => Section::Legal,
        "/privacidade" => Section::Privacy,
        "/cookies" => Section::Cookies,
        "/cmr" | "/admin" => Section::Cmr,
        _ => Section::Home,
    }
}

/// Historial del navegador
pub trait History {
    fn current_path(&self) -> String;
    fn push(&mut self, path: &str);
    fn replace(&mut self, path: &str);
}

/// Historial en memoria con atrás/adelante
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            cursor: 0,
        }
    }

    /// Retrocede una entrada; `false` si ya estaba en la primera
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.cursor] = path.to_string();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigateOptions {
    pub replace: bool,
}

/// Mantiene la sección activa coherente con la ruta del historial
#[derive(Debug)]
pub struct Router<H: History> {
    history: H,
    active: Section,
}

impl<H: History> Router<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            active: Section::Home,
        }
    }

    /// Sección inicial a partir de la ruta actual
    pub fn mount(&mut self) -> Section {
        self.active = path_to_section(&self.history.current_path());
        self.active
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Activa `section` y escribe el historial solo si la ruta cambia.
    ///
    /// `home` se normaliza a `/`; si ya se está en `/` o `/home` no se toca.
    pub fn navigate(&mut self, section: Section, opts: NavigateOptions) {
        self.active = section;
        let current = self.history.current_path();

        let target = if section == Section::Home {
            if current == "/" || current == "/home" {
                return;
            }
            "/"
        } else {
            let target = section_to_path(section);
            if current == target {
                return;
            }
            target
        };

        tracing::debug!(section = %section, path = target, replace = opts.replace, "Navegación");
        if opts.replace {
            self.history.replace(target);
        } else {
            self.history.push(target);
        }
    }

    /// Atrás/adelante del navegador: la sección sigue a la nueva ruta
    pub fn on_pop_state(&mut self) -> Section {
        self.active = path_to_section(&self.history.current_path());
        self.active
    }
}
