//! # Contenido público
//!
//! Carga inicial de configuración, carta, orden de categorías y axenda. Cada
//! bloque se aplica por separado: si uno falla, los demás se pintan igual y el
//! que falló conserva lo que ya había.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::middleware::ErrorLogExt;
use crate::backend::models::CategoryKind;
use crate::backend::PublicApi;
use crate::models::{EventItem, MenuItem};
use crate::view::events::{filter_events, published_events, upcoming_events};
use crate::view::menu::{public_menu, MenuGroup};
use crate::view::{flatten_category_order, normalize_events, normalize_menu, SiteConfig};

/// Número de eventos del bloque "Próximos encontros"
pub const UPCOMING_LIMIT: usize = 3;

/// Marca de desmontaje: los resultados que lleguen después se descartan
#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    cancelled: Arc<AtomicBool>,
}

impl LoadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub config: SiteConfig,
    pub food_menu: Vec<MenuItem>,
    pub wine_menu: Vec<MenuItem>,
    pub food_category_order: Vec<String>,
    pub wine_category_order: Vec<String>,
    pub events: Vec<EventItem>,
}

impl SiteContent {
    /// Lanza todas las cargas a la vez y aplica cada una en cuanto llega.
    ///
    /// Una petición colgada no bloquea a las demás. Si `guard` se cancela, lo
    /// que llegue después no se toca.
    pub async fn load(&mut self, api: &dyn PublicApi, guard: &LoadGuard) {
        let config = api.get_config();
        let menu = api.get_menu();
        let categories = async {
            tokio::try_join!(
                api.get_menu_categories(CategoryKind::Cocina),
                api.get_menu_categories(CategoryKind::Adega),
            )
        };
        let events = api.get_events();
        tokio::pin!(config, menu, categories, events);

        let (mut config_done, mut menu_done, mut categories_done, mut events_done) =
            (false, false, false, false);

        while !(config_done && menu_done && categories_done && events_done) {
            tokio::select! {
                result = &mut config, if !config_done => {
                    config_done = true;
                    if guard.is_cancelled() {
                        break;
                    }
                    if let Some(entries) = result.ignore_error("loading public config") {
                        self.config.apply(&entries);
                    }
                }
                result = &mut menu, if !menu_done => {
                    menu_done = true;
                    if guard.is_cancelled() {
                        break;
                    }
                    if let Some(menu) = result.ignore_error("loading menu") {
                        let menu = normalize_menu(menu);
                        self.food_menu = menu.food;
                        self.wine_menu = menu.wines;
                    }
                }
                result = &mut categories, if !categories_done => {
                    categories_done = true;
                    if guard.is_cancelled() {
                        break;
                    }
                    match result.ignore_error("loading menu categories") {
                        Some((cocina, vino)) => {
                            self.food_category_order = flatten_category_order(&cocina);
                            self.wine_category_order = flatten_category_order(&vino);
                        }
                        None => {
                            self.food_category_order.clear();
                            self.wine_category_order.clear();
                        }
                    }
                }
                result = &mut events, if !events_done => {
                    events_done = true;
                    if guard.is_cancelled() {
                        break;
                    }
                    if let Some(events) = result.ignore_error("loading events") {
                        self.events = normalize_events(events);
                    }
                }
            }
        }

        if guard.is_cancelled() {
            tracing::debug!("Carga inicial descartada: vista desmontada");
            return;
        }

        tracing::info!(
            food = self.food_menu.len(),
            wines = self.wine_menu.len(),
            events = self.events.len(),
            "Contenido público cargado"
        );
    }

    pub fn food_groups(&self) -> Vec<MenuGroup> {
        public_menu(&self.food_menu, &self.food_category_order, crate::view::menu::ALL_FILTER)
    }

    pub fn wine_groups(&self, filter: &str) -> Vec<MenuGroup> {
        public_menu(&self.wine_menu, &self.wine_category_order, filter)
    }

    /// Axenda pública filtrada por categoría
    pub fn agenda(&self, category: &str) -> Vec<EventItem> {
        filter_events(&published_events(&self.events), category)
    }

    pub fn upcoming(&self, today: NaiveDate) -> Vec<EventItem> {
        upcoming_events(&self.events, today, UPCOMING_LIMIT)
    }
}
