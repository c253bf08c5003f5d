//! # Formularios del panel
//!
//! Cada formulario guarda el texto tal y como lo escribe el usuario y solo lo
//! convierte al cuerpo de la petición al guardar. Un formulario que no se
//! puede convertir (nombre vacío, precio ilegible...) no llega al backend.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::backend::models::{
    EventPayload, MenuItemPatch, NewFood, NewMenuCategory, NewWine, ScheduleDay, ServiceWindow,
};
use crate::models::{EventItem, MenuItem, MenuKind};
use crate::view::events::parse_date_start;

pub const DEFAULT_FOOD_CATEGORY: &str = "Novos";
pub const DEFAULT_WINE_CATEGORY: &str = "Rias Baixas";
pub const WINE_TYPES: [&str; 4] = ["Blanco", "Tinto", "Doce", "Espumoso"];
pub const DEFAULT_EVENT_CATEGORY: &str = "Concerto";
pub const DEFAULT_TIMEZONE: &str = "Europe/Madrid";

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Acepta `12.5` y `12,5`
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

// ---------------------------------------------------------------------------
// Carta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    /// URL o `data:` URL de la foto
    pub image: String,
    pub available: bool,
    pub grapes: String,
    pub wine_type: String,
    /// Posición en el listado del elemento que se está editando
    pub editing: Option<usize>,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            image: String::new(),
            available: true,
            grapes: String::new(),
            wine_type: WINE_TYPES[0].to_string(),
            editing: None,
        }
    }
}

impl MenuItemForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rellena el formulario con un elemento del listado
    pub fn load(&mut self, index: usize, item: &MenuItem) {
        self.name = item.name.clone();
        self.description = item.description.clone();
        self.price = item.price.to_string();
        self.category = item.category.clone();
        self.image = item.image.clone().unwrap_or_default();
        self.available = item.available;
        self.grapes = item.grapes.clone().unwrap_or_default();
        self.wine_type = item
            .wine_type
            .clone()
            .unwrap_or_else(|| WINE_TYPES[0].to_string());
        self.editing = Some(index);
    }

    fn category_or_default(&self, kind: MenuKind) -> String {
        let fallback = match kind {
            MenuKind::Food => DEFAULT_FOOD_CATEGORY,
            MenuKind::Wine => DEFAULT_WINE_CATEGORY,
        };
        non_blank(&self.category).unwrap_or_else(|| fallback.to_string())
    }

    fn checked(&self) -> Option<(String, f64)> {
        Some((non_blank(&self.name)?, parse_price(&self.price)?))
    }

    pub fn new_food(&self) -> Option<NewFood> {
        let (name, price) = self.checked()?;
        Some(NewFood {
            name,
            description: non_blank(&self.description),
            category: Some(self.category_or_default(MenuKind::Food)),
            price: Some(price),
            image_url: non_blank(&self.image),
            is_active: Some(self.available),
        })
    }

    /// El precio del formulario es el de botella
    pub fn new_wine(&self) -> Option<NewWine> {
        let (name, price) = self.checked()?;
        Some(NewWine {
            name,
            description: non_blank(&self.description),
            category: Some(self.category_or_default(MenuKind::Wine)),
            region: None,
            wine_type: non_blank(&self.wine_type),
            grapes: non_blank(&self.grapes),
            glass_price: None,
            bottle_price: Some(price),
            image_url: non_blank(&self.image),
            is_active: Some(self.available),
        })
    }

    pub fn patch(&self, kind: MenuKind) -> Option<MenuItemPatch> {
        let (name, price) = self.checked()?;
        let mut patch = MenuItemPatch {
            name: Some(name),
            description: non_blank(&self.description),
            category: Some(self.category_or_default(kind)),
            image_url: non_blank(&self.image),
            is_active: Some(self.available),
            ..MenuItemPatch::default()
        };
        match kind {
            MenuKind::Food => patch.price = Some(price),
            MenuKind::Wine => {
                patch.bottle_price = Some(price);
                patch.grapes = non_blank(&self.grapes);
                patch.wine_type = non_blank(&self.wine_type);
            }
        }
        Some(patch)
    }
}

// ---------------------------------------------------------------------------
// Eventos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub location_name: String,
    pub published: bool,
    pub editing: Option<String>,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            time: String::new(),
            description: String::new(),
            image: String::new(),
            category: DEFAULT_EVENT_CATEGORY.to_string(),
            location_name: String::new(),
            published: true,
            editing: None,
        }
    }
}

impl EventForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn load(&mut self, event: &EventItem) {
        let start = parse_date_start(&event.date_start);
        self.title = event.title.clone();
        self.date = start
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        self.time = start.map(|dt| dt.format("%H:%M").to_string()).unwrap_or_default();
        self.description = event.description.clone();
        self.image = event.image_url.clone().unwrap_or_default();
        self.category = event.category.clone();
        self.location_name = event.location_name.clone().unwrap_or_default();
        self.published = event.is_published;
        self.editing = Some(event.id.clone());
    }

    /// Sin título o sin fecha válida no hay cuerpo. Sin hora, el evento
    /// empieza a medianoche.
    pub fn payload(&self) -> Option<EventPayload> {
        let title = non_blank(&self.title)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let time = match self.time.trim() {
            "" => NaiveTime::from_hms_opt(0, 0, 0)?,
            raw => NaiveTime::parse_from_str(raw, "%H:%M").ok()?,
        };
        Some(EventPayload {
            title,
            date_start: date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string(),
            date_end: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            description: self.description.trim().to_string(),
            category: non_blank(&self.category).unwrap_or_else(|| DEFAULT_EVENT_CATEGORY.to_string()),
            image_url: self.image.trim().to_string(),
            location_name: non_blank(&self.location_name),
            is_published: self.published,
        })
    }
}

// ---------------------------------------------------------------------------
// Categorías, configuración y horario
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryForm {
    /// `cocina` o `vino`
    pub category: String,
    pub subcategory: String,
    pub orden: String,
}

impl CategoryForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn payload(&self) -> Option<NewMenuCategory> {
        let category = non_blank(&self.category)?;
        let orden = match self.orden.trim() {
            "" => 0,
            raw => raw.parse().ok()?,
        };
        Some(NewMenuCategory {
            category,
            subcategory: non_blank(&self.subcategory),
            orden,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigForm {
    pub key: String,
    pub value: String,
}

impl ConfigForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn entry(&self) -> Option<(String, String)> {
        Some((non_blank(&self.key)?, self.value.trim().to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleForm {
    pub date: String,
    pub open: Option<bool>,
    pub note: String,
    pub start: String,
    pub end: String,
}

impl ScheduleForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn day(&self) -> Option<ScheduleDay> {
        Some(ScheduleDay {
            date: non_blank(&self.date)?,
            open: self.open,
            note: non_blank(&self.note),
        })
    }

    pub fn window(&self) -> Option<ServiceWindow> {
        Some(ServiceWindow {
            date: non_blank(&self.date)?,
            start: non_blank(&self.start)?,
            end: non_blank(&self.end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_form_fills_default_category() {
        let form = MenuItemForm {
            name: "Zorza".into(),
            price: "9,5".into(),
            ..MenuItemForm::default()
        };
        let food = form.new_food().unwrap();
        assert_eq!(food.category.as_deref(), Some(DEFAULT_FOOD_CATEGORY));
        assert_eq!(food.price, Some(9.5));
        assert_eq!(food.description, None);
    }

    #[test]
    fn wine_form_sends_bottle_price() {
        let form = MenuItemForm {
            name: "Godello".into(),
            price: "28".into(),
            grapes: "Godello".into(),
            ..MenuItemForm::default()
        };
        let wine = form.new_wine().unwrap();
        assert_eq!(wine.bottle_price, Some(28.0));
        assert_eq!(wine.category.as_deref(), Some(DEFAULT_WINE_CATEGORY));
        assert_eq!(wine.wine_type.as_deref(), Some("Blanco"));
    }

    #[test]
    fn invalid_price_blocks_the_save() {
        let form = MenuItemForm {
            name: "Zorza".into(),
            price: "barato".into(),
            ..MenuItemForm::default()
        };
        assert!(form.new_food().is_none());
        assert!(form.patch(MenuKind::Food).is_none());
    }

    #[test]
    fn load_then_patch_keeps_values() {
        let mut item = MenuItem::empty(MenuKind::Food);
        item.name = "Polbo".into();
        item.price = 16.0;
        item.category = "Mar".into();
        item.available = false;

        let mut form = MenuItemForm::default();
        form.load(3, &item);
        assert_eq!(form.editing, Some(3));

        let patch = form.patch(MenuKind::Food).unwrap();
        assert_eq!(patch.price, Some(16.0));
        assert_eq!(patch.is_active, Some(false));
        assert_eq!(patch.bottle_price, None);
    }

    #[test]
    fn event_payload_combines_date_and_time() {
        let form = EventForm {
            title: "Foliada".into(),
            date: "2025-03-05".into(),
            time: "21:30".into(),
            ..EventForm::default()
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload.date_start, "2025-03-05T21:30:00");
        assert_eq!(payload.category, DEFAULT_EVENT_CATEGORY);
        assert_eq!(payload.timezone, DEFAULT_TIMEZONE);
        assert!(payload.is_published);

        let no_date = EventForm {
            title: "Foliada".into(),
            ..EventForm::default()
        };
        assert!(no_date.payload().is_none());
    }

    #[test]
    fn category_and_schedule_forms() {
        let form = CategoryForm {
            category: "vino".into(),
            subcategory: " Ribeiro ".into(),
            orden: "".into(),
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload.subcategory.as_deref(), Some("Ribeiro"));
        assert_eq!(payload.orden, 0);

        let schedule = ScheduleForm {
            date: "2025-03-10".into(),
            start: "13:00".into(),
            ..ScheduleForm::default()
        };
        assert!(schedule.day().is_some());
        assert!(schedule.window().is_none());
    }
}
