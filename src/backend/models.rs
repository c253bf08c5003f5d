//! # Contrato de datos del backend
//!
//! Estructuras que reflejan exactamente el JSON que intercambia el backend.
//! Los campos opcionales son `Option` y todo lo que no aparece en el contrato
//! se ignora al deserializar.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Carta
// ---------------------------------------------------------------------------

/// Respuesta de `GET /api/v1/menu`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub food: Vec<FoodDto>,
    #[serde(default)]
    pub wines: Vec<WineDto>,
}

/// Plato de cocina tal y como lo devuelve el backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Vino de la adega tal y como lo devuelve el backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub wine_type: Option<String>,
    #[serde(default)]
    pub grapes: Option<String>,
    #[serde(default)]
    pub glass_price: Option<f64>,
    #[serde(default)]
    pub bottle_price: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Árbol de categorías de `GET /api/v1/menu/categories` y `GET /admin/menu/categories`.
///
/// El endpoint público no envía `id`; el de administración sí.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuCategoryNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub orden: i64,
    #[serde(default)]
    pub children: Vec<MenuCategoryNode>,
}

/// Árbol de categorías solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Cocina,
    Vino,
    /// Alias histórico de `Vino`
    Adega,
}

impl CategoryKind {
    /// Valor del parámetro `category` en la query
    pub fn query_value(self) -> &'static str {
        match self {
            CategoryKind::Cocina => "cocina",
            CategoryKind::Vino | CategoryKind::Adega => "vino",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFood {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub region: Option<String>,
    pub wine_type: Option<String>,
    pub grapes: Option<String>,
    pub glass_price: Option<f64>,
    pub bottle_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Cuerpo de `PUT /admin/menu/{id}`; solo viajan los campos presentes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grapes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottle_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMenuCategory {
    pub category: String,
    pub subcategory: Option<String>,
    pub orden: i64,
}

// ---------------------------------------------------------------------------
// Configuración
// ---------------------------------------------------------------------------

/// Par clave/valor de `GET /api/v1/config` y `/admin/config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

// ---------------------------------------------------------------------------
// Eventos
// ---------------------------------------------------------------------------

/// Evento tal y como lo devuelven `/api/v1/events` y `/admin/events`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date_start: String,
    #[serde(default)]
    pub date_end: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Cuerpo de alta y modificación de eventos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub timezone: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub is_published: bool,
}

/// Los listados llegan como array o envueltos en `{ items: [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged {
        #[serde(default = "Vec::new")]
        items: Vec<T>,
        #[serde(default, rename = "nextCursor")]
        next_cursor: Option<String>,
    },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paged { items, .. } => items,
        }
    }
}

// ---------------------------------------------------------------------------
// Reservas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub party_size: u32,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub time: String,
    pub available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Cuerpo de `POST /api/v1/reservations`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackendReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Rejected,
}

/// Reserva devuelta por el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationOut {
    pub id: String,
    pub status: BackendReservationStatus,
    pub date: String,
    pub time: String,
    pub party_size: u32,
    pub customer: Customer,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Propuestas de proyectos
// ---------------------------------------------------------------------------

/// Cuerpo de `POST /api/v1/contacts/projects`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContactPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub source: String,
    pub proposal_title: String,
    pub proposal_discipline: String,
    pub proposal_description: String,
    pub proposal_bio: String,
    pub proposal_socials: String,
    pub proposal_has_file: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_file_base64: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectContactReceipt {
    pub id: String,
    pub status: String,
}

/// Contacto de proyecto en el listado de administración.
///
/// El backend marca la lectura como `isRead`; versiones antiguas la enviaban
/// como `read`, que se acepta como alias.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContactItem {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "read")]
    pub is_read: bool,
    #[serde(default)]
    pub proposal_title: Option<String>,
    #[serde(default)]
    pub proposal_discipline: Option<String>,
    #[serde(default)]
    pub proposal_description: Option<String>,
    #[serde(default)]
    pub proposal_bio: Option<String>,
    #[serde(default)]
    pub proposal_socials: Option<String>,
    #[serde(default)]
    pub proposal_has_file: Option<bool>,
    #[serde(default)]
    pub proposal_file_base64: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectContactList {
    #[serde(default)]
    pub items: Vec<ProjectContactItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContactStats {
    pub total: u32,
    pub unread: u32,
}

// ---------------------------------------------------------------------------
// Horario
// ---------------------------------------------------------------------------

/// Parámetros de `POST /admin/schedule/day`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleDay {
    pub date: String,
    pub open: Option<bool>,
    pub note: Option<String>,
}

/// Parámetros de `POST /admin/schedule/window`
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceWindow {
    pub date: String,
    pub start: String,
    pub end: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_accepts_bare_and_wrapped_arrays() {
        let bare: Listing<ConfigEntry> =
            serde_json::from_str(r#"[{"key":"horario","value":"X"}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: Listing<ConfigEntry> =
            serde_json::from_str(r#"{"items":[{"key":"a","value":"1"},{"key":"b","value":"2"}],"nextCursor":null}"#)
                .unwrap();
        assert_eq!(wrapped.into_items().len(), 2);
    }

    #[test]
    fn project_contact_accepts_legacy_read_flag() {
        let item: ProjectContactItem = serde_json::from_str(
            r#"{"id":"1","name":"Ana","email":"a@b.gal","read":true,"createdAt":"2025-01-01"}"#,
        )
        .unwrap();
        assert!(item.is_read);
    }

    #[test]
    fn adega_is_sent_as_vino() {
        assert_eq!(CategoryKind::Adega.query_value(), "vino");
        assert_eq!(CategoryKind::Cocina.query_value(), "cocina");
    }

    #[test]
    fn new_reservation_serializes_camel_case() {
        let payload = NewReservation {
            date: "2025-03-01".into(),
            time: "21:00".into(),
            party_size: 4,
            customer: Customer { name: "Xoán".into(), phone: None, email: Some("x@y.gal".into()) },
            notes: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["partySize"], 4);
        assert_eq!(json["customer"]["email"], "x@y.gal");
        assert!(json.get("notes").is_none());
    }
}
