//! # Modelos de vista
//!
//! Copias transitorias de los registros del backend con la forma que pinta
//! la web. El backend es el dueño de todos ellos.

use serde::{Deserialize, Serialize};

use crate::backend::models::{BackendReservationStatus, ProjectContactItem, ReservationOut};

/// Carta a la que pertenece un elemento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Food,
    Wine,
}

/// Plato o vino listo para pintar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Option<String>,
    pub kind: MenuKind,
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub tags: Vec<String>,
    /// `false` oculta el elemento en la carta pública ("Esgotado" en el panel)
    pub available: bool,
    // Campos exclusivos de vinos
    pub winery: Option<String>,
    pub winemaker: Option<String>,
    pub grapes: Option<String>,
    pub region: Option<String>,
    pub wine_type: Option<String>,
    pub glass_price: Option<f64>,
    pub bottle_price: Option<f64>,
}

impl MenuItem {
    /// Elemento vacío de una carta, con los mismos defaults que el normalizador
    pub fn empty(kind: MenuKind) -> Self {
        Self {
            id: None,
            kind,
            category: String::new(),
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image: None,
            tags: Vec::new(),
            available: true,
            winery: None,
            winemaker: None,
            grapes: None,
            region: None,
            wine_type: None,
            glass_price: None,
            bottle_price: None,
        }
    }
}

/// Evento de la axenda con los campos de presentación ya derivados
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date_start: String,
    pub date_end: Option<String>,
    pub timezone: Option<String>,
    pub location_name: Option<String>,
    pub is_published: bool,
    /// Imagen a pintar (placeholder si el backend no envía ninguna)
    pub image: String,
    /// Imagen original del backend
    pub image_url: Option<String>,
    /// `DD MMM` derivado de `date_start`
    pub date: String,
    /// `HH:MM` derivado de `date_start`
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<BackendReservationStatus> for ReservationStatus {
    fn from(status: BackendReservationStatus) -> Self {
        match status {
            BackendReservationStatus::Pending => Self::Pending,
            BackendReservationStatus::Confirmed => Self::Confirmed,
            BackendReservationStatus::Cancelled | BackendReservationStatus::Rejected => Self::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub observations: Option<String>,
    pub status: ReservationStatus,
    pub created_at: String,
}

impl Reservation {
    /// Convierte la reserva recién creada; email y teléfono caen a lo que
    /// escribió el cliente si el backend no los devuelve. Una reserva nueva
    /// siempre entra como pendiente.
    pub fn from_created(out: ReservationOut, email: &str, phone: &str) -> Self {
        Self {
            id: out.id,
            date: out.date,
            time: out.time,
            guests: out.party_size,
            name: out.customer.name,
            email: out.customer.email.filter(|e| !e.is_empty()).unwrap_or_else(|| email.to_string()),
            phone: out.customer.phone.filter(|p| !p.is_empty()).unwrap_or_else(|| phone.to_string()),
            observations: out.notes.filter(|n| !n.is_empty()),
            status: ReservationStatus::Pending,
            created_at: out.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    New,
    Read,
}

/// Propuesta de proyecto cultural
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProposal {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub discipline: String,
    pub description: String,
    pub bio: String,
    pub socials: String,
    pub has_file: bool,
    pub file_base64: Option<String>,
    pub created_at: String,
    pub status: ProposalStatus,
}

impl From<ProjectContactItem> for ProjectProposal {
    fn from(item: ProjectContactItem) -> Self {
        let has_file = item
            .proposal_has_file
            .unwrap_or_else(|| item.proposal_file_base64.is_some());
        Self {
            id: item.id,
            name: item.name,
            email: item.email,
            phone: item.phone.unwrap_or_default(),
            title: item.proposal_title.unwrap_or(item.subject),
            discipline: item.proposal_discipline.unwrap_or_default(),
            description: item.proposal_description.unwrap_or(item.message),
            bio: item.proposal_bio.unwrap_or_default(),
            socials: item.proposal_socials.unwrap_or_default(),
            has_file,
            file_base64: item.proposal_file_base64,
            created_at: item.created_at,
            status: if item.is_read {
                ProposalStatus::Read
            } else {
                ProposalStatus::New
            },
        }
    }
}
