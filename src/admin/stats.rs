//! Cifras del panel principal y listado de clientes.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{ProjectProposal, ProposalStatus, Reservation, ReservationStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Reservas confirmadas para hoy
    pub today_confirmed: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub new_proposals: usize,
}

impl DashboardStats {
    pub fn compute(reservations: &[Reservation], proposals: &[ProjectProposal], today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();
        let count = |status: ReservationStatus| reservations.iter().filter(|r| r.status == status).count();

        Self {
            today_confirmed: reservations
                .iter()
                .filter(|r| r.date == today && r.status == ReservationStatus::Confirmed)
                .count(),
            pending: count(ReservationStatus::Pending),
            confirmed: count(ReservationStatus::Confirmed),
            new_proposals: proposals
                .iter()
                .filter(|p| p.status == ProposalStatus::New)
                .count(),
        }
    }
}

/// Una fila por email: la primera reserva de cada cliente
pub fn unique_customers(reservations: &[Reservation]) -> Vec<Reservation> {
    let mut seen = HashSet::new();
    reservations
        .iter()
        .filter(|r| seen.insert(r.email.as_str()))
        .cloned()
        .collect()
}
