//! # Formulario de reservas
//!
//! Los huecos libres dependen de fecha y comensales; cada cambio de cualquiera
//! de los dos vuelve a pedir disponibilidad al backend.

use std::time::Duration;

use serde::Serialize;

use crate::api::middleware::ErrorLogExt;
use crate::backend::models::{Customer, NewReservation};
use crate::backend::PublicApi;
use crate::models::Reservation;

/// Tiempo que se muestra el aviso de reserva enviada antes de limpiar el formulario
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(5);

pub const DEFAULT_GUESTS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub observations: String,
    pub success: bool,
    pub available_times: Vec<String>,
    pub loading_availability: bool,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            guests: DEFAULT_GUESTS,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            observations: String::new(),
            success: false,
            available_times: Vec::new(),
            loading_availability: false,
        }
    }
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recalcula las horas disponibles para la fecha y comensales actuales.
    ///
    /// Sin reservas activas o sin fecha no hay horas y se borra la elegida.
    /// Un fallo del backend deja la lista vacía.
    pub async fn refresh_availability(&mut self, api: &dyn PublicApi, enabled: bool) {
        if !enabled || self.date.is_empty() {
            self.available_times.clear();
            self.time.clear();
            return;
        }

        self.loading_availability = true;
        self.available_times = match api
            .get_availability(&self.date, self.guests)
            .await
            .ignore_error("loading availability")
        {
            Some(res) => res
                .slots
                .into_iter()
                .filter(|slot| slot.available)
                .map(|slot| slot.time)
                .collect(),
            None => Vec::new(),
        };
        self.loading_availability = false;
    }

    fn payload(&self) -> NewReservation {
        NewReservation {
            date: self.date.clone(),
            time: self.time.clone(),
            party_size: self.guests,
            customer: Customer {
                name: self.name.clone(),
                phone: Some(self.phone.clone()),
                email: Some(self.email.clone()),
            },
            notes: Some(self.observations.clone()),
        }
    }

    /// Envía la reserva.
    ///
    /// Si sale bien, la nueva reserva (pendiente) se pone la primera de
    /// `reservations` y se marca `success`; si falla, el formulario se queda
    /// como estaba. Devuelve si se creó.
    pub async fn submit(
        &mut self,
        api: &dyn PublicApi,
        enabled: bool,
        reservations: &mut Vec<Reservation>,
    ) -> bool {
        if !enabled {
            return false;
        }

        match api
            .create_reservation(&self.payload())
            .await
            .ignore_error("creating reservation")
        {
            Some(out) => {
                let reservation = Reservation::from_created(out, &self.email, &self.phone);
                tracing::info!(id = %reservation.id, date = %reservation.date, time = %reservation.time, "Reserva creada");
                reservations.insert(0, reservation);
                self.success = true;
                true
            }
            None => {
                self.success = false;
                false
            }
        }
    }

    /// Espera el retardo fijo y limpia el aviso y los datos del cliente.
    /// Los comensales se conservan.
    pub async fn settle(&mut self) {
        tokio::time::sleep(SUCCESS_RESET_DELAY).await;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.success = false;
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.observations.clear();
        self.date.clear();
        self.time.clear();
    }
}
