//! # Web pública
//!
//! Estado de la página única: sección activa, banner de cookies, contenido
//! cargado del backend y los dos formularios públicos.

pub mod content;
pub mod proposal;
pub mod reservation;

pub use content::{LoadGuard, SiteContent};
pub use proposal::{Attachment, ProjectForm};
pub use reservation::ReservationForm;

use crate::backend::PublicApi;
use crate::models::{ProjectProposal, Reservation};
use crate::router::{History, NavigateOptions, Router, Section};
use crate::storage::{CookieBanner, KeyValueStore};

pub struct PublicSite<H: History, S: KeyValueStore> {
    pub router: Router<H>,
    pub cookies: CookieBanner<S>,
    pub content: SiteContent,
    pub reservation_form: ReservationForm,
    pub project_form: ProjectForm,
    pub reservations: Vec<Reservation>,
    pub proposals: Vec<ProjectProposal>,
    guard: LoadGuard,
}

impl<H: History, S: KeyValueStore> PublicSite<H, S> {
    pub fn new(history: H, store: S) -> Self {
        Self {
            router: Router::new(history),
            cookies: CookieBanner::new(store),
            content: SiteContent::default(),
            reservation_form: ReservationForm::new(),
            project_form: ProjectForm::new(),
            reservations: Vec::new(),
            proposals: Vec::new(),
            guard: LoadGuard::new(),
        }
    }

    /// Resuelve la sección inicial y carga el contenido público
    pub async fn mount(&mut self, api: &dyn PublicApi) -> Section {
        let section = self.router.mount();
        self.content.load(api, &self.guard).await;
        section
    }

    /// Los resultados que lleguen a partir de aquí se descartan
    pub fn unmount(&self) {
        self.guard.cancel();
    }

    /// Guarda que se puede pasar a otra tarea para desmontar durante la carga
    pub fn guard(&self) -> LoadGuard {
        self.guard.clone()
    }

    pub fn navigate(&mut self, section: Section) {
        self.router.navigate(section, NavigateOptions::default());
    }

    /// Salir del panel vuelve a portada
    pub fn exit_admin(&mut self) {
        self.navigate(Section::Home);
    }

    pub async fn refresh_availability(&mut self, api: &dyn PublicApi) {
        let enabled = self.content.config.reservations_enabled;
        self.reservation_form.refresh_availability(api, enabled).await;
    }

    pub async fn submit_reservation(&mut self, api: &dyn PublicApi) -> bool {
        let enabled = self.content.config.reservations_enabled;
        self.reservation_form
            .submit(api, enabled, &mut self.reservations)
            .await
    }

    pub async fn submit_proposal(&mut self, api: &dyn PublicApi) -> Option<ProjectProposal> {
        self.project_form
            .submit_proposal(api, &mut self.proposals, chrono::Utc::now())
            .await
    }
}
