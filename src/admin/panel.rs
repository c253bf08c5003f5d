//! # Panel de administración
//!
//! Cada acción es un par petición/recarga: se envía la mutación y, si sale
//! bien, se vuelve a pedir el listado entero y se sustituye el local. Si la
//! mutación falla se registra, el listado no cambia y el formulario se queda
//! relleno para reintentar a mano.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use super::forms::{CategoryForm, ConfigForm, EventForm, MenuItemForm, ScheduleForm};
use super::session::{AdminSession, DEFAULT_USERNAME};
use super::stats::{unique_customers, DashboardStats};
use crate::api::middleware::ErrorLogExt;
use crate::backend::models::{ConfigEntry, MenuCategoryNode, MenuItemPatch, ProjectContactStats};
use crate::backend::{AdminApi, BasicAuth, PublicApi};
use crate::models::{EventItem, MenuItem, MenuKind, ProjectProposal, ProposalStatus, Reservation, ReservationStatus};
use crate::view::menu::{admin_menu_rows, AdminMenuRow};
use crate::view::{normalize_events, normalize_menu};

/// Tamaño de página del listado de propuestas
pub const PROPOSALS_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Dashboard,
    Reservations,
    Customers,
    Menu,
    Categories,
    Events,
    Proposals,
    Config,
    Schedule,
}

pub struct AdminPanel {
    admin: Arc<dyn AdminApi>,
    public: Arc<dyn PublicApi>,
    pub session: AdminSession,
    pub username: String,
    pub password: String,
    pub tab: AdminTab,
    pub menu_kind: MenuKind,
    pub food_menu: Vec<MenuItem>,
    pub wine_menu: Vec<MenuItem>,
    pub categories: Vec<MenuCategoryNode>,
    pub events: Vec<EventItem>,
    pub proposals: Vec<ProjectProposal>,
    pub proposal_stats: Option<ProjectContactStats>,
    pub config: Vec<ConfigEntry>,
    pub schedule: serde_json::Value,
    pub menu_form: MenuItemForm,
    pub event_form: EventForm,
    pub category_form: CategoryForm,
    pub config_form: ConfigForm,
    pub schedule_form: ScheduleForm,
}

impl fmt::Debug for AdminPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminPanel")
            .field("session", &self.session)
            .field("tab", &self.tab)
            .field("menu_kind", &self.menu_kind)
            .finish_non_exhaustive()
    }
}

impl AdminPanel {
    pub fn new(admin: Arc<dyn AdminApi>, public: Arc<dyn PublicApi>) -> Self {
        Self {
            admin,
            public,
            session: AdminSession::new(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            tab: AdminTab::default(),
            menu_kind: MenuKind::Food,
            food_menu: Vec::new(),
            wine_menu: Vec::new(),
            categories: Vec::new(),
            events: Vec::new(),
            proposals: Vec::new(),
            proposal_stats: None,
            config: Vec::new(),
            schedule: serde_json::Value::Null,
            menu_form: MenuItemForm::default(),
            event_form: EventForm::default(),
            category_form: CategoryForm::default(),
            config_form: ConfigForm::default(),
            schedule_form: ScheduleForm::default(),
        }
    }

    fn auth(&self) -> Option<BasicAuth> {
        self.session.auth().cloned()
    }

    // -----------------------------------------------------------------------
    // Sesión y pestañas
    // -----------------------------------------------------------------------

    /// Entra con el usuario y la contraseña del formulario y, si va bien,
    /// carga los eventos.
    pub async fn login(&mut self) -> bool {
        let (username, password) = (self.username.clone(), self.password.clone());
        if !self.session.login(self.admin.as_ref(), &username, &password).await {
            return false;
        }
        self.refresh_events().await;
        true
    }

    pub fn exit(&mut self) {
        self.session.exit();
        self.password.clear();
        self.reset_forms();
        self.tab = AdminTab::default();
    }

    pub fn reset_forms(&mut self) {
        self.menu_form.reset();
        self.event_form.reset();
        self.category_form.reset();
        self.config_form.reset();
        self.schedule_form.reset();
    }

    /// Cambia de pestaña, descarta lo que hubiera a medio escribir y carga
    /// solo el listado de la nueva.
    pub async fn switch_tab(&mut self, tab: AdminTab) {
        self.reset_forms();
        self.tab = tab;
        tracing::debug!(tab = ?tab, "Pestaña del panel");
        match tab {
            AdminTab::Menu => self.refresh_menu().await,
            AdminTab::Categories => self.refresh_categories().await,
            AdminTab::Events => self.refresh_events().await,
            AdminTab::Proposals => self.refresh_proposals().await,
            AdminTab::Config => self.refresh_config().await,
            AdminTab::Schedule => self.refresh_schedule().await,
            AdminTab::Dashboard | AdminTab::Reservations | AdminTab::Customers => {}
        }
    }

    // -----------------------------------------------------------------------
    // Recargas
    // -----------------------------------------------------------------------

    pub async fn refresh_menu(&mut self) {
        if let Some(menu) = self.public.get_menu().await.ignore_error("refreshing menu") {
            let menu = normalize_menu(menu);
            self.food_menu = menu.food;
            self.wine_menu = menu.wines;
        }
    }

    pub async fn refresh_categories(&mut self) {
        let Some(auth) = self.auth() else { return };
        if let Some(categories) = self
            .admin
            .list_menu_categories(&auth)
            .await
            .ignore_error("refreshing menu categories")
        {
            self.categories = categories;
        }
    }

    pub async fn refresh_events(&mut self) {
        let Some(auth) = self.auth() else { return };
        if let Some(events) = self.admin.list_events(&auth).await.ignore_error("refreshing events") {
            self.events = normalize_events(events);
        }
    }

    pub async fn refresh_config(&mut self) {
        let Some(auth) = self.auth() else { return };
        if let Some(config) = self.admin.list_config(&auth).await.ignore_error("refreshing config") {
            self.config = config;
        }
    }

    pub async fn refresh_proposals(&mut self) {
        let Some(auth) = self.auth() else { return };
        let (items, stats) = tokio::join!(
            self.admin.list_project_contacts(&auth, PROPOSALS_PAGE, 0),
            self.admin.project_contact_stats(&auth),
        );
        if let Some(items) = items.ignore_error("refreshing project contacts") {
            self.proposals = items.into_iter().map(ProjectProposal::from).collect();
        }
        if let Some(stats) = stats.ignore_error("refreshing project contact stats") {
            self.proposal_stats = Some(stats);
        }
    }

    pub async fn refresh_schedule(&mut self) {
        if let Some(schedule) = self
            .public
            .get_schedule(None, None)
            .await
            .ignore_error("refreshing schedule")
        {
            self.schedule = schedule;
        }
    }

    // -----------------------------------------------------------------------
    // Carta
    // -----------------------------------------------------------------------

    fn menu_list(&self) -> &[MenuItem] {
        match self.menu_kind {
            MenuKind::Food => &self.food_menu,
            MenuKind::Wine => &self.wine_menu,
        }
    }

    fn menu_item_id(&self, index: usize) -> Option<String> {
        self.menu_list().get(index).and_then(|item| item.id.clone())
    }

    /// Cociña / Adega
    pub fn set_menu_kind(&mut self, kind: MenuKind) {
        self.menu_kind = kind;
        self.menu_form.reset();
    }

    pub fn menu_rows(&self) -> Vec<AdminMenuRow> {
        admin_menu_rows(self.menu_list())
    }

    pub fn edit_menu_item(&mut self, index: usize) {
        if let Some(item) = self.menu_list().get(index).cloned() {
            self.menu_form.load(index, &item);
        }
    }

    /// Alta (o modificación si se está editando) del elemento del formulario
    pub async fn save_menu_item(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let kind = self.menu_kind;

        let result = match self.menu_form.editing {
            Some(index) => {
                let (Some(id), Some(patch)) = (self.menu_item_id(index), self.menu_form.patch(kind)) else {
                    tracing::debug!(index, "Formulario de carta incompleto");
                    return false;
                };
                self.admin.update_menu_item(&auth, &id, &patch).await
            }
            None => match kind {
                MenuKind::Food => match self.menu_form.new_food() {
                    Some(food) => self.admin.create_food(&auth, &food).await,
                    None => return false,
                },
                MenuKind::Wine => match self.menu_form.new_wine() {
                    Some(wine) => self.admin.create_wine(&auth, &wine).await,
                    None => return false,
                },
            },
        };

        if result.ignore_error("saving menu item").is_none() {
            return false;
        }
        self.refresh_menu().await;
        self.menu_form.reset();
        true
    }

    pub async fn toggle_availability(&mut self, index: usize) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(item) = self.menu_list().get(index).cloned() else { return false };
        let Some(id) = item.id else { return false };

        let patch = MenuItemPatch {
            is_active: Some(!item.available),
            ..MenuItemPatch::default()
        };
        if self
            .admin
            .update_menu_item(&auth, &id, &patch)
            .await
            .ignore_error("toggling menu item availability")
            .is_none()
        {
            return false;
        }
        self.refresh_menu().await;
        true
    }

    pub async fn delete_menu_item(&mut self, index: usize) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(id) = self.menu_item_id(index) else { return false };

        if self
            .admin
            .delete_menu_item(&auth, &id)
            .await
            .ignore_error("deleting menu item")
            .is_none()
        {
            return false;
        }
        if self.menu_form.editing == Some(index) {
            self.menu_form.reset();
        }
        self.refresh_menu().await;
        true
    }

    // -----------------------------------------------------------------------
    // Categorías
    // -----------------------------------------------------------------------

    pub async fn create_category(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(payload) = self.category_form.payload() else { return false };

        if self
            .admin
            .create_menu_category(&auth, &payload)
            .await
            .ignore_error("creating menu category")
            .is_none()
        {
            return false;
        }
        self.category_form.reset();
        self.refresh_categories().await;
        true
    }

    pub async fn delete_category(&mut self, id: i64) -> bool {
        let Some(auth) = self.auth() else { return false };
        if self
            .admin
            .delete_menu_category(&auth, id)
            .await
            .ignore_error("deleting menu category")
            .is_none()
        {
            return false;
        }
        self.refresh_categories().await;
        true
    }

    // -----------------------------------------------------------------------
    // Eventos
    // -----------------------------------------------------------------------

    pub fn edit_event(&mut self, id: &str) {
        if let Some(event) = self.events.iter().find(|e| e.id == id).cloned() {
            self.event_form.load(&event);
        }
    }

    pub async fn save_event(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(payload) = self.event_form.payload() else { return false };

        let result = match &self.event_form.editing {
            Some(id) => self.admin.update_event(&auth, id, &payload).await,
            None => self.admin.create_event(&auth, &payload).await,
        };
        if result.ignore_error("saving event").is_none() {
            return false;
        }
        self.refresh_events().await;
        self.event_form.reset();
        true
    }

    pub async fn delete_event(&mut self, id: &str) -> bool {
        let Some(auth) = self.auth() else { return false };
        if self
            .admin
            .delete_event(&auth, id)
            .await
            .ignore_error("deleting event")
            .is_none()
        {
            return false;
        }
        self.refresh_events().await;
        if self.event_form.editing.as_deref() == Some(id) {
            self.event_form.reset();
        }
        true
    }

    pub async fn set_published(&mut self, id: &str, published: bool) -> bool {
        let Some(auth) = self.auth() else { return false };
        let result = if published {
            self.admin.publish_event(&auth, id).await
        } else {
            self.admin.unpublish_event(&auth, id).await
        };
        if result.ignore_error("toggling event publication").is_none() {
            return false;
        }
        self.refresh_events().await;
        true
    }

    // -----------------------------------------------------------------------
    // Configuración
    // -----------------------------------------------------------------------

    pub fn edit_config(&mut self, key: &str) {
        if let Some(entry) = self.config.iter().find(|e| e.key == key) {
            self.config_form.key = entry.key.clone();
            self.config_form.value = entry.value.clone();
        }
    }

    pub async fn save_config(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some((key, value)) = self.config_form.entry() else { return false };

        if self
            .admin
            .set_config(&auth, &key, &value)
            .await
            .ignore_error("saving config")
            .is_none()
        {
            return false;
        }
        self.config_form.reset();
        self.refresh_config().await;
        true
    }

    // -----------------------------------------------------------------------
    // Propuestas
    // -----------------------------------------------------------------------

    pub async fn mark_proposal_read(&mut self, id: &str) -> bool {
        let Some(auth) = self.auth() else { return false };
        if self
            .admin
            .mark_project_contact_read(&auth, id)
            .await
            .ignore_error("marking project contact as read")
            .is_none()
        {
            return false;
        }
        self.refresh_proposals().await;
        true
    }

    /// El backend no tiene borrado de propuestas: solo desaparece del listado
    pub fn delete_proposal(&mut self, id: &str) {
        self.proposals.retain(|p| p.id != id);
    }

    pub fn new_proposals(&self) -> usize {
        self.proposals
            .iter()
            .filter(|p| p.status == ProposalStatus::New)
            .count()
    }

    // -----------------------------------------------------------------------
    // Horario
    // -----------------------------------------------------------------------

    pub async fn save_schedule_day(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(day) = self.schedule_form.day() else { return false };

        if self
            .admin
            .upsert_schedule_day(&auth, &day)
            .await
            .ignore_error("saving schedule day")
            .is_none()
        {
            return false;
        }
        self.schedule_form.reset();
        self.refresh_schedule().await;
        true
    }

    pub async fn add_service_window(&mut self) -> bool {
        let Some(auth) = self.auth() else { return false };
        let Some(window) = self.schedule_form.window() else { return false };

        if self
            .admin
            .add_service_window(&auth, &window)
            .await
            .ignore_error("adding service window")
            .is_none()
        {
            return false;
        }
        self.schedule_form.reset();
        self.refresh_schedule().await;
        true
    }

    // -----------------------------------------------------------------------
    // Reservas
    // -----------------------------------------------------------------------

    /// Aceptar es local; rechazar pasa por la cancelación del backend y, si
    /// falla, la reserva no cambia.
    pub async fn update_reservation_status(
        &self,
        reservations: &mut [Reservation],
        id: &str,
        status: ReservationStatus,
    ) -> bool {
        let Some(reservation) = reservations.iter_mut().find(|r| r.id == id) else {
            return false;
        };

        if status == ReservationStatus::Cancelled
            && self
                .public
                .cancel_reservation(id, None)
                .await
                .ignore_error("cancelling reservation")
                .is_none()
        {
            return false;
        }

        tracing::info!(id = %id, status = ?status, "Estado de reserva actualizado");
        reservation.status = status;
        true
    }

    pub fn dashboard(&self, reservations: &[Reservation], today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(reservations, &self.proposals, today)
    }

    pub fn customers(&self, reservations: &[Reservation]) -> Vec<Reservation> {
        unique_customers(reservations)
    }
}
