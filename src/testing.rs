//! Backend en memoria para los tests: implementa los dos traits del cliente,
//! aplica las mutaciones sobre su propio estado y apunta cada llamada.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::backend::models::*;
use crate::backend::{AdminApi, ApiError, ApiResult, BasicAuth, PublicApi};

#[derive(Debug, Default)]
pub struct StubState {
    /// Credenciales aceptadas por `/admin/*`
    pub valid_auth: Option<BasicAuth>,
    /// Todas las llamadas fallan (backend caído)
    pub offline: bool,
    /// Solo fallan las llamadas que modifican datos
    pub fail_mutations: bool,
    /// `get_events` no responde nunca
    pub hang_events: bool,
    pub menu: MenuResponse,
    pub food_categories: Vec<MenuCategoryNode>,
    pub wine_categories: Vec<MenuCategoryNode>,
    pub admin_categories: Vec<MenuCategoryNode>,
    pub config: Vec<ConfigEntry>,
    pub events: Vec<EventDto>,
    pub contacts: Vec<ProjectContactItem>,
    pub slots: Vec<AvailabilitySlot>,
    pub schedule: serde_json::Value,
    pub reservations: Vec<NewReservation>,
    pub cancelled: Vec<String>,
    pub proposals: Vec<ProjectContactPayload>,
    pub menu_patches: Vec<(String, MenuItemPatch)>,
    pub schedule_days: Vec<ScheduleDay>,
    pub windows: Vec<ServiceWindow>,
    pub calls: Vec<String>,
    next_id: u32,
}

impl StubState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Debug, Default)]
pub struct StubBackend {
    state: Mutex<StubState>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin(username: &str, password: &str) -> Self {
        let stub = Self::new();
        stub.state().valid_auth = Some(BasicAuth::new(username, password));
        stub
    }

    pub fn state(&self) -> MutexGuard<'_, StubState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|c| c.as_str() == name).count()
    }

    fn read(&self, name: &str) -> ApiResult<MutexGuard<'_, StubState>> {
        let mut state = self.state();
        state.calls.push(name.to_string());
        if state.offline {
            return Err(ApiError::status(502, ""));
        }
        Ok(state)
    }

    fn write(&self, name: &str) -> ApiResult<MutexGuard<'_, StubState>> {
        let state = self.read(name)?;
        if state.fail_mutations {
            return Err(ApiError::status(500, "Internal Server Error"));
        }
        Ok(state)
    }

    fn admin_read(&self, name: &str, auth: &BasicAuth) -> ApiResult<MutexGuard<'_, StubState>> {
        let state = self.read(name)?;
        if state.valid_auth.as_ref() != Some(auth) {
            return Err(ApiError::status(401, "Unauthorized"));
        }
        Ok(state)
    }

    fn admin_write(&self, name: &str, auth: &BasicAuth) -> ApiResult<MutexGuard<'_, StubState>> {
        let state = self.admin_read(name, auth)?;
        if state.fail_mutations {
            return Err(ApiError::status(500, "Internal Server Error"));
        }
        Ok(state)
    }
}

pub fn food_dto(id: &str, name: &str, category: &str, price: f64, active: bool) -> FoodDto {
    FoodDto {
        id: id.into(),
        name: name.into(),
        category: Some(category.into()),
        price: Some(price),
        is_active: Some(active),
        ..Default::default()
    }
}

pub fn wine_dto(id: &str, name: &str, category: &str, bottle: Option<f64>) -> WineDto {
    WineDto {
        id: id.into(),
        name: name.into(),
        category: Some(category.into()),
        bottle_price: bottle,
        is_active: Some(true),
        ..Default::default()
    }
}

pub fn event_dto(id: &str, title: &str, category: &str, date_start: &str, published: bool) -> EventDto {
    EventDto {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        date_start: date_start.into(),
        is_published: Some(published),
        ..Default::default()
    }
}

#[async_trait]
impl PublicApi for StubBackend {
    async fn get_menu(&self) -> ApiResult<MenuResponse> {
        Ok(self.read("get_menu")?.menu.clone())
    }

    async fn get_menu_categories(&self, kind: CategoryKind) -> ApiResult<Vec<MenuCategoryNode>> {
        let state = self.read("get_menu_categories")?;
        Ok(match kind {
            CategoryKind::Cocina => state.food_categories.clone(),
            CategoryKind::Vino | CategoryKind::Adega => state.wine_categories.clone(),
        })
    }

    async fn get_config(&self) -> ApiResult<Vec<ConfigEntry>> {
        Ok(self.read("get_config")?.config.clone())
    }

    async fn get_events(&self) -> ApiResult<Vec<EventDto>> {
        let hang = self.state().hang_events;
        if hang {
            return std::future::pending().await;
        }
        let state = self.read("get_events")?;
        Ok(state
            .events
            .iter()
            .filter(|e| e.is_published.unwrap_or(true))
            .cloned()
            .collect())
    }

    async fn get_schedule(&self, _from: Option<&str>, _to: Option<&str>) -> ApiResult<serde_json::Value> {
        Ok(self.read("get_schedule")?.schedule.clone())
    }

    async fn get_availability(&self, date: &str, party_size: u32) -> ApiResult<AvailabilityResponse> {
        let state = self.read("get_availability")?;
        Ok(AvailabilityResponse {
            date: date.to_string(),
            party_size,
            timezone: Some("Europe/Madrid".into()),
            slots: state.slots.clone(),
        })
    }

    async fn create_reservation(&self, payload: &NewReservation) -> ApiResult<ReservationOut> {
        let mut state = self.write("create_reservation")?;
        state.reservations.push(payload.clone());
        let id = state.next_id("res");
        Ok(ReservationOut {
            id,
            status: BackendReservationStatus::Pending,
            date: payload.date.clone(),
            time: payload.time.clone(),
            party_size: payload.party_size,
            customer: Customer {
                name: payload.customer.name.clone(),
                phone: None,
                email: payload.customer.email.clone(),
            },
            notes: payload.notes.clone(),
            created_at: "2025-03-01T12:00:00Z".into(),
        })
    }

    async fn cancel_reservation(&self, id: &str, _reason: Option<&str>) -> ApiResult<()> {
        self.write("cancel_reservation")?.cancelled.push(id.to_string());
        Ok(())
    }

    async fn contact_projects(&self, payload: &ProjectContactPayload) -> ApiResult<ProjectContactReceipt> {
        let mut state = self.write("contact_projects")?;
        state.proposals.push(payload.clone());
        let id = state.next_id("contact");
        Ok(ProjectContactReceipt {
            id,
            status: "RECEIVED".into(),
        })
    }
}

#[async_trait]
impl AdminApi for StubBackend {
    async fn list_config(&self, auth: &BasicAuth) -> ApiResult<Vec<ConfigEntry>> {
        Ok(self.admin_read("list_config", auth)?.config.clone())
    }

    async fn set_config(&self, auth: &BasicAuth, key: &str, value: &str) -> ApiResult<()> {
        let mut state = self.admin_write("set_config", auth)?;
        match state.config.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value.to_string(),
            None => state.config.push(ConfigEntry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    async fn create_food(&self, auth: &BasicAuth, payload: &NewFood) -> ApiResult<()> {
        let mut state = self.admin_write("create_food", auth)?;
        let id = state.next_id("food");
        state.menu.food.push(FoodDto {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            category: payload.category.clone(),
            price: payload.price,
            tags: None,
            is_active: payload.is_active,
            image_url: payload.image_url.clone(),
        });
        Ok(())
    }

    async fn create_wine(&self, auth: &BasicAuth, payload: &NewWine) -> ApiResult<()> {
        let mut state = self.admin_write("create_wine", auth)?;
        let id = state.next_id("wine");
        state.menu.wines.push(WineDto {
            id,
            name: payload.name.clone(),
            description: payload.description.clone(),
            category: payload.category.clone(),
            region: payload.region.clone(),
            wine_type: payload.wine_type.clone(),
            grapes: payload.grapes.clone(),
            glass_price: payload.glass_price,
            bottle_price: payload.bottle_price,
            is_active: payload.is_active,
            image_url: payload.image_url.clone(),
        });
        Ok(())
    }

    async fn update_menu_item(&self, auth: &BasicAuth, id: &str, patch: &MenuItemPatch) -> ApiResult<()> {
        let mut state = self.admin_write("update_menu_item", auth)?;
        state.menu_patches.push((id.to_string(), patch.clone()));
        if let Some(food) = state.menu.food.iter_mut().find(|f| f.id == id) {
            if let Some(name) = &patch.name {
                food.name = name.clone();
            }
            if patch.price.is_some() {
                food.price = patch.price;
            }
            if patch.is_active.is_some() {
                food.is_active = patch.is_active;
            }
        }
        if let Some(wine) = state.menu.wines.iter_mut().find(|w| w.id == id) {
            if let Some(name) = &patch.name {
                wine.name = name.clone();
            }
            if patch.bottle_price.is_some() {
                wine.bottle_price = patch.bottle_price;
            }
            if patch.is_active.is_some() {
                wine.is_active = patch.is_active;
            }
        }
        Ok(())
    }

    async fn delete_menu_item(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        let mut state = self.admin_write("delete_menu_item", auth)?;
        state.menu.food.retain(|f| f.id != id);
        state.menu.wines.retain(|w| w.id != id);
        Ok(())
    }

    async fn list_menu_categories(&self, auth: &BasicAuth) -> ApiResult<Vec<MenuCategoryNode>> {
        Ok(self
            .admin_read("list_menu_categories", auth)?
            .admin_categories
            .clone())
    }

    async fn create_menu_category(&self, auth: &BasicAuth, payload: &NewMenuCategory) -> ApiResult<()> {
        let mut state = self.admin_write("create_menu_category", auth)?;
        let id = state.admin_categories.len() as i64 + 1;
        state.admin_categories.push(MenuCategoryNode {
            id: Some(id),
            category: payload.category.clone(),
            subcategory: payload.subcategory.clone(),
            orden: payload.orden,
            children: Vec::new(),
        });
        Ok(())
    }

    async fn delete_menu_category(&self, auth: &BasicAuth, id: i64) -> ApiResult<()> {
        let mut state = self.admin_write("delete_menu_category", auth)?;
        state.admin_categories.retain(|node| node.id != Some(id));
        Ok(())
    }

    async fn list_events(&self, auth: &BasicAuth) -> ApiResult<Vec<EventDto>> {
        Ok(self.admin_read("list_events", auth)?.events.clone())
    }

    async fn create_event(&self, auth: &BasicAuth, payload: &EventPayload) -> ApiResult<()> {
        let mut state = self.admin_write("create_event", auth)?;
        let id = state.next_id("event");
        state.events.push(EventDto {
            id,
            title: payload.title.clone(),
            date_start: payload.date_start.clone(),
            date_end: payload.date_end.clone(),
            timezone: Some(payload.timezone.clone()),
            description: payload.description.clone(),
            category: payload.category.clone(),
            image_url: Some(payload.image_url.clone()).filter(|url| !url.is_empty()),
            location_name: payload.location_name.clone(),
            is_published: Some(payload.is_published),
            created_at: None,
            updated_at: None,
        });
        Ok(())
    }

    async fn update_event(&self, auth: &BasicAuth, id: &str, payload: &EventPayload) -> ApiResult<()> {
        let mut state = self.admin_write("update_event", auth)?;
        if let Some(event) = state.events.iter_mut().find(|e| e.id == id) {
            event.title = payload.title.clone();
            event.date_start = payload.date_start.clone();
            event.description = payload.description.clone();
            event.category = payload.category.clone();
        }
        Ok(())
    }

    async fn delete_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        self.admin_write("delete_event", auth)?
            .events
            .retain(|e| e.id != id);
        Ok(())
    }

    async fn publish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        let mut state = self.admin_write("publish_event", auth)?;
        if let Some(event) = state.events.iter_mut().find(|e| e.id == id) {
            event.is_published = Some(true);
        }
        Ok(())
    }

    async fn unpublish_event(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        let mut state = self.admin_write("unpublish_event", auth)?;
        if let Some(event) = state.events.iter_mut().find(|e| e.id == id) {
            event.is_published = Some(false);
        }
        Ok(())
    }

    async fn list_project_contacts(
        &self,
        auth: &BasicAuth,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<ProjectContactItem>> {
        let state = self.admin_read("list_project_contacts", auth)?;
        Ok(state
            .contacts
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn project_contact_stats(&self, auth: &BasicAuth) -> ApiResult<ProjectContactStats> {
        let state = self.admin_read("project_contact_stats", auth)?;
        Ok(ProjectContactStats {
            total: state.contacts.len() as u32,
            unread: state.contacts.iter().filter(|c| !c.is_read).count() as u32,
        })
    }

    async fn mark_project_contact_read(&self, auth: &BasicAuth, id: &str) -> ApiResult<()> {
        let mut state = self.admin_write("mark_project_contact_read", auth)?;
        if let Some(contact) = state.contacts.iter_mut().find(|c| c.id == id) {
            contact.is_read = true;
        }
        Ok(())
    }

    async fn upsert_schedule_day(&self, auth: &BasicAuth, day: &ScheduleDay) -> ApiResult<()> {
        let mut state = self.admin_write("upsert_schedule_day", auth)?;
        state.schedule_days.push(day.clone());
        let days = state.schedule_days.len();
        state.schedule = serde_json::json!({ "days": days });
        Ok(())
    }

    async fn add_service_window(&self, auth: &BasicAuth, window: &ServiceWindow) -> ApiResult<()> {
        self.admin_write("add_service_window", auth)?
            .windows
            .push(window.clone());
        Ok(())
    }
}
