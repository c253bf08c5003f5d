//! # Vistas JSON de la web pública
//!
//! Cada vista pide al backend lo que necesita y devuelve el modelo ya
//! normalizado, listo para pintar.

use actix_web::{get, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::middleware::ErrorLogExt;
use super::{AppError, AppResult, ResultExt};
use crate::backend::models::CategoryKind;
use crate::backend::PublicApi;
use crate::models::{EventItem, MenuKind};
use crate::site::content::UPCOMING_LIMIT;
use crate::view::events::{published_events, EVENT_FILTERS};
use crate::view::menu::{category_filters, MenuGroup, ALL_FILTER};
use crate::view::{filter_events, flatten_category_order, normalize_events, normalize_menu, public_menu, upcoming_events, SiteConfig};

#[derive(Deserialize)]
struct MenuQuery {
    kind: Option<MenuKind>,
    filter: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuView {
    kind: MenuKind,
    filters: Vec<String>,
    groups: Vec<MenuGroup>,
}

/// Carta pública agrupada por categoría
///
/// - `kind`: `food` (por defecto) o `wine`
/// - `filter`: categoría de vino; `Todos` o ausente muestra todas
///
/// Si falla el orden de categorías se usa orden alfabético.
#[get("/view/menu")]
async fn menu_view(api: web::Data<dyn PublicApi>, query: web::Query<MenuQuery>) -> AppResult<impl Responder> {
    let kind = query.kind.unwrap_or(MenuKind::Food);
    let category_kind = match kind {
        MenuKind::Food => CategoryKind::Cocina,
        MenuKind::Wine => CategoryKind::Adega,
    };

    let (menu, categories) = tokio::join!(api.get_menu(), api.get_menu_categories(category_kind));
    let menu = normalize_menu(menu?);
    let order = categories
        .ignore_error("loading menu categories")
        .map(|nodes| flatten_category_order(&nodes))
        .unwrap_or_default();

    let items = match kind {
        MenuKind::Food => menu.food,
        MenuKind::Wine => menu.wines,
    };
    let filter = query.filter.as_deref().unwrap_or(ALL_FILTER);

    Ok(HttpResponse::Ok().json(MenuView {
        kind,
        filters: category_filters(&items, &order),
        groups: public_menu(&items, &order, filter),
    }))
}

#[derive(Deserialize)]
struct EventsQuery {
    category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventsView {
    filters: Vec<&'static str>,
    events: Vec<EventItem>,
}

/// Axenda publicada, filtrada por categoría
#[get("/view/events")]
async fn events_view(api: web::Data<dyn PublicApi>, query: web::Query<EventsQuery>) -> AppResult<impl Responder> {
    let events = published_events(&normalize_events(api.get_events().await?));
    let category = query.category.as_deref().unwrap_or(ALL_FILTER);

    Ok(HttpResponse::Ok().json(EventsView {
        filters: EVENT_FILTERS.to_vec(),
        events: filter_events(&events, category),
    }))
}

/// Próximos eventos desde hoy
#[get("/view/events/upcoming")]
async fn upcoming_view(api: web::Data<dyn PublicApi>) -> AppResult<impl Responder> {
    let events = normalize_events(api.get_events().await?);
    let today = Utc::now().date_naive();
    Ok(HttpResponse::Ok().json(upcoming_events(&events, today, UPCOMING_LIMIT)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView {
    #[serde(flatten)]
    config: SiteConfig,
    schedule_lines: Vec<String>,
}

/// Configuración pública; sin backend se sirven los valores por defecto
#[get("/view/config")]
async fn config_view(api: web::Data<dyn PublicApi>) -> impl Responder {
    let config = api
        .get_config()
        .await
        .ignore_error("loading public config")
        .map(|entries| SiteConfig::from_entries(&entries))
        .unwrap_or_default();

    HttpResponse::Ok().json(ConfigView {
        schedule_lines: config.schedule_lines(),
        config,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityQuery {
    date: String,
    party_size: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityView {
    date: String,
    party_size: u32,
    times: Vec<String>,
}

/// Horas libres para una fecha y número de comensales
///
/// # Errores
/// - `400 Bad Request`: fecha inválida o `partySize` igual a 0
/// - `502 Bad Gateway`: el backend no responde
#[get("/view/availability")]
async fn availability_view(
    api: web::Data<dyn PublicApi>,
    query: web::Query<AvailabilityQuery>,
) -> AppResult<impl Responder> {
    let date = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d").map_err_validation("date")?;
    let party_size = query.party_size.unwrap_or(crate::site::reservation::DEFAULT_GUESTS);
    if party_size == 0 {
        return Err(AppError::validation_field("partySize", "debe ser mayor que 0"));
    }

    let date = date.format("%Y-%m-%d").to_string();
    let res = api.get_availability(&date, party_size).await?;
    let times = res
        .slots
        .into_iter()
        .filter(|slot| slot.available)
        .map(|slot| slot.time)
        .collect();

    Ok(HttpResponse::Ok().json(AvailabilityView {
        date,
        party_size,
        times,
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(menu_view);
    cfg.service(events_view);
    cfg.service(upcoming_view);
    cfg.service(config_view);
    cfg.service(availability_view);
}
