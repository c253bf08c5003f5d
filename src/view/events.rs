//! # Normalización de la axenda
//!
//! Deriva la fecha y la hora de presentación a partir de `dateStart` con un
//! formato fijo (día, mes abreviado en galego, 24 h).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::backend::models::EventDto;
use crate::models::EventItem;
use crate::view::menu::ALL_FILTER;

/// Imagen que se pinta cuando el evento no trae ninguna
pub const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/800/600?grayscale";

/// Filtros de la axenda pública
pub const EVENT_FILTERS: [&str; 5] = ["Todos", "Concerto", "Cata", "Exposición", "[·] de encontro"];

const MONTHS_GL: [&str; 12] = [
    "XAN", "FEB", "MAR", "ABR", "MAI", "XUÑ", "XUL", "AGO", "SET", "OUT", "NOV", "DEC",
];

/// Interpreta `dateStart`: RFC 3339 con zona, o fecha y hora sin zona (UTC)
pub fn parse_date_start(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let utc = FixedOffset::east_opt(0)?;
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| utc.from_local_datetime(&naive).single())
}

/// `05 XAN`
pub fn display_date(dt: &DateTime<FixedOffset>) -> String {
    format!("{:02} {}", dt.day(), MONTHS_GL[dt.month0() as usize])
}

/// `21:30`
pub fn display_time(dt: &DateTime<FixedOffset>) -> String {
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

/// Convierte los eventos del backend descartando los que no tienen título
pub fn normalize_events(items: Vec<EventDto>) -> Vec<EventItem> {
    items
        .into_iter()
        .filter(|dto| !dto.title.trim().is_empty())
        .map(normalize_event)
        .collect()
}

fn normalize_event(dto: EventDto) -> EventItem {
    let parsed = parse_date_start(&dto.date_start);
    let date = parsed.as_ref().map(display_date).unwrap_or_default();
    let time = parsed.as_ref().map(display_time).unwrap_or_default();
    let image_url = dto.image_url.filter(|url| !url.trim().is_empty());

    EventItem {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        category: dto.category,
        date_start: dto.date_start,
        date_end: dto.date_end,
        timezone: dto.timezone,
        location_name: dto.location_name,
        // Ausente cuenta como publicado: el listado público solo trae publicados
        is_published: dto.is_published.unwrap_or(true),
        image: image_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        image_url,
        date,
        time,
    }
}

/// Eventos visibles en la web
pub fn published_events(events: &[EventItem]) -> Vec<EventItem> {
    events.iter().filter(|e| e.is_published).cloned().collect()
}

/// Filtro por categoría; `Todos` devuelve la lista completa
pub fn filter_events(events: &[EventItem], category: &str) -> Vec<EventItem> {
    if category == ALL_FILTER {
        return events.to_vec();
    }
    events
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect()
}

/// Próximos encontros: publicados, desde el inicio de `today`, por fecha
/// ascendente y como mucho `limit`.
pub fn upcoming_events(events: &[EventItem], today: NaiveDate, limit: usize) -> Vec<EventItem> {
    let mut dated: Vec<(DateTime<Utc>, &EventItem)> = events
        .iter()
        .filter(|e| e.is_published)
        .filter_map(|e| parse_date_start(&e.date_start).map(|dt| (dt, e)))
        .filter(|(dt, _)| dt.date_naive() >= today)
        .map(|(dt, e)| (dt.with_timezone(&Utc), e))
        .collect();
    dated.sort_by_key(|(dt, _)| *dt);
    dated
        .into_iter()
        .take(limit)
        .map(|(_, e)| e.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: &str, title: &str, category: &str, date_start: &str) -> EventDto {
        EventDto {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            date_start: date_start.into(),
            ..Default::default()
        }
    }

    #[test]
    fn derives_display_date_and_time() {
        let events = normalize_events(vec![dto("1", "Concerto de inverno", "Concerto", "2025-01-05T21:30:00+01:00")]);
        assert_eq!(events[0].date, "05 XAN");
        assert_eq!(events[0].time, "21:30");
    }

    #[test]
    fn naive_dates_are_accepted() {
        let events = normalize_events(vec![dto("1", "Cata", "Cata", "2025-06-14T19:00")]);
        assert_eq!(events[0].date, "14 XUÑ");
        assert_eq!(events[0].time, "19:00");
    }

    #[test]
    fn drops_untitled_and_fills_placeholder() {
        let events = normalize_events(vec![
            dto("1", "  ", "Cata", "2025-01-05T21:30:00Z"),
            dto("2", "Exposición", "Exposición", "garbage"),
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].image, PLACEHOLDER_IMAGE);
        assert_eq!(events[0].date, "");
        assert_eq!(events[0].time, "");
    }

    #[test]
    fn category_filter() {
        let events = normalize_events(vec![
            dto("1", "A", "Cata", "2025-01-05T21:30:00Z"),
            dto("2", "B", "Concerto", "2025-01-06T21:30:00Z"),
            dto("3", "C", "Cata", "2025-01-07T21:30:00Z"),
        ]);
        let catas = filter_events(&events, "Cata");
        assert_eq!(catas.len(), 2);
        assert!(catas.iter().all(|e| e.category == "Cata"));
        assert_eq!(filter_events(&events, "Todos").len(), 3);
    }

    #[test]
    fn upcoming_skips_past_and_unpublished() {
        let mut draft = dto("4", "D", "Humor", "2025-03-02T20:00:00Z");
        draft.is_published = Some(false);
        let events = normalize_events(vec![
            dto("1", "A", "Cata", "2025-02-01T20:00:00Z"),
            dto("2", "B", "Cata", "2025-03-10T20:00:00Z"),
            dto("3", "C", "Cata", "2025-03-01T20:00:00Z"),
            draft,
            dto("5", "E", "Cata", ""),
        ]);
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let upcoming = upcoming_events(&events, today, 3);
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn published_filter_hides_drafts() {
        let mut draft = dto("2", "B", "Cata", "2025-03-10T20:00:00Z");
        draft.is_published = Some(false);
        let events = normalize_events(vec![dto("1", "A", "Cata", "2025-02-01T20:00:00Z"), draft]);
        assert_eq!(published_events(&events).len(), 1);
    }
}
