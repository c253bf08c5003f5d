//! # Normalización y presentación de la carta
//!
//! Funciones puras: reciben los DTO del backend y devuelven lo que pinta la
//! carta pública o el panel. Un campo ausente o mal formado cae a un valor
//! seguro en lugar de fallar.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::backend::models::{FoodDto, MenuResponse, WineDto};
use crate::models::{MenuItem, MenuKind};

/// Categoría para elementos sin categoría; siempre se pinta la última
pub const FALLBACK_CATEGORY: &str = "Outros";
/// Filtro que muestra todas las categorías
pub const ALL_FILTER: &str = "Todos";
/// Marca de los elementos no disponibles en el panel
pub const SOLD_OUT_BADGE: &str = "Esgotado";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedMenu {
    pub food: Vec<MenuItem>,
    pub wines: Vec<MenuItem>,
}

pub fn normalize_menu(menu: MenuResponse) -> NormalizedMenu {
    NormalizedMenu {
        food: normalize_food(menu.food),
        wines: normalize_wines(menu.wines),
    }
}

pub fn normalize_food(items: Vec<FoodDto>) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|dto| MenuItem {
            id: Some(dto.id),
            category: category_or_default(dto.category),
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            price: finite_or_zero(dto.price),
            image: non_blank(dto.image_url),
            tags: dto.tags.unwrap_or_default(),
            available: dto.is_active.unwrap_or(true),
            ..MenuItem::empty(MenuKind::Food)
        })
        .collect()
}

/// El precio escalar de un vino es el de botella, si no el de copa, si no 0
pub fn normalize_wines(items: Vec<WineDto>) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|dto| {
            let glass_price = dto.glass_price.filter(|p| p.is_finite());
            let bottle_price = dto.bottle_price.filter(|p| p.is_finite());
            MenuItem {
                id: Some(dto.id),
                category: category_or_default(dto.category),
                name: dto.name,
                description: dto.description.unwrap_or_default(),
                price: bottle_price.or(glass_price).unwrap_or(0.0),
                image: non_blank(dto.image_url),
                available: dto.is_active.unwrap_or(true),
                grapes: non_blank(dto.grapes),
                region: non_blank(dto.region),
                wine_type: non_blank(dto.wine_type),
                glass_price,
                bottle_price,
                ..MenuItem::empty(MenuKind::Wine)
            }
        })
        .collect()
}

fn category_or_default(raw: Option<String>) -> String {
    match raw.as_deref().map(str::trim) {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => FALLBACK_CATEGORY.to_string(),
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

fn finite_or_zero(price: Option<f64>) -> f64 {
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

/// Ordena las categorías presentes: `Outros` al final, después el orden del
/// backend (las desconocidas detrás de las conocidas) y desempate alfabético.
pub fn order_categories<'a, I>(present: I, backend_order: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut categories: Vec<String> = Vec::new();
    for category in present {
        let category = if category.trim().is_empty() {
            FALLBACK_CATEGORY
        } else {
            category
        };
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }

    let index: HashMap<&str, usize> = backend_order
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    categories.sort_by(|a, b| {
        let a_other = a == FALLBACK_CATEGORY;
        let b_other = b == FALLBACK_CATEGORY;
        if a_other != b_other {
            return if a_other { Ordering::Greater } else { Ordering::Less };
        }
        let ia = index.get(a.as_str()).copied().unwrap_or(usize::MAX);
        let ib = index.get(b.as_str()).copied().unwrap_or(usize::MAX);
        ia.cmp(&ib).then_with(|| a.cmp(b))
    });
    categories
}

/// Precio tal y como se imprime en la carta
pub fn price_label(item: &MenuItem) -> String {
    if item.kind == MenuKind::Wine {
        let mut parts = Vec::new();
        if let Some(glass) = item.glass_price {
            parts.push(format!("Copa {:.2}€", glass));
        }
        if let Some(bottle) = item.bottle_price {
            parts.push(format!("Botella {:.2}€", bottle));
        }
        if !parts.is_empty() {
            return parts.join(" · ");
        }
    }
    format!("{:.2}€", item.price)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[serde(flatten)]
    pub item: MenuItem,
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuGroup {
    pub category: String,
    pub items: Vec<MenuEntry>,
}

/// Carta pública: solo elementos disponibles, filtrados por categoría
/// (`Todos` no filtra) y agrupados en el orden de presentación.
pub fn public_menu(items: &[MenuItem], backend_order: &[String], filter: &str) -> Vec<MenuGroup> {
    let visible: Vec<&MenuItem> = items
        .iter()
        .filter(|item| item.available)
        .filter(|item| filter == ALL_FILTER || item.category == filter)
        .collect();

    let order = order_categories(visible.iter().map(|item| item.category.as_str()), backend_order);
    order
        .into_iter()
        .map(|category| {
            let items = visible
                .iter()
                .filter(|item| item.category == category)
                .map(|item| MenuEntry {
                    item: (*item).clone(),
                    price_label: price_label(item),
                })
                .collect();
            MenuGroup { category, items }
        })
        .collect()
}

/// Opciones del filtro de categorías: `Todos` seguido del orden del backend
/// tal cual. Sin orden del backend, las categorías con algún elemento
/// disponible.
pub fn category_filters(items: &[MenuItem], backend_order: &[String]) -> Vec<String> {
    let categories = if backend_order.is_empty() {
        let present = items
            .iter()
            .filter(|item| item.available)
            .map(|item| item.category.as_str());
        order_categories(present, backend_order)
    } else {
        backend_order.to_vec()
    };
    std::iter::once(ALL_FILTER.to_string())
        .chain(categories)
        .collect()
}

/// Fila del listado del panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMenuRow {
    pub index: usize,
    pub name: String,
    pub category: String,
    pub price_label: String,
    pub available: bool,
    pub badge: Option<&'static str>,
}

/// El panel lista todo, también lo agotado, marcado con `Esgotado`
pub fn admin_menu_rows(items: &[MenuItem]) -> Vec<AdminMenuRow> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| AdminMenuRow {
            index,
            name: item.name.clone(),
            category: item.category.clone(),
            price_label: price_label(item),
            available: item.available,
            badge: (!item.available).then_some(SOLD_OUT_BADGE),
        })
        .collect()
}
