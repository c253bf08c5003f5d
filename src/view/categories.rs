//! Aplanado del árbol de categorías de la carta

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::backend::models::MenuCategoryNode;

/// Recorre el árbol y devuelve las etiquetas a mostrar, ordenadas por
/// `(orden, etiqueta)`.
///
/// Una etiqueta es la subcategoría del nodo o, si no tiene subcategoría ni
/// hijos, su categoría. Las etiquetas repetidas conservan la primera aparición.
pub fn flatten_category_order(nodes: &[MenuCategoryNode]) -> Vec<String> {
    let mut collected: Vec<(i64, String)> = Vec::new();
    let mut seen = HashSet::new();
    walk(nodes, &mut collected, &mut seen);

    collected.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });
    collected.into_iter().map(|(_, label)| label).collect()
}

fn walk(nodes: &[MenuCategoryNode], acc: &mut Vec<(i64, String)>, seen: &mut HashSet<String>) {
    for node in nodes {
        if let Some(label) = label_of(node) {
            if seen.insert(label.clone()) {
                acc.push((node.orden, label));
            }
        }
        if !node.children.is_empty() {
            walk(&node.children, acc, seen);
        }
    }
}

fn label_of(node: &MenuCategoryNode) -> Option<String> {
    let sub = node.subcategory.as_deref().map(str::trim).unwrap_or("");
    if !sub.is_empty() {
        return Some(sub.to_string());
    }
    let category = node.category.trim();
    if node.children.is_empty() && !category.is_empty() {
        return Some(category.to_string());
    }
    None
}
