//! Tolerant extraction of the ingredients table from a recipe page.
//!
//! The catalog has shipped several markups over the years; extraction
//! tries each known shape in priority order and uses the first one
//! present:
//!
//! 1. `table.legacy-ingredients-table`
//! 2. `table#ingredients-table`
//! 3. `div.recipe-ingredients` with per-item quantity/name elements

use crate::error::{FinderError, Result};
use crate::types::Ingredient;
use scraper::{ElementRef, Html, Selector};

/// Placeholder title when neither the heading nor the page title yields one.
const UNKNOWN_TITLE: &str = "Unknown Cocktail";

/// Split a raw quantity string into `(measure, unit)`.
///
/// The measure is the first whitespace token and the unit the remainder;
/// a single token has an empty unit, an empty string yields two empties.
pub fn split_quantity(raw: &str) -> (String, String) {
    let mut parts = raw.trim().splitn(2, char::is_whitespace);
    let measure = parts.next().unwrap_or("").to_string();
    let unit = parts.next().map(str::trim).unwrap_or("").to_string();
    (measure, unit)
}

/// Extract ingredient entries from a recipe page.
///
/// Entries keep source row order; a later row repeating a name overwrites
/// the earlier entry's measure and unit in place, so names are unique in
/// the output.
///
/// # Errors
///
/// [`FinderError::StructureNotFound`] when none of the recognised shapes
/// is present; [`FinderError::Parse`] if a selector cannot be built.
pub fn extract_ingredients(document: &Html) -> Result<Vec<Ingredient>> {
    let primary = selector("table.legacy-ingredients-table")?;
    let secondary = selector("table#ingredients-table")?;
    let container = selector("div.recipe-ingredients")?;

    if let Some(table) = document.select(&primary).next() {
        return parse_table_rows(table);
    }
    if let Some(table) = document.select(&secondary).next() {
        return parse_table_rows(table);
    }
    if let Some(div) = document.select(&container).next() {
        return parse_item_container(div);
    }

    Err(FinderError::StructureNotFound)
}

/// Extract the recipe title, falling back through the known locations:
/// the recipe heading, then the page title (text before the first
/// `" - "`), then a fixed placeholder.
pub fn extract_title(document: &Html) -> String {
    if let Ok(heading) = selector("h1.recipe-name") {
        if let Some(el) = document.select(&heading).next() {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }
    }

    if let Ok(title) = selector("title") {
        if let Some(el) = document.select(&title).next() {
            let text = element_text(el);
            let before_separator = text.split(" - ").next().unwrap_or("").trim();
            if !before_separator.is_empty() {
                return before_separator.to_string();
            }
        }
    }

    UNKNOWN_TITLE.to_string()
}

/// Rows of a tabular shape: cell 0 is the raw quantity, cell 1 the name.
fn parse_table_rows(table: ElementRef<'_>) -> Result<Vec<Ingredient>> {
    let row_sel = selector("tr")?;
    let cell_sel = selector("td, th")?;

    let mut entries: Vec<Ingredient> = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.len() < 2 {
            continue;
        }
        let raw_quantity = element_text(cells[0]);
        let name = element_text(cells[1]);
        if name.is_empty() {
            continue;
        }
        insert(&mut entries, name, &raw_quantity);
    }

    tracing::debug!(count = entries.len(), "ingredients parsed from table");
    Ok(entries)
}

/// Non-tabular shape: item elements each holding a quantity-labelled and
/// a name-labelled child.
fn parse_item_container(container: ElementRef<'_>) -> Result<Vec<Ingredient>> {
    let item_sel = selector(
        "div.ingredient, li.ingredient, div.recipe-ingredient, li.recipe-ingredient",
    )?;
    let quantity_sel = selector(".quantity, .ingredient-quantity")?;
    let name_sel = selector(".name, .ingredient-name")?;

    let mut entries: Vec<Ingredient> = Vec::new();
    for item in container.select(&item_sel) {
        let quantity_el = item.select(&quantity_sel).next();
        let name_el = item.select(&name_sel).next();
        let (Some(quantity_el), Some(name_el)) = (quantity_el, name_el) else {
            continue;
        };
        let name = element_text(name_el);
        if name.is_empty() {
            continue;
        }
        insert(&mut entries, name, &element_text(quantity_el));
    }

    tracing::debug!(count = entries.len(), "ingredients parsed from container");
    Ok(entries)
}

/// Insert with map semantics: a repeated name overwrites the earlier
/// entry's measure/unit without changing its position.
fn insert(entries: &mut Vec<Ingredient>, name: String, raw_quantity: &str) {
    let (measure, unit) = split_quantity(raw_quantity);
    if let Some(existing) = entries.iter_mut().find(|e| e.name == name) {
        existing.measure = measure;
        existing.unit = unit;
    } else {
        entries.push(Ingredient { name, measure, unit });
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FinderError::Parse(format!("invalid selector {css}: {e:?}")))
}

/// Whitespace-normalised text of an element's subtree.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
