//! The order form: a free-text name and a bounded ingredient selection.

use crate::models::catalog::Catalog;

pub const MAX_SELECTIONS: usize = 5;

pub const NAME_FIELD: &str = "name_on_order";
pub const INGREDIENTS_FIELD: &str = "ingredients";

/// Ingredients picked from the catalog, in the order they were picked.
///
/// Picks past [`MAX_SELECTIONS`], repeats, and names outside the catalog
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<String>,
}

impl Selection {
    /// Returns whether the pick was taken.
    pub fn select(&mut self, catalog: &Catalog, item: &str) -> bool {
        if self.is_full() || !catalog.contains(item) || self.items.iter().any(|i| i == item) {
            return false;
        }
        self.items.push(item.to_string());
        true
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_SELECTIONS
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name_on_order: String,
    pub selection: Selection,
}

impl OrderForm {
    /// Collect the submitted url-encoded fields. Unknown fields are ignored.
    pub fn from_pairs(pairs: &[(String, String)], catalog: &Catalog) -> Self {
        let mut form = OrderForm::default();

        for (key, value) in pairs {
            match key.as_str() {
                NAME_FIELD => form.name_on_order = value.clone(),
                INGREDIENTS_FIELD => {
                    if !form.selection.select(catalog, value) {
                        tracing::debug!(ingredient = %value, "Ignored ingredient pick");
                    }
                }
                _ => {}
            }
        }

        form
    }
}
