//! fruit_options: the fixed list of selectable smoothie ingredients.

use diesel::prelude::*;
use serde::Serialize;

use crate::schema::fruit_options;

/// Ingredient names in the order the catalog table returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    names: Vec<String>,
}

impl Catalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = fruit_options)]
pub struct NewFruitOption<'a> {
    pub fruit_name: &'a str,
}
