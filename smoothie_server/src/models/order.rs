//! orders: one row per submitted smoothie.

use std::fmt;
use std::str::FromStr;

use diesel::prelude::*;

use crate::schema::orders;

#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = orders)]
pub struct NewSmoothieOrder {
    pub ingredients: String,
    pub name_on_order: String,
}

/// How chosen ingredient names are serialized into the `ingredients` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngredientJoin {
    /// `"Apples, Kiwi"`
    #[default]
    Comma,
    /// `"Apples Kiwi "`, every name followed by a single space.
    Space,
}

impl IngredientJoin {
    pub fn join<S: AsRef<str>>(self, items: &[S]) -> String {
        match self {
            IngredientJoin::Comma => items
                .iter()
                .map(|item| item.as_ref())
                .collect::<Vec<&str>>()
                .join(", "),
            IngredientJoin::Space => items.iter().fold(String::new(), |mut acc, item| {
                acc.push_str(item.as_ref());
                acc.push(' ');
                acc
            }),
        }
    }
}

impl FromStr for IngredientJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" => Ok(IngredientJoin::Comma),
            "space" => Ok(IngredientJoin::Space),
            other => Err(format!("unknown ingredient join policy: {other}")),
        }
    }
}

impl fmt::Display for IngredientJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngredientJoin::Comma => f.write_str("comma"),
            IngredientJoin::Space => f.write_str("space"),
        }
    }
}
