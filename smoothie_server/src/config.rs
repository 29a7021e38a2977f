//! Order service configuration, loaded from environment variables.

use std::path::PathBuf;

use crate::models::order::IngredientJoin;

pub const DEFAULT_NUTRITION_URL: &str = "https://my.smoothiefroot.com";

#[derive(Clone, Debug)]
pub struct OrderConfig {
    /// TOML file holding named connection profiles.
    pub connections_file: PathBuf,
    /// Profile to look up in the connections file.
    pub connection_profile: String,
    /// TOML file holding database credentials.
    pub secrets_file: PathBuf,
    /// Table in the secrets file that holds the credentials.
    pub secrets_key: String,
    /// Base URL of the nutrition API.
    pub nutrition_url: String,
    /// Serve the nutrition lookup page.
    pub nutrition_enabled: bool,
    /// How chosen ingredients are written to the orders table.
    pub ingredient_join: IngredientJoin,
    /// Show the session source and skipped strategies on the order page.
    pub show_diagnostics: bool,
}

impl OrderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let connections_file = var("SMOOTHIE_CONNECTIONS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("connections.toml"));
        let connection_profile =
            var("SMOOTHIE_CONNECTION_PROFILE").unwrap_or_else(|| "smoothies".to_string());
        let secrets_file = var("SMOOTHIE_SECRETS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("secrets.toml"));
        let secrets_key = var("SMOOTHIE_SECRETS_KEY").unwrap_or_else(|| "smoothies".to_string());
        let nutrition_url =
            var("SMOOTHIE_NUTRITION_URL").unwrap_or_else(|| DEFAULT_NUTRITION_URL.to_string());
        let nutrition_enabled = flag(&var, "SMOOTHIE_NUTRITION_ENABLED", true);
        let show_diagnostics = flag(&var, "SMOOTHIE_SHOW_DIAGNOSTICS", false);

        let ingredient_join = match var("SMOOTHIE_INGREDIENT_JOIN") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}, falling back to comma");
                IngredientJoin::default()
            }),
            None => IngredientJoin::default(),
        };

        Self {
            connections_file,
            connection_profile,
            secrets_file,
            secrets_key,
            nutrition_url,
            nutrition_enabled,
            ingredient_join,
            show_diagnostics,
        }
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match var(key).as_deref().map(str::trim) {
        None | Some("") => default,
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        Some(other) => {
            tracing::warn!("{key}={other} is not a boolean, using default: {default}");
            default
        }
    }
}
