//! The nutrition lookup page. Independent of the database.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use crate::error::AppError;
use crate::views::{self, NutritionPage, NutritionView};

pub async fn show<S>(state: &AppState<S>, fruit: Option<String>) -> Result<Response, AppError> {
    if !state.config.nutrition_enabled {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    let fruit = fruit
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    let result = match &fruit {
        Some(name) => Some(NutritionView::from_lookup(
            state.nutrition.lookup(name).await,
        )),
        None => None,
    };

    let view = NutritionPage {
        fruit: fruit.as_deref().unwrap_or_default(),
        result,
        nutrition_enabled: true,
    };

    let html = views::render("nutrition.html", &view)?;
    Ok(html.into_response())
}
