//! Order service HTTP routes.

pub mod nutrition;
pub mod order;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::config::OrderConfig;
use crate::error::AppError;
use crate::services::nutrition_service::NutritionClient;
use crate::session::SessionAcquirer;
use crate::store::OrderStore;

/// Shared state for route handlers. Holds no session: every page load acquires its own.
pub struct AppState<S> {
    pub config: Arc<OrderConfig>,
    pub acquirer: Arc<SessionAcquirer<S>>,
    pub nutrition: NutritionClient,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            acquirer: self.acquirer.clone(),
            nutrition: self.nutrition.clone(),
        }
    }
}

impl<S: OrderStore> AppState<S> {
    pub fn new(config: OrderConfig, acquirer: SessionAcquirer<S>) -> Self {
        let nutrition = NutritionClient::new(config.nutrition_url.clone());
        Self {
            config: Arc::new(config),
            acquirer: Arc::new(acquirer),
            nutrition,
        }
    }
}

/// Build the order service's Axum router.
pub fn app_router<S: OrderStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(order_page::<S>))
        .route("/order", post(submit_order::<S>))
        .route("/nutrition", get(nutrition_page::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn order_page<S: OrderStore>(State(state): State<AppState<S>>) -> Result<Response, AppError> {
    order::show(&state).await
}

async fn submit_order<S: OrderStore>(
    State(state): State<AppState<S>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    order::submit(&state, pairs).await
}

#[derive(Debug, Deserialize)]
pub struct NutritionQuery {
    pub fruit: Option<String>,
}

async fn nutrition_page<S: OrderStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<NutritionQuery>,
) -> Result<Response, AppError> {
    nutrition::show(&state, query.fruit).await
}
