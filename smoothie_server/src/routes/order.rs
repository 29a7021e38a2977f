//! The order page: form rendering and submission.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use crate::error::AppError;
use crate::form::{OrderForm, MAX_SELECTIONS};
use crate::page::PageContext;
use crate::services::order_service::{self, SubmitOutcome};
use crate::store::OrderStore;
use crate::views::{self, Notice, OrderPage};

/// Render an empty form over a freshly acquired session.
pub async fn show<S: OrderStore>(state: &AppState<S>) -> Result<Response, AppError> {
    let page = PageContext::load(&state.acquirer).await?;
    render(state, &page, &OrderForm::default(), None, StatusCode::OK)
}

/// Validate and write the submitted order, then re-render the form.
///
/// Warnings and write failures keep what the user entered; a placed order
/// starts a fresh form.
pub async fn submit<S: OrderStore>(
    state: &AppState<S>,
    pairs: Vec<(String, String)>,
) -> Result<Response, AppError> {
    let mut page = PageContext::load(&state.acquirer).await?;
    let form = OrderForm::from_pairs(&pairs, &page.catalog);

    let result =
        order_service::submit_order(&mut page.session, &form, state.config.ingredient_join).await;

    let (status, notice, form) = match result {
        Ok(SubmitOutcome::Placed { name_on_order }) => (
            StatusCode::OK,
            Notice::success(format!("Your Smoothie is ordered, {name_on_order}!")),
            OrderForm::default(),
        ),
        Ok(SubmitOutcome::Rejected(warning)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Notice::warning(warning.to_string()),
            form,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Notice::error(format!("Your order could not be placed: {e}")),
            form,
        ),
    };

    render(state, &page, &form, Some(notice), status)
}

fn render<S>(
    state: &AppState<S>,
    page: &PageContext<S>,
    form: &OrderForm,
    notice: Option<Notice>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let diagnostics = state
        .config
        .show_diagnostics
        .then(|| page.diagnostics.iter().map(ToString::to_string).collect());

    let view = OrderPage {
        catalog: page.catalog.names(),
        name_on_order: &form.name_on_order,
        selected: form.selection.items(),
        max_selections: MAX_SELECTIONS,
        notice,
        nutrition_enabled: state.config.nutrition_enabled,
        source: page.source,
        diagnostics,
    };

    let html = views::render("order.html", &view)?;
    Ok((status, html).into_response())
}
