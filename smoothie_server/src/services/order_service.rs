//! Order validation and writes.

use thiserror::Error;

use crate::form::OrderForm;
use crate::models::order::{IngredientJoin, NewSmoothieOrder};
use crate::store::{OrderStore, StoreError};

/// Submit-time problems the user can fix without leaving the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("A name on the order is required.")]
    NameRequired,

    #[error("At least one ingredient is required.")]
    IngredientsRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Placed { name_on_order: String },
    Rejected(ValidationWarning),
}

/// Checks run in a fixed order: name first, then ingredients.
pub fn validate(form: &OrderForm) -> Result<(), ValidationWarning> {
    if form.name_on_order.trim().is_empty() {
        return Err(ValidationWarning::NameRequired);
    }
    if form.selection.is_empty() {
        return Err(ValidationWarning::IngredientsRequired);
    }
    Ok(())
}

pub fn build_order(form: &OrderForm, join: IngredientJoin) -> NewSmoothieOrder {
    NewSmoothieOrder {
        ingredients: join.join(form.selection.items()),
        name_on_order: form.name_on_order.trim().to_string(),
    }
}

/// Validate the form and, if it passes, write exactly one order row.
pub async fn submit_order<S: OrderStore>(
    store: &mut S,
    form: &OrderForm,
    join: IngredientJoin,
) -> Result<SubmitOutcome, StoreError> {
    if let Err(warning) = validate(form) {
        crate::metrics::order_submitted("rejected");
        tracing::info!(%warning, "Order rejected");
        return Ok(SubmitOutcome::Rejected(warning));
    }

    let order = build_order(form, join);
    if let Err(e) = store.insert_order(&order).await {
        crate::metrics::order_submitted("failed");
        tracing::error!(error = %e, "Failed to insert order");
        return Err(e);
    }

    crate::metrics::order_submitted("placed");
    tracing::info!(
        name_on_order = %order.name_on_order,
        ingredients = %order.ingredients,
        "Order placed"
    );

    Ok(SubmitOutcome::Placed {
        name_on_order: order.name_on_order,
    })
}
