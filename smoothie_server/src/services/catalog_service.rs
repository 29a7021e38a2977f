//! Catalog reads.

use crate::models::catalog::Catalog;
use crate::store::{OrderStore, StoreError};

/// Read the selectable ingredient names through the page's session.
pub async fn load_catalog<S: OrderStore>(store: &mut S) -> Result<Catalog, StoreError> {
    let names = store.fruit_names().await?;
    tracing::debug!(items = names.len(), "Catalog loaded");
    Ok(Catalog::new(names))
}
