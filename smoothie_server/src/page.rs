//! Per-request page context.
//!
//! Everything a page needs from the database is gathered here once per
//! request and passed explicitly to the handlers that need it.

use crate::error::AppError;
use crate::models::catalog::Catalog;
use crate::services::catalog_service;
use crate::session::{Diagnostic, SessionAcquirer};
use crate::store::OrderStore;

pub struct PageContext<S> {
    pub session: S,
    pub catalog: Catalog,
    /// Strategy that produced `session`.
    pub source: &'static str,
    /// Strategies passed over on the way to `session`.
    pub diagnostics: Vec<Diagnostic>,
}

impl<S: OrderStore> PageContext<S> {
    /// Acquire a session and read the catalog through it. Either failing halts the page.
    pub async fn load(acquirer: &SessionAcquirer<S>) -> Result<Self, AppError> {
        let acquired = acquirer.acquire().await?;
        let mut session = acquired.handle;

        let catalog = catalog_service::load_catalog(&mut session)
            .await
            .map_err(|e| {
                tracing::error!(source = acquired.source, error = %e, "Catalog read failed");
                AppError::CatalogUnavailable(e)
            })?;

        Ok(Self {
            session,
            catalog,
            source: acquired.source,
            diagnostics: acquired.diagnostics,
        })
    }
}
