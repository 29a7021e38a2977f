//! Data access used by a page once it holds a session.
//!
//! [`OrderStore`] is the seam between the page flow and the database: the
//! live implementation runs diesel queries over the page's [`SessionHandle`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use thiserror::Error;

use crate::models::order::NewSmoothieOrder;
use crate::schema::{fruit_options, orders};
use crate::session::SessionHandle;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

#[async_trait]
pub trait OrderStore: Send + 'static {
    /// Cheapest possible round trip, used to reject handles that connect but cannot query.
    async fn probe(&mut self) -> Result<(), StoreError>;

    /// Catalog names, ordered by their catalog id.
    async fn fruit_names(&mut self) -> Result<Vec<String>, StoreError>;

    async fn insert_order(&mut self, order: &NewSmoothieOrder) -> Result<(), StoreError>;
}

#[async_trait]
impl OrderStore for SessionHandle {
    async fn probe(&mut self) -> Result<(), StoreError> {
        diesel::sql_query("SELECT 1")
            .execute(self.connection_mut())
            .await?;
        Ok(())
    }

    async fn fruit_names(&mut self) -> Result<Vec<String>, StoreError> {
        let names = fruit_options::table
            .select(fruit_options::fruit_name)
            .order(fruit_options::fruit_id.asc())
            .load::<String>(self.connection_mut())
            .await?;
        Ok(names)
    }

    async fn insert_order(&mut self, order: &NewSmoothieOrder) -> Result<(), StoreError> {
        diesel::insert_into(orders::table)
            .values(order)
            .execute(self.connection_mut())
            .await?;
        Ok(())
    }
}
