//! Catalog seeder: the default fruit list for a fresh database.

use diesel::prelude::*;
use diesel_async::AsyncPgConnection;
use diesel_async::RunQueryDsl;

use crate::models::catalog::NewFruitOption;
use crate::schema::fruit_options;

/// Catalog rows for a fresh database, in `fruit_id` order.
pub const DEFAULT_FRUITS: &[&str] = &[
    "Apples",
    "Blueberries",
    "Cantaloupe",
    "Dragon Fruit",
    "Elderberries",
    "Figs",
    "Guava",
    "Honeydew",
    "Jackfruit",
    "Kiwi",
    "Lime",
    "Mango",
    "Nectarine",
    "Papaya",
    "Raspberries",
    "Strawberries",
    "Tangerine",
    "Ugli Fruit",
    "Vanilla Bean",
    "Watermelon",
    "Ximenia",
    "Yerba Mate",
    "Ziziphus Jujube",
];

/// Insert [`DEFAULT_FRUITS`] when the catalog is empty. Returns the number of rows written.
///
/// Idempotent: an existing catalog is left untouched, whatever it holds.
pub async fn seed_catalog(conn: &mut AsyncPgConnection) -> anyhow::Result<usize> {
    let existing: i64 = fruit_options::table.count().get_result(conn).await?;
    if existing > 0 {
        tracing::info!(existing, "Catalog already seeded");
        return Ok(0);
    }

    let rows: Vec<NewFruitOption<'_>> = DEFAULT_FRUITS
        .iter()
        .map(|&fruit_name| NewFruitOption { fruit_name })
        .collect();

    let inserted = diesel::insert_into(fruit_options::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;

    tracing::info!(inserted, "Seeded fruit catalog");
    Ok(inserted)
}
