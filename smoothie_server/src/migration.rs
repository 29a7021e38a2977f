//! Schema for the smoothie tables.

use diesel_async::AsyncPgConnection;
use diesel_async::SimpleAsyncConnection;

/// Creates the catalog and orders tables. Safe to run more than once.
pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS fruit_options (
    fruit_id    BIGSERIAL PRIMARY KEY,
    fruit_name  VARCHAR(25) NOT NULL UNIQUE,
    search_on   VARCHAR(25)
);

CREATE TABLE IF NOT EXISTS orders (
    order_uid       BIGSERIAL PRIMARY KEY,
    ingredients     VARCHAR(200) NOT NULL,
    name_on_order   VARCHAR(100) NOT NULL,
    order_filled    BOOLEAN NOT NULL DEFAULT FALSE,
    order_ts        TIMESTAMPTZ DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_orders_unfilled ON orders (order_filled) WHERE NOT order_filled;
"#;

pub async fn run_migration(conn: &mut AsyncPgConnection) -> anyhow::Result<()> {
    conn.batch_execute(MIGRATION_SQL)
        .await
        .map_err(|e| anyhow::anyhow!("smoothie migration failed: {e}"))?;
    Ok(())
}
