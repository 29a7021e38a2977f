//! Diesel table definitions for the smoothie order tables.
//!
//! Tables: fruit_options (read-only catalog), orders (one row per submit).

diesel::table! {
    fruit_options (fruit_id) {
        fruit_id -> Int8,
        fruit_name -> Varchar,
        search_on -> Nullable<Varchar>,
    }
}

diesel::table! {
    orders (order_uid) {
        order_uid -> Int8,
        ingredients -> Varchar,
        name_on_order -> Varchar,
        order_filled -> Bool,
        order_ts -> Nullable<Timestamptz>,
    }
}
