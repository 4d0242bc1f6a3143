//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use actix_web::web;
use serde_json::json;

use crate::domain::ports::{NoopNotifier, RecordStore};
use crate::inbound::http::state::HttpState;
use crate::outbound::store::MemoryRecordStore;

pub fn store() -> Arc<MemoryRecordStore> {
    Arc::new(MemoryRecordStore::new())
}

pub fn state(store: &Arc<MemoryRecordStore>) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::clone(store) as Arc<dyn RecordStore>,
        Arc::new(NoopNotifier),
    ))
}

pub fn seed_user(store: &MemoryRecordStore, id: i64, name: &str, coins: i64, eaten: i64) {
    store.seed(
        "users",
        json!({
            "id": id,
            "name": name,
            "age": 30,
            "gender": "other",
            "coins": coins,
            "number_of_pizza_eaten": eaten,
        }),
    );
}

pub fn seed_slice(store: &MemoryRecordStore, id: i64, name: &str, price: i64) {
    store.seed(
        "pizza_slices",
        json!({ "id": id, "name": name, "price": price }),
    );
}

pub fn seed_record(store: &MemoryRecordStore, id: i64, user_id: i64, slice_id: i64) {
    store.seed(
        "user_slices",
        json!({
            "id": id,
            "user_id": user_id,
            "slice_id": slice_id,
            "purchased_at": "2026-08-01T12:00:00Z",
            "eaten_at": null,
        }),
    );
}
