//! Admin endpoints for managing kats

pub mod changelist;
pub mod kats;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::state::AppState;

/// Create admin router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // HTML change list
        .route("/kat_corner/kat/", get(changelist::kat_change_list))
        // JSON management API
        .route("/kats", get(kats::list_kats))
        .route("/kats", post(kats::create_kat))
        .route("/kats/{kat_id}", get(kats::get_kat))
        .route("/kats/{kat_id}", put(kats::update_kat))
        .route("/kats/{kat_id}", delete(kats::delete_kat))
}
