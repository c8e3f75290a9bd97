use axum::{
    Router,
    routing::get,
};

use booking_queue_cell::{create_queue_router, SharedClinic};

pub fn create_router(state: SharedClinic) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic queue API is running!" }))
        .merge(create_queue_router(state))
}
