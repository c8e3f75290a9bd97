use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{
    advance_counter, book_token, cancel_token, create_doctor, delete_doctor, get_counter_stats,
    get_doctor_stats, get_session, leave_queue, list_doctors, mark_completed, mark_no_show,
    reset_system,
};
use crate::SharedClinic;

pub fn create_queue_router(state: SharedClinic) -> Router {
    let doctor_routes = Router::new()
        .route("/doctors", post(create_doctor).get(list_doctors))
        .route("/doctors/{doctor_id}", delete(delete_doctor))
        .route("/doctors/{doctor_id}/stats", get(get_doctor_stats));

    let consultation_routes = Router::new()
        .route("/consultations/{doctor_id}/tokens/{token_id}/complete", post(mark_completed))
        .route("/consultations/{doctor_id}/tokens/{token_id}/no-show", post(mark_no_show))
        .route("/consultations/{doctor_id}/tokens/{token_id}/cancel", post(cancel_token))
        .route("/consultations/{doctor_id}/tokens/{token_id}/leave", post(leave_queue));

    let queue_routes = Router::new()
        .route("/queues/{queue_type}/book", post(book_token))
        .route("/queues/{queue_type}/advance", post(advance_counter))
        .route("/queues/{queue_type}/stats", get(get_counter_stats))
        .route("/session", get(get_session))
        .route("/reset", post(reset_system));

    Router::new()
        .merge(doctor_routes)
        .merge(consultation_routes)
        .merge(queue_routes)
        .with_state(state)
}
