use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use doctor_cell::{CreateDoctorRequest, DoctorId};
use shared_models::error::AppError;

use crate::{BookTokenRequest, SharedClinic, TokenPath};

/// Register a doctor for the current session
pub async fn create_doctor(
    State(clinic): State<SharedClinic>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!("Create doctor request for: {}", request.name);

    let doctor = clinic.lock().await.create_doctor(request)?;

    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

/// List active doctors
pub async fn list_doctors(State(clinic): State<SharedClinic>) -> Result<Json<Value>, AppError> {
    let doctors = clinic.lock().await.list_active_doctors();

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

pub async fn delete_doctor(
    State(clinic): State<SharedClinic>,
    Path(doctor_id): Path<DoctorId>,
) -> Result<StatusCode, AppError> {
    info!("Delete doctor request for: {}", doctor_id);

    clinic.lock().await.delete_doctor(doctor_id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_doctor_stats(
    State(clinic): State<SharedClinic>,
    Path(doctor_id): Path<DoctorId>,
) -> Result<Json<Value>, AppError> {
    let stats = clinic
        .lock()
        .await
        .doctor_stats(doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor not found: {}", doctor_id)))?;

    Ok(Json(json!(stats)))
}

/// Book a token on any queue
pub async fn book_token(
    State(clinic): State<SharedClinic>,
    Path(queue_type): Path<String>,
    Json(request): Json<BookTokenRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!("Booking request on {} queue", queue_type);

    let receipt = clinic
        .lock()
        .await
        .book_token(&request.name, &queue_type, request.doctor_id)?;

    Ok((StatusCode::CREATED, Json(json!(receipt))))
}

pub async fn advance_counter(
    State(clinic): State<SharedClinic>,
    Path(queue_type): Path<String>,
) -> Result<Json<Value>, AppError> {
    let served = clinic.lock().await.advance_counter(&queue_type)?;

    Ok(Json(json!({
        "queue_type": queue_type,
        "serving": served
    })))
}

pub async fn get_counter_stats(
    State(clinic): State<SharedClinic>,
    Path(queue_type): Path<String>,
) -> Result<Json<Value>, AppError> {
    let stats = clinic.lock().await.counter_stats(&queue_type)?;

    Ok(Json(json!(stats)))
}

pub async fn mark_completed(
    State(clinic): State<SharedClinic>,
    Path(path): Path<TokenPath>,
) -> Result<Json<Value>, AppError> {
    let booking = clinic.lock().await.mark_completed(path.doctor_id, path.token_id)?;

    Ok(Json(json!(booking)))
}

pub async fn mark_no_show(
    State(clinic): State<SharedClinic>,
    Path(path): Path<TokenPath>,
) -> Result<Json<Value>, AppError> {
    let booking = clinic.lock().await.mark_no_show(path.doctor_id, path.token_id)?;

    Ok(Json(json!(booking)))
}

pub async fn cancel_token(
    State(clinic): State<SharedClinic>,
    Path(path): Path<TokenPath>,
) -> Result<Json<Value>, AppError> {
    info!("Cancel request for token {} with doctor {}", path.token_id, path.doctor_id);

    let booking = clinic.lock().await.cancel(path.doctor_id, path.token_id)?;

    Ok(Json(json!(booking)))
}

pub async fn leave_queue(
    State(clinic): State<SharedClinic>,
    Path(path): Path<TokenPath>,
) -> Result<Json<Value>, AppError> {
    let booking = clinic.lock().await.leave_queue(path.doctor_id, path.token_id)?;

    Ok(Json(json!(booking)))
}

pub async fn get_session(State(clinic): State<SharedClinic>) -> Result<Json<Value>, AppError> {
    let session = clinic.lock().await.current_session()?;

    Ok(Json(json!({ "session": session })))
}

pub async fn reset_system(State(clinic): State<SharedClinic>) -> Result<StatusCode, AppError> {
    info!("Resetting clinic state");

    clinic.lock().await.reset_system()?;

    Ok(StatusCode::NO_CONTENT)
}
