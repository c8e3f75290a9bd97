use chrono::Utc;
use tracing::{debug, info, warn};

use doctor_cell::{Booking, DoctorId, DoctorRegistry, TokenId, TokenStatus};

use crate::services::allocation::AllocationEngine;
use crate::QueueError;

/// Moves tokens into terminal statuses and recomputes the doctor's queue.
pub struct StatusTransitionHandler;

impl StatusTransitionHandler {
    pub fn mark_completed<R>(registry: &mut R, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        Self::apply(registry, doctor_id, token_id, TokenStatus::Completed)
    }

    pub fn mark_no_show<R>(registry: &mut R, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        Self::apply(registry, doctor_id, token_id, TokenStatus::NoShow)
    }

    /// Patient-initiated cancellation. Recorded as a no-show.
    pub fn cancel<R>(registry: &mut R, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        Self::apply(registry, doctor_id, token_id, TokenStatus::NoShow)
    }

    fn apply<R>(
        registry: &mut R,
        doctor_id: DoctorId,
        token_id: TokenId,
        target: TokenStatus,
    ) -> Result<Booking, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        let doctor = registry
            .doctor_mut(doctor_id)
            .ok_or(QueueError::DoctorNotFound(doctor_id))?;
        let patient = doctor
            .patient_mut(token_id)
            .ok_or(QueueError::TokenNotFound { doctor_id, token_id })?;

        // Terminal tokens stay as they are
        if patient.status.is_terminal() {
            debug!(
                "Token {} for doctor {} already {:?}, ignoring {:?}",
                token_id, doctor_id, patient.status, target
            );
            return Ok(patient.clone());
        }

        if !patient.status.can_transition_to(&target) {
            warn!(
                "Invalid transition for token {}: {:?} -> {:?}",
                token_id, patient.status, target
            );
            return Err(QueueError::InvalidStatusTransition {
                token_id,
                from: patient.status,
                to: target,
            });
        }

        let now = Utc::now();
        patient.status = target;
        match target {
            TokenStatus::Completed => patient.completed_at = Some(now),
            _ => patient.cancelled_at = Some(now),
        }

        AllocationEngine::recompute_doctor(doctor);

        info!("Token {} for doctor {} marked {:?}", token_id, doctor_id, target);

        doctor
            .patient(token_id)
            .cloned()
            .ok_or(QueueError::TokenNotFound { doctor_id, token_id })
    }
}
