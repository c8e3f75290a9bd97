use tracing::{info, warn};

use doctor_cell::{Booking, DoctorId, DoctorRegistry};

use crate::services::allocation::AllocationEngine;
use crate::QueueError;

/// Hard cap on waiting tokens per doctor, checked when a booking is admitted.
pub const MAX_WAITING_LIST: usize = 10;

/// Admits consultation bookings into a doctor's patient list.
pub struct BookingGateway;

impl BookingGateway {
    /// Validate and append a booking, then recompute the doctor's queue.
    ///
    /// Without a `doctor_id` the first active doctor is used. The returned
    /// token already carries its allocated/waiting status and slot.
    pub fn book_consultation<R>(
        registry: &mut R,
        name: &str,
        doctor_id: Option<DoctorId>,
    ) -> Result<Booking, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueueError::ValidationError("Patient name must not be empty".to_string()));
        }

        let doctor_id = match doctor_id {
            Some(id) => id,
            None => registry
                .first_active()
                .map(|doctor| doctor.id)
                .ok_or(QueueError::NoActiveDoctor)?,
        };

        let doctor = registry
            .doctor_mut(doctor_id)
            .ok_or(QueueError::DoctorNotFound(doctor_id))?;

        // Two independent gates: session exhaustion, then the waiting-list cap
        if doctor.is_session_complete() {
            info!("Booking refused for doctor {}: session complete", doctor_id);
            return Err(QueueError::SessionComplete { doctor_id });
        }

        let waiting = doctor.waiting_count();
        if waiting >= MAX_WAITING_LIST {
            warn!("Booking refused for doctor {}: {} already waiting", doctor_id, waiting);
            return Err(QueueError::WaitingListFull { doctor_id, waiting });
        }

        let token_id = doctor.next_token_id();
        let booking = Booking::new(token_id, name, doctor);
        doctor.patients.push(booking);

        AllocationEngine::recompute_doctor(doctor);

        let booked = doctor
            .patient(token_id)
            .cloned()
            .ok_or(QueueError::TokenNotFound { doctor_id, token_id })?;

        info!(
            "Token {} booked with doctor {} as {:?} ({})",
            booked.id,
            doctor_id,
            booked.status,
            booked.estimated_slot.as_deref().unwrap_or("-")
        );

        Ok(booked)
    }
}
