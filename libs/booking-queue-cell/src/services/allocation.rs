use tracing::debug;

use doctor_cell::{ArrivalValue, Doctor, DoctorId, DoctorRegistry, DoctorStats, TokenStatus};
use shared_utils::minutes_to_time;

use crate::QueueError;

/// Slot label shown for tokens beyond the allocatable capacity.
pub const WAITING_LIST_MARKER: &str = "Waiting List";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSummary {
    pub completed: u32,
    pub no_show: u32,
    pub allocated: u32,
    pub waiting: u32,
}

/// Re-derives allocated/waiting status and arrival estimates for a doctor's
/// whole patient list. Never incremental: every call starts from the
/// persisted statuses and booking order alone.
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn recompute<R>(registry: &mut R, doctor_id: DoctorId) -> Result<AllocationSummary, QueueError>
    where
        R: DoctorRegistry + ?Sized,
    {
        let doctor = registry
            .doctor_mut(doctor_id)
            .ok_or(QueueError::DoctorNotFound(doctor_id))?;
        Ok(Self::recompute_doctor(doctor))
    }

    pub fn recompute_doctor(doctor: &mut Doctor) -> AllocationSummary {
        let completed = doctor.count_with_status(TokenStatus::Completed) as u32;
        let no_show = doctor.count_with_status(TokenStatus::NoShow) as u32;
        doctor.stats = DoctorStats { completed, no_show };

        // Completions consume capacity for good; this may go to zero or below
        let allowed_allocated = i64::from(doctor.max_patients) - i64::from(completed);
        let start = doctor.start_minutes();
        let step = doctor.slot_step();

        let mut allocated: u32 = 0;
        let mut waiting: u32 = 0;

        // Booking order is the fairness contract, so walk the list as stored
        for patient in doctor.patients.iter_mut().filter(|p| !p.status.is_terminal()) {
            if i64::from(allocated) < allowed_allocated {
                let arrival = start.saturating_add((allocated + completed).saturating_mul(step));
                patient.status = TokenStatus::Allocated;
                patient.estimated_slot = Some(minutes_to_time(arrival));
                patient.arrival_value = Some(ArrivalValue::Minutes(arrival));
                allocated += 1;
            } else {
                patient.status = TokenStatus::Waiting;
                patient.estimated_slot = Some(WAITING_LIST_MARKER.to_string());
                patient.arrival_value = Some(ArrivalValue::Unscheduled);
                waiting += 1;
            }
        }

        debug!(
            "Recomputed queue for doctor {}: {} allocated, {} waiting, {} completed, {} no-show",
            doctor.id, allocated, waiting, completed, no_show
        );

        AllocationSummary {
            completed,
            no_show,
            allocated,
            waiting,
        }
    }
}
