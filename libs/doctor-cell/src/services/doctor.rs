use chrono::NaiveTime;
use tracing::debug;

use shared_config::AppConfig;
use shared_utils::time::{clock_minutes, parse_clock};

use crate::error::DoctorError;
use crate::models::{CreateDoctorRequest, Doctor, DoctorId, DoctorStats, SessionMode};

const DEFAULT_START_TIME: &str = "09:00";
const DEFAULT_END_TIME: &str = "17:00";

/// Session capacity, fixed when the doctor is created.
///
/// `count` mode takes the explicit limit. `time` mode fits as many
/// `slot_step`-minute slots as the window holds; an empty or inverted
/// window yields 0.
pub fn derive_max_patients(
    mode: SessionMode,
    limit: Option<u32>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_step: u32,
) -> u32 {
    match mode {
        SessionMode::Count => limit.unwrap_or(0),
        SessionMode::Time => {
            let start = clock_minutes(start_time);
            let end = clock_minutes(end_time);
            if end <= start || slot_step == 0 {
                0
            } else {
                (end - start) / slot_step
            }
        }
    }
}

pub struct DoctorService {
    default_avg_time: u32,
    default_buffer_time: u32,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            default_avg_time: config.default_avg_service_time.max(1),
            default_buffer_time: config.default_buffer_time,
        }
    }

    /// Build a new active doctor with an empty patient list
    pub fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DoctorError::EmptyName);
        }

        let start_time = Self::clock_field(request.start_time.as_deref(), DEFAULT_START_TIME, "start_time")?;
        let end_time = Self::clock_field(request.end_time.as_deref(), DEFAULT_END_TIME, "end_time")?;

        // A zero average would collapse every slot onto the session start
        let avg_time = match request.avg_time {
            Some(avg) if avg > 0 => avg,
            _ => self.default_avg_time,
        };
        let buffer_time = request.buffer_time.unwrap_or(self.default_buffer_time);
        let slot_step = avg_time
            .checked_add(buffer_time)
            .ok_or(DoctorError::InvalidTiming { avg_time, buffer_time })?;

        let max_patients = derive_max_patients(
            request.mode,
            request.limit,
            start_time,
            end_time,
            slot_step,
        );

        let doctor = Doctor {
            id: DoctorId::new(),
            name: name.to_string(),
            session_name: request.session_name.unwrap_or_default(),
            mode: request.mode,
            max_patients,
            start_time,
            end_time,
            avg_time,
            buffer_time,
            active: true,
            patients: Vec::new(),
            stats: DoctorStats::default(),
        };

        debug!(
            "Doctor {} ({}) created with capacity {} in {:?} mode",
            doctor.name, doctor.id, doctor.max_patients, doctor.mode
        );

        Ok(doctor)
    }

    fn clock_field(
        value: Option<&str>,
        default: &str,
        field: &'static str,
    ) -> Result<NaiveTime, DoctorError> {
        let raw = match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => default,
        };
        parse_clock(raw).map_err(|source| DoctorError::InvalidClock { field, source })
    }
}
