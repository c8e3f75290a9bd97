use thiserror::Error;

use shared_utils::ClockError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    #[error("Doctor name must not be empty")]
    EmptyName,

    #[error("Slot length overflows: avg_time {avg_time} + buffer_time {buffer_time}")]
    InvalidTiming { avg_time: u32, buffer_time: u32 },

    #[error("Invalid {field}: {source}")]
    InvalidClock {
        field: &'static str,
        #[source]
        source: ClockError,
    },
}
