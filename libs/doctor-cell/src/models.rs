use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_utils::time::{clock_minutes, hh_mm};

/// Canonical doctor identifier. Compared by strict equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(Uuid);

impl DoctorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DoctorId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DoctorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for DoctorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position-derived token number, unique within one doctor's patient list.
pub type TokenId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Count,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenStatus {
    Pending,
    Allocated,
    Waiting,
    Completed,
    NoShow,
}

impl TokenStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TokenStatus::Completed | TokenStatus::NoShow)
    }

    pub fn can_transition_to(&self, target: &TokenStatus) -> bool {
        use TokenStatus::*;
        match (self, target) {
            (Pending, Allocated) | (Pending, Waiting) => true,
            (Waiting, Allocated) => true,
            (Allocated, Completed) | (Allocated, NoShow) => true,
            (Waiting, Completed) | (Waiting, NoShow) => true,
            // Recompute re-affirms the current status
            (Allocated, Allocated) | (Waiting, Waiting) => true,
            _ => false,
        }
    }
}

/// Sortable arrival estimate. Every `Minutes` value orders before `Unscheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalValue {
    Minutes(u32),
    Unscheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: TokenId,
    pub name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub status: TokenStatus,
    pub booking_time: DateTime<Utc>,
    pub estimated_slot: Option<String>,
    pub arrival_value: Option<ArrivalValue>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(id: TokenId, name: impl Into<String>, doctor: &Doctor) -> Self {
        Self {
            id,
            name: name.into(),
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            status: TokenStatus::Pending,
            booking_time: Utc::now(),
            estimated_slot: None,
            arrival_value: None,
            completed_at: None,
            cancelled_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorStats {
    pub completed: u32,
    pub no_show: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub session_name: String,
    pub mode: SessionMode,
    pub max_patients: u32,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub avg_time: u32,
    pub buffer_time: u32,
    pub active: bool,
    /// Booking order. Never reordered.
    pub patients: Vec<Booking>,
    pub stats: DoctorStats,
}

impl Doctor {
    /// Minutes reserved per patient.
    pub fn slot_step(&self) -> u32 {
        self.avg_time.saturating_add(self.buffer_time)
    }

    pub fn start_minutes(&self) -> u32 {
        clock_minutes(self.start_time)
    }

    pub fn count_with_status(&self, status: TokenStatus) -> usize {
        self.patients.iter().filter(|p| p.status == status).count()
    }

    pub fn allocated_count(&self) -> usize {
        self.count_with_status(TokenStatus::Allocated)
    }

    pub fn waiting_count(&self) -> usize {
        self.count_with_status(TokenStatus::Waiting)
    }

    pub fn next_token_id(&self) -> TokenId {
        self.patients.len() as TokenId + 1
    }

    pub fn patient(&self, token_id: TokenId) -> Option<&Booking> {
        self.patients.iter().find(|p| p.id == token_id)
    }

    pub fn patient_mut(&mut self, token_id: TokenId) -> Option<&mut Booking> {
        self.patients.iter_mut().find(|p| p.id == token_id)
    }

    /// True once every slot of the session has been consumed by a completion.
    pub fn is_session_complete(&self) -> bool {
        self.stats.completed >= self.max_patients
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub session_name: Option<String>,
    pub mode: SessionMode,
    /// Patient count for `count` mode. Ignored in `time` mode.
    pub limit: Option<u32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub avg_time: Option<u32>,
    pub buffer_time: Option<u32>,
}

impl CreateDoctorRequest {
    pub fn count(name: impl Into<String>, limit: u32) -> Self {
        Self {
            name: name.into(),
            session_name: None,
            mode: SessionMode::Count,
            limit: Some(limit),
            start_time: None,
            end_time: None,
            avg_time: None,
            buffer_time: None,
        }
    }

    pub fn time(name: impl Into<String>, start_time: &str, end_time: &str) -> Self {
        Self {
            name: name.into(),
            session_name: None,
            mode: SessionMode::Time,
            limit: None,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            avg_time: None,
            buffer_time: None,
        }
    }

    pub fn with_timing(mut self, avg_time: u32, buffer_time: u32) -> Self {
        self.avg_time = Some(avg_time);
        self.buffer_time = Some(buffer_time);
        self
    }

    pub fn with_start_time(mut self, start_time: &str) -> Self {
        self.start_time = Some(start_time.to_string());
        self
    }

    pub fn with_session_name(mut self, session_name: &str) -> Self {
        self.session_name = Some(session_name.to_string());
        self
    }
}
