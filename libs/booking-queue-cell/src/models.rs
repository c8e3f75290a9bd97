use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use doctor_cell::{Booking, Doctor, DoctorId, DoctorRoster, SessionMode, TokenId};
use shared_utils::time::hh_mm;

use crate::QueueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueType {
    Consultation,
    Pharmacy,
    Billing,
}

impl QueueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueType::Consultation => "consultation",
            QueueType::Pharmacy => "pharmacy",
            QueueType::Billing => "billing",
        }
    }
}

impl FromStr for QueueType {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consultation" => Ok(QueueType::Consultation),
            "pharmacy" => Ok(QueueType::Pharmacy),
            "billing" => Ok(QueueType::Billing),
            _ => Err(QueueError::QueueTypeInvalid(s.to_string())),
        }
    }
}

impl fmt::Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Waiting,
    Completed,
}

/// Plain sequential ticket for the pharmacy and billing counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterTicket {
    pub id: u32,
    pub name: String,
    pub queue_type: QueueType,
    pub status: TicketStatus,
    pub booking_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterQueue {
    /// Ticket number currently being served, 0 before the first call.
    pub current: u32,
    /// Last ticket number handed out.
    pub last: u32,
    pub tickets: Vec<CounterTicket>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterQueues {
    #[serde(default)]
    pub pharmacy: CounterQueue,
    #[serde(default)]
    pub billing: CounterQueue,
}

impl CounterQueues {
    pub fn get(&self, queue_type: QueueType) -> Option<&CounterQueue> {
        match queue_type {
            QueueType::Pharmacy => Some(&self.pharmacy),
            QueueType::Billing => Some(&self.billing),
            QueueType::Consultation => None,
        }
    }

    pub fn get_mut(&mut self, queue_type: QueueType) -> Option<&mut CounterQueue> {
        match queue_type {
            QueueType::Pharmacy => Some(&mut self.pharmacy),
            QueueType::Billing => Some(&mut self.billing),
            QueueType::Consultation => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterStats {
    pub queue_type: QueueType,
    pub current: u32,
    pub last: u32,
    pub waiting: usize,
    pub tickets: Vec<CounterTicket>,
}

/// Everything persisted under the state key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicState {
    #[serde(default)]
    pub doctors: DoctorRoster,
    #[serde(default)]
    pub queues: CounterQueues,
}

/// The last token booked from this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub token: u32,
    pub name: String,
    pub queue_type: QueueType,
    pub doctor_id: Option<DoctorId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TokenReceipt {
    Consultation(Booking),
    Counter(CounterTicket),
}

impl TokenReceipt {
    pub fn token_id(&self) -> u32 {
        match self {
            TokenReceipt::Consultation(booking) => booking.id,
            TokenReceipt::Counter(ticket) => ticket.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TokenReceipt::Consultation(booking) => &booking.name,
            TokenReceipt::Counter(ticket) => &ticket.name,
        }
    }

    pub fn queue_type(&self) -> QueueType {
        match self {
            TokenReceipt::Consultation(_) => QueueType::Consultation,
            TokenReceipt::Counter(ticket) => ticket.queue_type,
        }
    }

    pub fn doctor_id(&self) -> Option<DoctorId> {
        match self {
            TokenReceipt::Consultation(booking) => Some(booking.doctor_id),
            TokenReceipt::Counter(_) => None,
        }
    }

    pub fn to_session(&self) -> UserSession {
        UserSession {
            token: self.token_id(),
            name: self.name().to_string(),
            queue_type: self.queue_type(),
            doctor_id: self.doctor_id(),
        }
    }
}

/// Dashboard view of one doctor's session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorStatsView {
    pub name: String,
    pub session_name: String,
    pub max_patients: u32,
    pub completed: u32,
    pub no_show: u32,
    pub allocated_count: usize,
    pub waiting_count: usize,
    pub patients: Vec<Booking>,
    pub mode: SessionMode,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    pub avg_time: u32,
    pub buffer_time: u32,
}

impl From<&Doctor> for DoctorStatsView {
    fn from(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            session_name: doctor.session_name.clone(),
            max_patients: doctor.max_patients,
            completed: doctor.stats.completed,
            no_show: doctor.stats.no_show,
            allocated_count: doctor.allocated_count(),
            waiting_count: doctor.waiting_count(),
            patients: doctor.patients.clone(),
            mode: doctor.mode,
            start_time: doctor.start_time,
            avg_time: doctor.avg_time,
            buffer_time: doctor.buffer_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTokenRequest {
    pub name: String,
    pub doctor_id: Option<DoctorId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPath {
    pub doctor_id: DoctorId,
    pub token_id: TokenId,
}
