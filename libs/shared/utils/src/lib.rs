pub mod time;
pub mod test_utils;

pub use time::{minutes_to_time, time_to_minutes, ClockError};
