pub mod doctor;
pub mod registry;

pub use doctor::{derive_max_patients, DoctorService};
pub use registry::{DoctorRegistry, DoctorRoster};
