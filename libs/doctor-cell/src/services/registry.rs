use serde::{Deserialize, Serialize};

use crate::models::{Doctor, DoctorId};

/// Read access to doctor records, plus mutable access to one doctor's
/// patient list for the queue engine.
pub trait DoctorRegistry {
    fn doctor(&self, id: DoctorId) -> Option<&Doctor>;

    fn doctor_mut(&mut self, id: DoctorId) -> Option<&mut Doctor>;

    /// Active doctors in registration order.
    fn active_doctors(&self) -> Vec<&Doctor>;

    fn first_active(&self) -> Option<&Doctor> {
        self.active_doctors().into_iter().next()
    }
}

/// Doctors in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorRoster {
    doctors: Vec<Doctor>,
}

impl DoctorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, doctor: Doctor) {
        self.doctors.push(doctor);
    }

    /// Hard delete. Returns the removed record, patients included.
    pub fn remove(&mut self, id: DoctorId) -> Option<Doctor> {
        let index = self.doctors.iter().position(|d| d.id == id)?;
        Some(self.doctors.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter()
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

impl DoctorRegistry for DoctorRoster {
    fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    fn doctor_mut(&mut self, id: DoctorId) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == id)
    }

    fn active_doctors(&self) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| d.active).collect()
    }
}
