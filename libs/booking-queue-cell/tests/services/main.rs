use std::sync::Arc;

use booking_queue_cell::*;
use doctor_cell::{CreateDoctorRequest, Doctor, DoctorId, DoctorRegistry, TokenStatus};
use shared_config::AppConfig;
use shared_database::{BlobStore, MemoryBlobStore};
use shared_utils::test_utils::TestConfig;

/// Test utilities for queue services backed by an in-memory blob store
pub struct ClinicTestUtils {
    pub blobs: Arc<MemoryBlobStore>,
    pub config: AppConfig,
}

impl ClinicTestUtils {
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(MemoryBlobStore::new()),
            config: TestConfig::default().to_app_config(),
        }
    }

    pub fn store(&self) -> Arc<dyn BlobStore> {
        self.blobs.clone()
    }

    /// A fresh service over the same blob store, as after a process restart
    pub fn service(&self) -> ClinicQueueService {
        ClinicQueueService::new(&self.config, self.store()).expect("Failed to open clinic service")
    }

    /// Register a count-mode doctor with the given capacity and timing
    pub fn add_doctor(&self, service: &mut ClinicQueueService, max_patients: u32, avg: u32, buffer: u32) -> DoctorId {
        let request = CreateDoctorRequest::count("Dr. Test", max_patients).with_timing(avg, buffer);
        service.create_doctor(request).expect("Failed to create doctor").id
    }
}

pub fn doctor<'a>(service: &'a ClinicQueueService, doctor_id: DoctorId) -> &'a Doctor {
    service
        .state()
        .doctors
        .doctor(doctor_id)
        .expect("Doctor should exist")
}

/// Check the capacity and waiting-list invariants plus allocation fairness
pub fn assert_queue_invariants(service: &ClinicQueueService, doctor_id: DoctorId) {
    let d = doctor(service, doctor_id);
    let allocated = d.allocated_count() as u32;
    let completed = d.count_with_status(TokenStatus::Completed) as u32;

    assert!(
        allocated + completed <= d.max_patients,
        "allocated {} + completed {} exceeds capacity {}",
        allocated,
        completed,
        d.max_patients
    );
    assert!(d.waiting_count() <= MAX_WAITING_LIST, "waiting list over cap");
    assert!(d.patients.iter().all(|p| p.status != TokenStatus::Pending));

    let arrivals: Vec<_> = d
        .patients
        .iter()
        .filter(|p| p.status == TokenStatus::Allocated)
        .map(|p| p.arrival_value)
        .collect();
    assert!(arrivals.windows(2).all(|w| w[0] <= w[1]), "allocated arrivals out of booking order");
}

mod booking_test;
mod transitions_test;
