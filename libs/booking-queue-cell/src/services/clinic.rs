use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use doctor_cell::{Booking, CreateDoctorRequest, Doctor, DoctorId, DoctorRegistry, DoctorService, TokenId};
use shared_config::AppConfig;
use shared_database::BlobStore;

use crate::services::{
    booking::BookingGateway, counter::CounterQueueService, store::ClinicStore,
    transitions::StatusTransitionHandler,
};
use crate::{
    ClinicState, CounterStats, CounterTicket, DoctorStatsView, QueueError, QueueType, TokenReceipt,
    UserSession,
};

/// One service instance behind one lock serialises every read-modify-write.
pub type SharedClinic = Arc<Mutex<ClinicQueueService>>;

/// Entry point for every queue operation. Each mutating call runs inside a
/// store transaction and is persisted before it returns.
pub struct ClinicQueueService {
    store: ClinicStore,
    doctors: DoctorService,
}

impl ClinicQueueService {
    pub fn new(config: &AppConfig, blobs: Arc<dyn BlobStore>) -> Result<Self, QueueError> {
        Ok(Self {
            store: ClinicStore::open(blobs)?,
            doctors: DoctorService::new(config),
        })
    }

    pub fn into_shared(self) -> SharedClinic {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> &ClinicState {
        self.store.state()
    }

    // Doctor registry

    pub fn create_doctor(&mut self, request: CreateDoctorRequest) -> Result<Doctor, QueueError> {
        let doctor = self.doctors.create_doctor(request)?;

        let mut tx = self.store.begin();
        tx.state_mut().doctors.add(doctor.clone());
        tx.commit()?;

        info!("Doctor {} registered with {} slots", doctor.id, doctor.max_patients);
        Ok(doctor)
    }

    pub fn list_active_doctors(&self) -> Vec<Doctor> {
        self.state().doctors.active_doctors().into_iter().cloned().collect()
    }

    pub fn delete_doctor(&mut self, doctor_id: DoctorId) -> Result<(), QueueError> {
        let mut tx = self.store.begin();
        tx.state_mut()
            .doctors
            .remove(doctor_id)
            .ok_or(QueueError::DoctorNotFound(doctor_id))?;
        tx.commit()?;

        info!("Doctor {} deleted", doctor_id);
        Ok(())
    }

    pub fn doctor_stats(&self, doctor_id: DoctorId) -> Option<DoctorStatsView> {
        self.state().doctors.doctor(doctor_id).map(DoctorStatsView::from)
    }

    // Booking

    pub fn book_consultation(&mut self, name: &str, doctor_id: Option<DoctorId>) -> Result<Booking, QueueError> {
        let mut tx = self.store.begin();
        let booking = BookingGateway::book_consultation(&mut tx.state_mut().doctors, name, doctor_id)?;
        tx.commit()?;

        self.store
            .save_session(&TokenReceipt::Consultation(booking.clone()).to_session())?;
        Ok(booking)
    }

    /// Book on any queue by name. `doctor_id` only applies to consultations.
    pub fn book_token(
        &mut self,
        name: &str,
        queue_type: &str,
        doctor_id: Option<DoctorId>,
    ) -> Result<TokenReceipt, QueueError> {
        let queue_type: QueueType = queue_type.parse()?;

        if queue_type == QueueType::Consultation {
            return self.book_consultation(name, doctor_id).map(TokenReceipt::Consultation);
        }

        let mut tx = self.store.begin();
        let ticket = CounterQueueService::book(&mut tx.state_mut().queues, queue_type, name)?;
        tx.commit()?;

        let receipt = TokenReceipt::Counter(ticket);
        self.store.save_session(&receipt.to_session())?;
        Ok(receipt)
    }

    // Status transitions

    pub fn mark_completed(&mut self, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError> {
        let mut tx = self.store.begin();
        let booking = StatusTransitionHandler::mark_completed(&mut tx.state_mut().doctors, doctor_id, token_id)?;
        tx.commit()?;
        Ok(booking)
    }

    pub fn mark_no_show(&mut self, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError> {
        let mut tx = self.store.begin();
        let booking = StatusTransitionHandler::mark_no_show(&mut tx.state_mut().doctors, doctor_id, token_id)?;
        tx.commit()?;
        Ok(booking)
    }

    pub fn cancel(&mut self, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError> {
        let mut tx = self.store.begin();
        let booking = StatusTransitionHandler::cancel(&mut tx.state_mut().doctors, doctor_id, token_id)?;
        tx.commit()?;
        Ok(booking)
    }

    /// Patient walks away: record a no-show, then forget their session.
    pub fn leave_queue(&mut self, doctor_id: DoctorId, token_id: TokenId) -> Result<Booking, QueueError> {
        let booking = self.mark_no_show(doctor_id, token_id)?;
        self.store.clear_session()?;
        debug!("Session cleared after token {} left doctor {}", token_id, doctor_id);
        Ok(booking)
    }

    // Counter queues

    pub fn advance_counter(&mut self, queue_type: &str) -> Result<Option<CounterTicket>, QueueError> {
        let queue_type: QueueType = queue_type.parse()?;

        let mut tx = self.store.begin();
        let served = CounterQueueService::advance(&mut tx.state_mut().queues, queue_type)?;
        tx.commit()?;
        Ok(served)
    }

    pub fn counter_stats(&self, queue_type: &str) -> Result<CounterStats, QueueError> {
        let queue_type: QueueType = queue_type.parse()?;
        CounterQueueService::stats(&self.state().queues, queue_type)
    }

    // Session and maintenance

    pub fn current_session(&self) -> Result<Option<UserSession>, QueueError> {
        self.store.load_session()
    }

    pub fn reset_system(&mut self) -> Result<(), QueueError> {
        self.store.reset()
    }

    pub fn reload(&mut self) -> Result<(), QueueError> {
        self.store.reload()
    }
}
