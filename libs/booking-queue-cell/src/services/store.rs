use std::sync::Arc;

use tracing::{debug, error, info};

use shared_database::BlobStore;

use crate::{ClinicState, QueueError, UserSession};

pub const STATE_KEY: &str = "qs_data_v4";
pub const SESSION_KEY: &str = "qs_user_session_v4";

/// Owns the in-memory clinic state and its persisted copy.
///
/// Mutations go through [`ClinicStore::begin`], which hands out a working copy;
/// only [`Transaction::commit`] writes it back and makes it visible.
pub struct ClinicStore {
    blobs: Arc<dyn BlobStore>,
    state: ClinicState,
}

impl ClinicStore {
    pub fn open(blobs: Arc<dyn BlobStore>) -> Result<Self, QueueError> {
        let state = Self::load_state(blobs.as_ref())?;
        info!(
            "Clinic state loaded: {} doctors, {} pharmacy and {} billing tickets",
            state.doctors.len(),
            state.queues.pharmacy.tickets.len(),
            state.queues.billing.tickets.len()
        );
        Ok(Self { blobs, state })
    }

    pub fn state(&self) -> &ClinicState {
        &self.state
    }

    pub fn begin(&mut self) -> Transaction<'_> {
        let working = self.state.clone();
        Transaction { store: self, working }
    }

    /// Discard the in-memory state and read the persisted copy again.
    pub fn reload(&mut self) -> Result<(), QueueError> {
        self.state = Self::load_state(self.blobs.as_ref())?;
        Ok(())
    }

    pub fn load_session(&self) -> Result<Option<UserSession>, QueueError> {
        match self.blobs.load(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn save_session(&self, session: &UserSession) -> Result<(), QueueError> {
        let raw = serde_json::to_string(session)?;
        self.blobs.save(SESSION_KEY, &raw)?;
        Ok(())
    }

    pub fn clear_session(&self) -> Result<(), QueueError> {
        self.blobs.remove(SESSION_KEY)?;
        Ok(())
    }

    /// Drop every doctor, ticket and the user session.
    pub fn reset(&mut self) -> Result<(), QueueError> {
        let mut tx = self.begin();
        *tx.state_mut() = ClinicState::default();
        tx.commit()?;

        self.clear_session()?;

        info!("Clinic state reset");
        Ok(())
    }

    fn load_state(blobs: &dyn BlobStore) -> Result<ClinicState, QueueError> {
        match blobs.load(STATE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                error!("Stored clinic state is unreadable: {}", e);
                QueueError::SerializationError(e)
            }),
            None => {
                debug!("No stored clinic state, starting empty");
                Ok(ClinicState::default())
            }
        }
    }
}

pub struct Transaction<'a> {
    store: &'a mut ClinicStore,
    working: ClinicState,
}

impl Transaction<'_> {
    pub fn state(&self) -> &ClinicState {
        &self.working
    }

    pub fn state_mut(&mut self) -> &mut ClinicState {
        &mut self.working
    }

    /// Persist the working copy, then publish it. On error nothing changes.
    pub fn commit(self) -> Result<(), QueueError> {
        let raw = serde_json::to_string(&self.working)?;
        self.store.blobs.save(STATE_KEY, &raw).map_err(|e| {
            error!("Failed to save clinic state: {}", e);
            QueueError::from(e)
        })?;
        self.store.state = self.working;
        Ok(())
    }
}
