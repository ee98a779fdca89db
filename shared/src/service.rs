//! Appointment lifecycle: book, check, cancel, reschedule, list.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentDetails, AppointmentUpdate};
use crate::store::AppointmentStore;
use crate::Result;

/// Book/check/cancel/reschedule over a record store.
///
/// Not-found is reported as `None`/`false`. Any `Err` is a storage fault.
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    /// Serializes read-modify-write operations so concurrent reschedules cannot lose updates.
    write_lock: Arc<Mutex<()>>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create an appointment under a freshly generated id.
    pub async fn book(&self, details: AppointmentDetails) -> Result<String> {
        let appointment = Appointment {
            appointment_id: Uuid::new_v4().to_string(),
            name: details.name,
            date: details.date,
            time: details.time,
            service: details.service,
        };

        self.store.insert(&appointment).await?;
        info!(appointment_id = %appointment.appointment_id, "appointment booked");

        Ok(appointment.appointment_id)
    }

    /// Look up an appointment's details.
    pub async fn check(&self, appointment_id: &str) -> Result<Option<AppointmentDetails>> {
        let appointment = self.store.get(appointment_id).await?;
        debug!(appointment_id, found = appointment.is_some(), "appointment checked");
        Ok(appointment.as_ref().map(Appointment::details))
    }

    /// Delete an appointment. Returns `false` without mutating anything if it does not exist.
    pub async fn cancel(&self, appointment_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        if self.store.get(appointment_id).await?.is_none() {
            return Ok(false);
        }

        let deleted = self.store.delete(appointment_id).await?;
        info!(appointment_id, "appointment cancelled");
        Ok(deleted)
    }

    /// Merge the supplied fields into an existing appointment.
    ///
    /// Returns all four resulting fields, changed or not, or `None` if the id is unknown.
    pub async fn reschedule(
        &self,
        appointment_id: &str,
        update: AppointmentUpdate,
    ) -> Result<Option<AppointmentDetails>> {
        let _guard = self.write_lock.lock().await;

        let Some(mut appointment) = self.store.get(appointment_id).await? else {
            return Ok(None);
        };

        appointment.apply(update);
        if !self.store.update(&appointment).await? {
            return Ok(None);
        }

        info!(appointment_id, "appointment rescheduled");
        Ok(Some(appointment.details()))
    }

    /// Every stored appointment.
    pub async fn list(&self) -> Result<Vec<Appointment>> {
        self.store.list_all().await
    }
}

impl std::fmt::Debug for AppointmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentService").finish_non_exhaustive()
    }
}
