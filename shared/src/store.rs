//! Record store for appointments.
//!
//! `SqliteStore` is the durable store backed by the `appointments` table.
//! `MemoryStore` keeps records in process and backs tests and ephemeral runs.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::models::Appointment;
use crate::{Error, Result};

/// Keyed persistence of appointment records.
///
/// Lookups by id report absence through `Option`/`bool`; only storage faults are errors.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Store a new record. The id must not already exist.
    async fn insert(&self, appointment: &Appointment) -> Result<()>;

    /// Fetch a record by id.
    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>>;

    /// All records, in storage order.
    async fn list_all(&self) -> Result<Vec<Appointment>>;

    /// Replace the mutable fields of an existing record. Returns `false` if absent.
    async fn update(&self, appointment: &Appointment) -> Result<bool>;

    /// Remove a record. Returns `false` if absent.
    async fn delete(&self, appointment_id: &str) -> Result<bool>;

    /// Number of stored records.
    async fn count(&self) -> Result<i64>;
}

/// sqlite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AppointmentStore for SqliteStore {
    async fn insert(&self, appointment: &Appointment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appointments (appointment_id, name, date, time, service)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&appointment.appointment_id)
        .bind(&appointment.name)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.service)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT appointment_id, name, date, time, service
            FROM appointments
            WHERE appointment_id = ?1
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn list_all(&self) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT appointment_id, name, date, time, service
            FROM appointments
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    async fn update(&self, appointment: &Appointment) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET name = ?2, date = ?3, time = ?4, service = ?5
            WHERE appointment_id = ?1
            "#,
        )
        .bind(&appointment.appointment_id)
        .bind(&appointment.name)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.service)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, appointment_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE appointment_id = ?1")
            .bind(appointment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// In-process store keeping insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Appointment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn insert(&self, appointment: &Appointment) -> Result<()> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.appointment_id == appointment.appointment_id)
        {
            return Err(Error::Internal(format!(
                "Duplicate appointment id {}",
                appointment.appointment_id
            )));
        }
        records.push(appointment.clone());
        Ok(())
    }

    async fn get(&self, appointment_id: &str) -> Result<Option<Appointment>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.appointment_id == appointment_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Appointment>> {
        Ok(self.records.read().await.clone())
    }

    async fn update(&self, appointment: &Appointment) -> Result<bool> {
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|r| r.appointment_id == appointment.appointment_id)
        {
            Some(stored) => {
                *stored = appointment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, appointment_id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.appointment_id != appointment_id);
        Ok(records.len() < before)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.records.read().await.len() as i64)
    }
}
