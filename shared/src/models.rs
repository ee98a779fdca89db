//! Appointment record and request/response payloads.

use serde::{Deserialize, Serialize};

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub appointment_id: String,
    pub name: String,
    pub date: String,
    pub time: String,
    pub service: String,
}

impl Appointment {
    /// The four caller-editable fields.
    pub fn details(&self) -> AppointmentDetails {
        AppointmentDetails {
            name: self.name.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            service: self.service.clone(),
        }
    }

    /// Field-level optional merge: supplied fields overwrite, omitted fields stay.
    pub fn apply(&mut self, update: AppointmentUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(service) = update.service {
            self.service = service;
        }
    }
}

/// Mutable fields of an appointment. `date` and `time` are opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub name: String,
    pub date: String,
    pub time: String,
    pub service: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppointmentUpdate {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
}

/// POST /book payload.
pub type BookRequest = AppointmentDetails;

/// POST /check and POST /cancel payload.
#[derive(Debug, Deserialize)]
pub struct AppointmentIdRequest {
    pub appointment_id: String,
}

/// POST /reschedule payload.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub appointment_id: String,
    #[serde(flatten)]
    pub update: AppointmentUpdate,
}

/// Book response.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub success: bool,
    pub message: String,
    pub appointment_id: String,
}

/// Check response; `appointment_details` is `null` when not found.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub success: bool,
    pub message: String,
    pub appointment_details: Option<AppointmentDetails>,
}

/// Reschedule response; `updated_details` echoes all four resulting fields.
#[derive(Debug, Serialize)]
pub struct RescheduleResponse {
    pub success: bool,
    pub message: String,
    pub updated_details: Option<AppointmentDetails>,
}

/// Bare outcome used by cancel and by every rejection.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Appointment {
        Appointment {
            appointment_id: "a-1".to_string(),
            name: "Alice".to_string(),
            date: "2024-12-24".to_string(),
            time: "10:00".to_string(),
            service: "Haircut".to_string(),
        }
    }

    #[test]
    fn test_apply_overwrites_only_supplied_fields() {
        let mut appointment = alice();
        appointment.apply(AppointmentUpdate {
            date: Some("2025-01-01".to_string()),
            ..Default::default()
        });

        assert_eq!(appointment.appointment_id, "a-1");
        assert_eq!(appointment.name, "Alice");
        assert_eq!(appointment.date, "2025-01-01");
        assert_eq!(appointment.time, "10:00");
        assert_eq!(appointment.service, "Haircut");
    }

    #[test]
    fn test_reschedule_request_flattens_optional_fields() {
        let request: RescheduleRequest =
            serde_json::from_str(r#"{"appointment_id":"a-1","time":"11:30"}"#).unwrap();
        assert_eq!(request.appointment_id, "a-1");
        assert_eq!(request.update.time.as_deref(), Some("11:30"));
        assert!(request.update.name.is_none());
        assert!(request.update.date.is_none());
        assert!(request.update.service.is_none());
    }

    #[test]
    fn test_not_found_details_serialize_as_null() {
        let body = serde_json::to_value(CheckResponse {
            success: false,
            message: "Appointment not found.".to_string(),
            appointment_details: None,
        })
        .unwrap();
        assert!(body["appointment_details"].is_null());
        assert!(body.as_object().unwrap().contains_key("appointment_details"));
    }

    #[test]
    fn test_book_request_requires_all_fields() {
        let result = serde_json::from_str::<BookRequest>(r#"{"name":"Alice","date":"d"}"#);
        assert!(result.is_err());
    }
}
