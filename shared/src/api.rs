//! Request routing for the appointments API.
//!
//! Endpoints (an `/api` stage prefix is stripped first):
//! - POST /book - Book an appointment
//! - GET /appointments - List appointments
//! - POST /check, GET /appointments/{id} - Check an appointment
//! - POST /cancel, DELETE /appointments/{id} - Cancel an appointment
//! - POST /reschedule, PATCH /appointments/{id} - Reschedule an appointment

use std::sync::Arc;

use lambda_http::{Body, Request, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::auth::AccessGate;
use crate::http::{error_response, json_response, parse_json_body, preflight_response};
use crate::models::{
    AppointmentIdRequest, AppointmentUpdate, BookRequest, BookResponse, CheckResponse,
    MessageResponse, RescheduleRequest, RescheduleResponse,
};
use crate::service::AppointmentService;
use crate::store::{AppointmentStore, MemoryStore, SqliteStore};
use crate::{db, Config, Result};

const NOT_FOUND_MESSAGE: &str = "Appointment not found.";

/// Application state shared across requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: AppointmentService,
    pub gate: AccessGate,
}

impl AppState {
    /// Open the configured store and build the service and gate around it.
    pub async fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn AppointmentStore> = if config.uses_memory_store() {
            info!("using in-memory appointment store");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(SqliteStore::new(db::connect(config).await?))
        };

        Ok(Self::with_store(store, &config.secret_token))
    }

    pub fn with_store(store: Arc<dyn AppointmentStore>, secret_token: &str) -> Self {
        Self {
            service: AppointmentService::new(store),
            gate: AccessGate::new(secret_token),
        }
    }
}

/// Status code and JSON body produced by a route.
type Outcome = (u16, Value);

fn outcome<T: Serialize>(status: u16, body: &T) -> Result<Outcome> {
    Ok((status, serde_json::to_value(body)?))
}

pub async fn handler(
    state: Arc<AppState>,
    event: Request,
) -> std::result::Result<Response<Body>, lambda_http::Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Appointments request: {} {}", method, path);

    if method == "OPTIONS" {
        return preflight_response();
    }

    let authorization = event
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());
    if let Err(e) = state.gate.authorize(authorization) {
        warn!("Rejected {} {}: {}", method, path, e);
        return error_response(e.status_code(), e.public_message());
    }

    match route(&state.service, method, path, event.body()).await {
        Ok((status, body)) => json_response(status, &body),
        Err(e) => {
            if e.status_code() >= 500 {
                error!("{} {} failed: {}", method, path, e);
            }
            error_response(e.status_code(), e.public_message())
        }
    }
}

async fn route(service: &AppointmentService, method: &str, path: &str, body: &Body) -> Result<Outcome> {
    match (method, path) {
        ("POST", "/book") => {
            let request: BookRequest = parse_json_body(body)?;
            book(service, request).await
        }

        ("GET", "/appointments") => {
            let appointments = service.list().await?;
            outcome(200, &appointments)
        }

        ("POST", "/check") => {
            let request: AppointmentIdRequest = parse_json_body(body)?;
            check(service, &request.appointment_id).await
        }

        ("POST", "/cancel") => {
            let request: AppointmentIdRequest = parse_json_body(body)?;
            cancel(service, &request.appointment_id).await
        }

        ("POST", "/reschedule") => {
            let request: RescheduleRequest = parse_json_body(body)?;
            reschedule(service, &request.appointment_id, request.update).await
        }

        _ => match appointment_id_from_path(path) {
            Some(id) if method == "GET" => check(service, id).await,
            Some(id) if method == "DELETE" => cancel(service, id).await,
            Some(id) if method == "PATCH" => {
                let update: AppointmentUpdate = parse_json_body(body)?;
                reschedule(service, id, update).await
            }
            _ => outcome(404, &MessageResponse::error("Not found")),
        },
    }
}

/// `/appointments/{id}` with a single non-empty segment.
fn appointment_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix("/appointments/")
        .filter(|id| !id.is_empty() && !id.contains('/'))
}

async fn book(service: &AppointmentService, request: BookRequest) -> Result<Outcome> {
    let appointment_id = service.book(request).await?;
    outcome(
        200,
        &BookResponse {
            success: true,
            message: "Appointment booked successfully.".to_string(),
            appointment_id,
        },
    )
}

async fn check(service: &AppointmentService, appointment_id: &str) -> Result<Outcome> {
    let response = match service.check(appointment_id).await? {
        Some(details) => CheckResponse {
            success: true,
            message: "Appointment found.".to_string(),
            appointment_details: Some(details),
        },
        None => CheckResponse {
            success: false,
            message: NOT_FOUND_MESSAGE.to_string(),
            appointment_details: None,
        },
    };
    outcome(200, &response)
}

async fn cancel(service: &AppointmentService, appointment_id: &str) -> Result<Outcome> {
    let response = if service.cancel(appointment_id).await? {
        MessageResponse::ok("Appointment cancelled successfully.")
    } else {
        MessageResponse::error(NOT_FOUND_MESSAGE)
    };
    outcome(200, &response)
}

async fn reschedule(
    service: &AppointmentService,
    appointment_id: &str,
    update: AppointmentUpdate,
) -> Result<Outcome> {
    let response = match service.reschedule(appointment_id, update).await? {
        Some(details) => RescheduleResponse {
            success: true,
            message: "Appointment rescheduled successfully.".to_string(),
            updated_details: Some(details),
        },
        None => RescheduleResponse {
            success: false,
            message: NOT_FOUND_MESSAGE.to_string(),
            updated_details: None,
        },
    };
    outcome(200, &response)
}
