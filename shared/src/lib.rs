//! Shared library for the appointment booking service.
//!
//! This crate provides the record store, the appointment service, the bearer token gate,
//! and the HTTP routing used by the appointments Lambda.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod secrets;
pub mod service;
pub mod store;

pub use api::{handler, AppState};
pub use auth::AccessGate;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Appointment, AppointmentDetails, AppointmentUpdate};
pub use secrets::{get_secret, parse_token_secret, resolve_secret_token};
pub use service::AppointmentService;
pub use store::{AppointmentStore, MemoryStore, SqliteStore};
