//! Bearer token access gate.

use subtle::ConstantTimeEq;

use crate::{Error, Result};

/// Checks the `Authorization` header against the single configured secret.
#[derive(Clone)]
pub struct AccessGate {
    /// Full expected header value, `Bearer <secret>`
    expected: String,
}

impl AccessGate {
    /// Create a gate for the given secret.
    pub fn new(secret: &str) -> Self {
        Self {
            expected: format!("Bearer {}", secret),
        }
    }

    /// Allow the request iff the header equals `Bearer <secret>` exactly.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<()> {
        let header = authorization
            .ok_or_else(|| Error::Unauthorized("Missing Authorization header".to_string()))?;

        if constant_time_str_eq(header, &self.expected) {
            Ok(())
        } else {
            Err(Error::Unauthorized("Invalid bearer token".to_string()))
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

/// Constant-time comparison of two strings.
fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
