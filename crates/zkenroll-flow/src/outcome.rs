//! Structured enrollment outcome.
//!
//! One outcome is produced per invocation and serialized as a single JSON
//! line. The success and failure shapes are fixed contracts consumed by
//! the calling system; `details` fields that were never computed before a
//! failure serialize as `null`.

use serde::Serialize;
use zkenroll_core::{Uid, UserId, error::Error};

use crate::request::EnrollmentRequest;

/// Result of one enrollment run.
///
/// Serializes to either the success or the failure payload shape; the
/// `success` flag discriminates for consumers.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EnrollmentOutcome {
    Success(SuccessReport),
    Failure(FailureReport),
}

/// Payload emitted when enrollment completed.
#[derive(Debug, Serialize)]
pub struct SuccessReport {
    pub success: bool,
    pub message: String,
    pub user: EnrolledUser,
}

/// Summary of the record that now exists on the device.
#[derive(Debug, Clone, Serialize)]
pub struct EnrolledUser {
    pub uid: Uid,
    pub name: String,
    pub user_id: UserId,
    pub privilege: u8,
    /// The slot the caller originally asked for.
    pub original_uid: u16,
    /// Whether allocation moved the record off the caller's preference.
    pub uid_changed: bool,
}

/// Payload emitted when a fatal error aborted the workflow.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
    /// The caller's raw inputs, echoed for correlation.
    pub user: RequestEcho,
    pub error_type: String,
    pub details: Diagnostics,
}

/// Raw caller inputs echoed into a failure payload.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEcho {
    pub uid: String,
    pub name: String,
    pub user_id: String,
}

impl RequestEcho {
    /// Echo the identifying fields of a request.
    #[must_use]
    pub fn from_request(request: &EnrollmentRequest) -> Self {
        Self {
            uid: request.preferred_uid.clone(),
            name: request.name.clone(),
            user_id: request.user_id.clone(),
        }
    }

    /// Empty echo for failures raised before a request existed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            uid: String::new(),
            name: String::new(),
            user_id: String::new(),
        }
    }
}

/// Partially-validated fields computed before a failure.
///
/// Each field is populated as the corresponding workflow step completes;
/// anything still `None` at failure time serializes as `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub final_uid: Option<Uid>,
    pub final_name: Option<String>,
    pub final_user_id: Option<UserId>,
    pub final_privilege: Option<u8>,
}

impl EnrollmentOutcome {
    /// Build the success payload.
    #[must_use]
    pub fn success(user: EnrolledUser) -> Self {
        Self::Success(SuccessReport {
            success: true,
            message: format!("User {} created successfully", user.name),
            user,
        })
    }

    /// Build the failure payload for a fatal workflow error.
    #[must_use]
    pub fn failure(error: &Error, echo: RequestEcho, details: Diagnostics) -> Self {
        Self::Failure(FailureReport {
            success: false,
            error: error.to_string(),
            user: echo,
            error_type: error.kind().to_string(),
            details,
        })
    }

    /// Build the failure payload for a malformed invocation.
    #[must_use]
    pub fn usage_failure(message: impl Into<String>) -> Self {
        Self::failure(
            &Error::Usage(message.into()),
            RequestEcho::empty(),
            Diagnostics::default(),
        )
    }

    /// Whether this outcome reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Serialize to the single-line JSON payload.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
