//! Enrollment orchestrator.
//!
//! Drives the end-to-end workflow against a [`Gateway`]:
//!
//! ```text
//! Connect → Enumerate → Allocate → Validate → Write → Verify → Disconnect → Report
//! ```
//!
//! A fatal failure in any step skips the remaining steps but always
//! performs the disconnect if a session was opened, so the terminal is
//! never left holding an orphaned session. Enumeration and verification
//! problems are downgraded to warnings; nothing is retried.

use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, error, info, warn};
use zkenroll_core::{Result, UserId, UserRecord, error::Error, truncate_name};
use zkenroll_device::{DeviceSession, Gateway};

use crate::allocator;
use crate::outcome::{Diagnostics, EnrolledUser, EnrollmentOutcome, RequestEcho};
use crate::request::{EnrollmentRequest, coerce_preferred_uid, coerce_privilege};

/// Workflow phases, used for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Connect,
    Enumerate,
    Allocate,
    Validate,
    Write,
    Verify,
    Disconnect,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Connect => "connect",
            Phase::Enumerate => "enumerate",
            Phase::Allocate => "allocate",
            Phase::Validate => "validate",
            Phase::Write => "write",
            Phase::Verify => "verify",
            Phase::Disconnect => "disconnect",
        };
        write!(f, "{name}")
    }
}

/// Run one enrollment against the given gateway.
///
/// Opens exactly one session and closes it exactly once on every path
/// reached after a successful connect. Always returns an outcome; errors
/// are reported through the payload, never raised past this boundary.
pub async fn enroll<G: Gateway>(gateway: &G, request: &EnrollmentRequest) -> EnrollmentOutcome {
    let echo = RequestEcho::from_request(request);
    let mut details = Diagnostics::default();

    debug!(phase = %Phase::Connect, endpoint = %request.device.endpoint(), "opening terminal session");
    let mut session = match gateway.connect(&request.device).await {
        Ok(session) => session,
        Err(cause) => {
            error!(phase = %Phase::Connect, error = %cause, "could not establish terminal session");
            let failure = Error::ConnectionFailed(cause.to_string());
            return EnrollmentOutcome::failure(&failure, echo, details);
        }
    };
    info!(endpoint = %request.device.endpoint(), "connected to terminal");

    let result = run_workflow(&mut session, request, &mut details).await;

    debug!(phase = %Phase::Disconnect, "closing terminal session");
    match session.disconnect().await {
        Ok(()) => info!("terminal session closed"),
        Err(cause) => warn!(error = %cause, "error while closing terminal session"),
    }

    match result {
        Ok(user) => EnrollmentOutcome::success(user),
        Err(failure) => {
            error!(error = %failure, error_type = failure.kind(), "enrollment failed");
            EnrollmentOutcome::failure(&failure, echo, details)
        }
    }
}

/// Steps 2-6 of the workflow, run inside an open session.
///
/// `details` is filled in as fields are computed so a failure payload can
/// report everything validated before the abort.
async fn run_workflow<S: DeviceSession>(
    session: &mut S,
    request: &EnrollmentRequest,
    details: &mut Diagnostics,
) -> Result<EnrolledUser> {
    // Enumerate. A terminal that refuses to list users is treated as
    // empty: enrollment proceeds optimistically and the condition is
    // surfaced as a warning, not a failure.
    debug!(phase = %Phase::Enumerate, "requesting existing user records");
    let existing: BTreeSet<u16> = match session.list_users().await {
        Ok(users) => {
            let uids: BTreeSet<u16> = users.iter().map(|user| user.uid.get()).collect();
            info!(count = uids.len(), "found existing users on terminal");
            uids
        }
        Err(cause) => {
            warn!(phase = %Phase::Enumerate, error = %cause, "could not enumerate existing users, assuming empty device");
            BTreeSet::new()
        }
    };

    // Allocate.
    debug!(phase = %Phase::Allocate, preferred = %request.preferred_uid, "allocating device slot");
    let preferred = coerce_preferred_uid(&request.preferred_uid)?;
    let uid = allocator::allocate(&existing, preferred)?;
    details.final_uid = Some(uid);

    // Validate and build the record. Field order mirrors the failure
    // diagnostics: privilege and name are recorded even when the user id
    // turns out to be invalid.
    debug!(phase = %Phase::Validate, "validating caller-supplied fields");
    let privilege = coerce_privilege(request.privilege.as_deref())?;
    details.final_privilege = Some(privilege);

    let name = truncate_name(&request.name);
    details.final_name = Some(name.clone());

    let user_id = UserId::new(&request.user_id)?;
    details.final_user_id = Some(user_id.clone());

    let record = UserRecord::new(uid, &name, user_id)
        .with_privilege(privilege)
        .with_password(request.password.clone().unwrap_or_default());

    // Write.
    info!(
        phase = %Phase::Write,
        uid = %record.uid,
        name = %record.name,
        user_id = %record.user_id,
        privilege = record.privilege,
        "creating user on terminal"
    );
    session
        .write_user(&record)
        .await
        .map_err(|cause| Error::WriteFailed(cause.to_string()))?;
    info!(uid = %record.uid, "user record written");

    // Verify, best-effort: absence or mismatch warns but never fails.
    debug!(phase = %Phase::Verify, uid = %record.uid, "reading record back for verification");
    match session.read_user(record.uid).await {
        Ok(Some(stored)) => {
            if stored.uid == record.uid
                && stored.name == record.name
                && stored.user_id == record.user_id
            {
                info!(uid = %stored.uid, name = %stored.name, "user verified on terminal");
            } else {
                warn!(
                    phase = %Phase::Verify,
                    expected_uid = %record.uid,
                    stored_uid = %stored.uid,
                    "read-back record does not match written record"
                );
            }
        }
        Ok(None) => {
            warn!(phase = %Phase::Verify, uid = %record.uid, "could not verify user creation: record absent")
        }
        Err(cause) => {
            warn!(phase = %Phase::Verify, error = %cause, "could not verify user creation")
        }
    }

    Ok(EnrolledUser {
        uid,
        name: record.name,
        user_id: record.user_id,
        privilege,
        original_uid: preferred,
        uid_changed: uid.get() != preferred,
    })
}
