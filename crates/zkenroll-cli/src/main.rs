//! zkenroll - provision a single user on a networked enrollment terminal.
//!
//! # Invocation
//!
//! ```text
//! zkenroll <address> <port> <password> <timeout> <uid> <name> <user_id> [privilege] [user_password]
//! ```
//!
//! Exactly one JSON result line is written to stdout; all logs go to
//! stderr (`RUST_LOG` controls verbosity, default `info`). Exit code is 0
//! on success and 1 on any failure, including a malformed invocation.
//!
//! # Gateway Backend
//!
//! The vendor wire protocol is an external collaborator behind the
//! [`Gateway`](zkenroll_device::Gateway) trait. This binary currently
//! wires the in-memory terminal backend; real transports plug in by
//! implementing the trait.

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use zkenroll_device::{DeviceConfig, mock::MockTerminal};
use zkenroll_flow::{EnrollmentOutcome, EnrollmentRequest, enroll, request::parse_comm_key};

/// Provision a single user record on an enrollment terminal.
#[derive(Parser, Debug)]
#[command(name = "zkenroll")]
#[command(version, about, long_about = None)]
struct Args {
    /// Terminal network address
    address: String,

    /// Terminal TCP port
    port: u16,

    /// Communication key (digits) or the literal `None`
    password: String,

    /// I/O timeout in seconds
    timeout: u64,

    /// Preferred device slot for the new user
    uid: String,

    /// Display name (truncated to 24 characters)
    name: String,

    /// External identifier (digits only)
    user_id: String,

    /// Privilege level (0 = normal user)
    privilege: Option<String>,

    /// Optional user password
    user_password: Option<String>,
}

const USAGE: &str = "Usage: zkenroll <address> <port> <password> <timeout> <uid> <name> <user_id> [privilege] [user_password]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs must stay off stdout: the only stdout line is the result
    // payload.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(parse_error) => {
            use clap::error::ErrorKind;
            if matches!(
                parse_error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) {
                let _ = parse_error.print();
                return ExitCode::SUCCESS;
            }
            debug!(error = %parse_error, "invocation rejected");
            return emit(&EnrollmentOutcome::usage_failure(USAGE));
        }
    };

    let request = EnrollmentRequest {
        device: DeviceConfig {
            address: args.address,
            port: args.port,
            timeout: Duration::from_secs(args.timeout),
            comm_key: parse_comm_key(&args.password),
        },
        preferred_uid: args.uid,
        name: args.name,
        user_id: args.user_id,
        privilege: args.privilege,
        password: args.user_password,
    };

    let (terminal, _handle) = MockTerminal::new();
    let outcome = enroll(&terminal, &request).await;
    emit(&outcome)
}

/// Write the outcome as one UTF-8 JSON line on stdout and map it to the
/// process exit code.
fn emit(outcome: &EnrollmentOutcome) -> ExitCode {
    let line = match outcome.to_json() {
        Ok(line) => line,
        Err(serialize_error) => {
            error!(error = %serialize_error, "could not serialize outcome");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(write_error) = stdout
        .write_all(line.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
    {
        error!(error = %write_error, "could not write outcome to stdout");
        return ExitCode::FAILURE;
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_full_invocation() {
        let args = Args::try_parse_from([
            "zkenroll",
            "192.168.1.201",
            "4370",
            "None",
            "5",
            "3",
            "Maria Souza",
            "100234",
            "14",
            "4321",
        ])
        .unwrap();
        assert_eq!(args.address, "192.168.1.201");
        assert_eq!(args.port, 4370);
        assert_eq!(args.timeout, 5);
        assert_eq!(args.uid, "3");
        assert_eq!(args.privilege.as_deref(), Some("14"));
        assert_eq!(args.user_password.as_deref(), Some("4321"));
    }

    #[test]
    fn test_args_optional_fields_default_absent() {
        let args = Args::try_parse_from([
            "zkenroll",
            "192.168.1.201",
            "4370",
            "0",
            "5",
            "1",
            "Ana",
            "100",
        ])
        .unwrap();
        assert!(args.privilege.is_none());
        assert!(args.user_password.is_none());
    }

    #[test]
    fn test_args_reject_missing_required() {
        let result = Args::try_parse_from(["zkenroll", "192.168.1.201", "4370"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_reject_non_numeric_port() {
        let result = Args::try_parse_from([
            "zkenroll", "host", "port", "None", "5", "1", "Ana", "100",
        ]);
        assert!(result.is_err());
    }
}
