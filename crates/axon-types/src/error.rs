//! Unified error interface for AXON.
//!
//! Every public error enum in the workspace implements [`ErrorCode`]
//! so that log lines, tests and callers can treat errors uniformly:
//! a stable machine-readable code plus a recoverability hint.
//!
//! # Code Convention
//!
//! | Crate | Prefix |
//! |-------|--------|
//! | `axon-msgs` | `SPEC_` |
//! | `axon-client` | `CLIENT_` |
//!
//! # Example
//!
//! ```
//! use axon_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum WireError {
//!     Disconnected,
//!     BadFrame(String),
//! }
//!
//! impl ErrorCode for WireError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Disconnected => "WIRE_DISCONNECTED",
//!             Self::BadFrame(_) => "WIRE_BAD_FRAME",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         // Reconnecting may succeed; a malformed frame stays malformed.
//!         matches!(self, Self::Disconnected)
//!     }
//! }
//!
//! assert_eq!(WireError::Disconnected.code(), "WIRE_DISCONNECTED");
//! assert!(WireError::Disconnected.is_recoverable());
//! ```

/// Stable, machine-readable error classification.
///
/// # Code Format
///
/// - `UPPER_SNAKE_CASE`
/// - Prefixed with the owning domain (`SPEC_`, `CLIENT_`, ...)
/// - Never changes once published (treat a rename as a breaking change)
///
/// # Recoverability
///
/// `is_recoverable()` answers "could retrying, or waiting for the
/// server, make this go away?". A transport hiccup is recoverable; a
/// protocol violation or an API misuse is not - the input will be just
/// as wrong the next time.
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying or waiting may clear the error.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error's code follows the workspace conventions.
///
/// # Checks
///
/// 1. Code is non-empty
/// 2. Code starts with `expected_prefix`
/// 3. Code is `UPPER_SNAKE_CASE`
///
/// # Panics
///
/// Panics with a descriptive message when a check fails; intended for
/// use from tests.
///
/// # Example
///
/// ```
/// use axon_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// struct Oops;
///
/// impl ErrorCode for Oops {
///     fn code(&self) -> &'static str { "DEMO_OOPS" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Oops, "DEMO_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "error code '{code}' must start with prefix '{expected_prefix}'"
    );
    assert!(
        is_upper_snake_case(code),
        "error code '{code}' must be UPPER_SNAKE_CASE"
    );
}

/// Asserts [`assert_error_code`] over every variant of an error enum.
///
/// # Example
///
/// ```
/// use axon_types::{assert_error_codes, ErrorCode};
///
/// #[derive(Debug)]
/// enum Demo { A, B }
///
/// impl ErrorCode for Demo {
///     fn code(&self) -> &'static str {
///         match self {
///             Self::A => "DEMO_A",
///             Self::B => "DEMO_B",
///         }
///     }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_codes(&[Demo::A, Demo::B], "DEMO_");
/// ```
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('_')
        && !s.ends_with('_')
        && !s.contains("__")
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
