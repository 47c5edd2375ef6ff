//! Error taxonomy for event-sourced aggregate runtimes.
//!
//! A host runtime matches on [`EventSourcingError`] to decide whether to
//! retry, abort or report:
//! - structural validation kinds ([`ErrorCategory::Validation`]) are caller
//!   or configuration bugs
//! - runtime kinds ([`ErrorCategory::Runtime`]) describe a mismatch with
//!   current state and are retried at the caller's discretion
//! - retry exhaustion, authorization and invariant failures are terminal

pub mod error;
pub mod kind;
pub mod operation;

pub use error::{EventSourcingError, Result};
pub use kind::{ErrorCategory, ErrorKind};
pub use operation::Operation;
