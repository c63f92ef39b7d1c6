//! Structured logging for use cases and repositories
//!
//! Every use case brackets its work with `log_op_start!` and either
//! `log_op_end!` or `log_op_error!`, so one operation always yields a
//! start event followed by exactly one terminal event. Binaries pick an
//! output format once through [`init`]; tests install
//! [`test_capture::init_test_capture`] instead and assert on the captured
//! fields.
//!
//! ```rust
//! use bazaar_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
