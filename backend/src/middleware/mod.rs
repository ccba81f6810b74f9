//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns; today that is
//! per-request trace identifiers.

pub mod trace;

pub use trace::Trace;
