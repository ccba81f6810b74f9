//! Process-local repository adapters.
//!
//! State lives behind a [`std::sync::Mutex`] and vanishes with the process.
//! A poisoned lock is reported as a query failure rather than a panic.

mod credential_repository;
mod vitals_repository;

pub use credential_repository::MemoryCredentialRepository;
pub use vitals_repository::MemoryVitalsRepository;
