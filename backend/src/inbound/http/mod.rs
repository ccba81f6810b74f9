//! HTTP inbound adapter exposing REST endpoints.

pub mod account;
pub mod error;
pub mod health;
pub mod patient;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod vitals;

pub use error::ApiResult;
