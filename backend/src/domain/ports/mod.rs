//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters;
//! driving ports (`*Service`, `*Command`, `*Query`) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_repository;
mod login_service;
mod registration_service;
mod vitals_command;
mod vitals_query;
mod vitals_repository;

#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{
    CredentialRepository, CredentialRepositoryError, FixtureCredentialRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::{FixtureRegistrationService, RegistrationService};
#[cfg(test)]
pub use vitals_command::MockVitalsCommand;
pub use vitals_command::{FixtureVitalsCommand, RecordReadingRequest, VitalsCommand};
#[cfg(test)]
pub use vitals_query::MockVitalsQuery;
pub use vitals_query::{FixtureVitalsQuery, VitalsQuery};
#[cfg(test)]
pub use vitals_repository::MockVitalsRepository;
pub use vitals_repository::{FixtureVitalsRepository, VitalsRepository, VitalsRepositoryError};
