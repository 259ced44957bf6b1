//! Elective module pre-selection and curriculum quota validation.
//!
//! The validation engine (`classifier`, `pairing`, `status`, `validation`) is pure: it maps a
//! hydrated [`ModuleElection`] to an [`ElectionStatus`]. Catalog lookup, storage,
//! notifications, and HTTP routing wrap it as replaceable collaborators.

pub mod catalog;
pub mod classifier;
pub mod domain;
pub(crate) mod intake;
pub mod pairing;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CsvModuleCatalog, InMemoryModuleCatalog, ModuleCatalog};
pub use classifier::classify;
pub use domain::{
    ElectionError, EnrollmentMode, Module, ModuleCategory, ModuleElection, ModuleId, Semester,
    Student, StudentId, ValidationSetting,
};
pub use intake::{ElectionIntake, ElectionSubmission, IntakeViolation};
pub use pairing::{count_pairs, count_special_pairs, ConsecutivePairs, SUBSTITUTE_PAIRS};
pub use repository::{
    ElectionNotification, ElectionNotifier, ElectionRecord, ElectionRepository,
    ElectionStatusView, NotifyError, RepositoryError,
};
pub use router::election_router;
pub use service::{ElectionService, ElectionServiceError};
pub use status::{ElectionStatus, ElectionStatusBuilder, ElectionStatusElement, StatusSlot};
pub use validation::{ElectionValidator, FullTimeElectionRules, PartTimeElectionRules, RuleSet};
