//! Domain ports.
//!
//! Driven ports (repositories) are implemented by outbound adapters; driving
//! ports (`Accounts`, `Catalog`, `EnrollmentLedger`) are implemented by the
//! domain services and consumed by the HTTP layer.

mod accounts;
mod catalog;
mod course_repository;
mod enrollment_ledger;
mod enrollment_repository;
pub(crate) mod macros;
mod user_repository;

pub use accounts::{Accounts, AuthenticatedUser};
pub use catalog::Catalog;
pub use course_repository::{CourseRepository, CourseStoreError};
pub use enrollment_ledger::EnrollmentLedger;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentStoreError};
pub use user_repository::{UserRepository, UserStoreError};

#[cfg(test)]
pub use course_repository::MockCourseRepository;
