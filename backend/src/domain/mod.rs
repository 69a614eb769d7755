//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities used by the API and persistence
//! layers, plus the services implementing the driving ports. Types are
//! immutable; invariants and serialisation contracts live in each type's
//! Rustdoc.

pub mod account_service;
pub mod auth;
pub mod catalog_service;
pub mod course;
pub mod enrollment;
pub mod enrollment_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod token;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{AuthValidationError, LoginCredentials, Registration};
pub use self::catalog_service::CatalogService;
pub use self::course::{Course, CourseCode, CourseDraft, CourseValidationError};
pub use self::enrollment::{EnrolledCourse, Enrollment, EnrollmentStatus};
pub use self::enrollment_service::EnrollmentLedgerService;
pub use self::error::{Error, ErrorCode};
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::token::{Claims, SignedToken, TokenIdentity, TokenIssuer};
pub use self::user::{EmailAddress, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
