//! Port for enrollment ledger persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enrollment::{EnrolledCourse, Enrollment};
use crate::domain::user::UserId;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by enrollment store adapters.
    pub enum EnrollmentStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "enrollment store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "enrollment store query failed: {message}",
        /// The unique (user, course) constraint rejected an insert.
        DuplicatePair =>
            "enrollment already exists for this user and course",
    }
}

/// Port for the enrollment ledger's storage.
///
/// The (user, course) uniqueness invariant belongs to the store: adapters
/// must surface a compound-unique violation as
/// [`EnrollmentStoreError::DuplicatePair`], including when two inserts race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Persist a new enrollment row.
    async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentStoreError>;

    /// Delete an enrollment only if it exists and belongs to `user_id`.
    ///
    /// Returns whether a row was removed; `false` covers both "absent" and
    /// "owned by someone else" so callers cannot tell them apart.
    async fn delete_owned(
        &self,
        user_id: &UserId,
        enrollment_id: Uuid,
    ) -> Result<bool, EnrollmentStoreError>;

    /// All of a user's enrollments joined with course data, most recent
    /// enrollment first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<EnrolledCourse>, EnrollmentStoreError>;

    /// Whether a row exists for the (user, course) pair.
    async fn pair_exists(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentStoreError>;
}
