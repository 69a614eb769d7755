//! Driving port for the enrollment ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enrollment::{EnrolledCourse, Enrollment};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Use-cases maintaining the (user, course) uniqueness invariant and
/// answering membership queries.
#[async_trait]
pub trait EnrollmentLedger: Send + Sync {
    /// Enroll a user in an existing course.
    ///
    /// Missing course is `NotFound`; an existing (user, course) pair is
    /// `Conflict`, whether detected here or by the store's unique index
    /// under a concurrent duplicate request.
    async fn enroll(&self, user_id: &UserId, course_id: Uuid) -> Result<Enrollment, Error>;

    /// Permanently remove an enrollment owned by `user_id`.
    ///
    /// A missing row and a row owned by another user are the same
    /// `NotFound`; existence of other users' enrollments is never leaked.
    async fn unenroll(&self, user_id: &UserId, enrollment_id: Uuid) -> Result<(), Error>;

    /// The user's enrollments joined with course data, most recent first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<EnrolledCourse>, Error>;

    /// Whether the user currently holds an enrollment for the course.
    async fn is_enrolled(&self, user_id: &UserId, course_id: Uuid) -> Result<bool, Error>;
}
