//! Port for catalog store persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::Course;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by catalog store adapters.
    pub enum CourseStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "catalog store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalog store query failed: {message}",
        /// The unique course-code constraint rejected an insert.
        DuplicateCode =>
            "course code already exists",
    }
}

/// Port for writing and reading catalog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseStoreError>;

    /// Find a course by primary identifier.
    async fn find_by_id(&self, course_id: Uuid) -> Result<Option<Course>, CourseStoreError>;

    /// List the whole catalog, ordered by course code.
    async fn list(&self) -> Result<Vec<Course>, CourseStoreError>;
}
