//! Driving port for catalog browsing and management.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::{Course, CourseDraft};
use crate::domain::error::Error;

/// Use-cases over the catalog store.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Add a course to the catalog. A duplicate code is a `Conflict`.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Fetch a single course; absence is `NotFound`.
    async fn get_course(&self, course_id: Uuid) -> Result<Course, Error>;

    /// List the whole catalog. No pagination.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;
}
