//! Catalog service: course creation and browsing over the catalog store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::course::{Course, CourseDraft};
use crate::domain::error::Error;
use crate::domain::ports::{Catalog, CourseRepository, CourseStoreError};

fn map_store_error(error: CourseStoreError) -> Error {
    match error {
        CourseStoreError::DuplicateCode => {
            Error::conflict("course with this code already exists")
        }
        other => Error::internal(format!("catalog store failure: {other}")),
    }
}

/// Catalog implementation over a course repository.
#[derive(Clone)]
pub struct CatalogService<C> {
    courses: Arc<C>,
}

impl<C> CatalogService<C> {
    /// Create a new catalog service.
    pub fn new(courses: Arc<C>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl<C> Catalog for CatalogService<C>
where
    C: CourseRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        let course = Course::from_draft(draft, Utc::now());
        self.courses
            .insert(&course)
            .await
            .map_err(map_store_error)?;
        Ok(course)
    }

    async fn get_course(&self, course_id: Uuid) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("course not found"))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        self.courses.list().await.map_err(map_store_error)
    }
}
