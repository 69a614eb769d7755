//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, CourseStoreError};
use crate::domain::{Course, CourseCode};

use super::models::{CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the catalog store port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CourseStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CourseStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CourseStoreError::duplicate_code()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CourseStoreError::connection("database connection error")
        }
        _ => CourseStoreError::query("database error"),
    }
}

/// Convert a database row into a validated domain course.
pub(crate) fn row_to_course(row: CourseRow) -> Result<Course, CourseStoreError> {
    let code = CourseCode::new(row.code)
        .map_err(|err| CourseStoreError::query(format!("corrupted course code in database: {err}")))?;
    Ok(Course::from_parts(
        row.id,
        code,
        row.title,
        row.description,
        row.instructor,
        row.credits,
        row.created_at,
    ))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CourseStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCourseRow {
            id: course.id(),
            code: course.code().as_ref(),
            title: course.title(),
            description: course.description(),
            instructor: course.instructor(),
            credits: course.credits(),
            created_at: course.created_at(),
        };

        diesel::insert_into(courses::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, course_id: Uuid) -> Result<Option<Course>, CourseStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CourseRow> = courses::table
            .find(course_id)
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_course).transpose()
    }

    async fn list(&self) -> Result<Vec<Course>, CourseStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .order(courses::code.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_course).collect()
    }
}
