//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! The compound-unique index on (user_id, course_id) is the source of truth
//! for the ledger invariant: a racing duplicate insert fails here with a
//! unique violation and is surfaced as `DuplicatePair`, never as a crash.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{EnrollmentRepository, EnrollmentStoreError};
use crate::domain::{EnrolledCourse, Enrollment, EnrollmentStatus, UserId};

use super::diesel_course_repository::row_to_course;
use super::models::{CourseRow, EnrollmentRow, NewEnrollmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, enrollments};

/// Diesel-backed implementation of the enrollment store port.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EnrollmentStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EnrollmentStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> EnrollmentStoreError {
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
            EnrollmentStoreError::duplicate_pair()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EnrollmentStoreError::connection("database connection error")
        }
        _ => EnrollmentStoreError::query("database error"),
    }
}

/// Convert a database row into a validated domain enrollment.
fn row_to_enrollment(row: EnrollmentRow) -> Result<Enrollment, EnrollmentStoreError> {
    let status: EnrollmentStatus = row.status.parse().map_err(|err| {
        EnrollmentStoreError::query(format!("invalid enrollment status in database: {err}"))
    })?;
    Ok(Enrollment::from_parts(
        row.id,
        UserId::from_uuid(row.user_id),
        row.course_id,
        status,
        row.enrolled_at,
    ))
}

fn rows_to_enrolled_course(
    enrollment: EnrollmentRow,
    course: CourseRow,
) -> Result<EnrolledCourse, EnrollmentStoreError> {
    let enrollment = row_to_enrollment(enrollment)?;
    let course = row_to_course(course)
        .map_err(|err| EnrollmentStoreError::query(err.to_string()))?;
    Ok(EnrolledCourse { enrollment, course })
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewEnrollmentRow {
            id: enrollment.id(),
            user_id: *enrollment.user_id().as_uuid(),
            course_id: enrollment.course_id(),
            status: enrollment.status().as_str(),
            enrolled_at: enrollment.enrolled_at(),
        };

        diesel::insert_into(enrollments::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete_owned(
        &self,
        user_id: &UserId,
        enrollment_id: Uuid,
    ) -> Result<bool, EnrollmentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ownership is part of the predicate, so a foreign row deletes
        // nothing and reads identically to a missing one.
        let deleted = diesel::delete(
            enrollments::table.filter(
                enrollments::id
                    .eq(enrollment_id)
                    .and(enrollments::user_id.eq(user_id.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<EnrolledCourse>, EnrollmentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(EnrollmentRow, CourseRow)> = enrollments::table
            .inner_join(courses::table)
            .filter(enrollments::user_id.eq(user_id.as_uuid()))
            .order(enrollments::enrolled_at.desc())
            .select((EnrollmentRow::as_select(), CourseRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(enrollment, course)| rows_to_enrolled_course(enrollment, course))
            .collect()
    }

    async fn pair_exists(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<bool, EnrollmentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            enrollments::table.filter(
                enrollments::user_id
                    .eq(user_id.as_uuid())
                    .and(enrollments::course_id.eq(course_id)),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unique_violation_maps_to_duplicate_pair() {
        let err = map_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        ));
        assert_eq!(err, EnrollmentStoreError::duplicate_pair());
    }

    #[test]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("gone".to_owned()),
        ));
        assert!(matches!(err, EnrollmentStoreError::Connection { .. }));
    }

    #[test]
    fn valid_rows_convert_to_domain_enrollments() {
        let row = EnrollmentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            status: "active".into(),
            enrolled_at: Utc::now(),
        };
        let enrollment = row_to_enrollment(row).expect("valid row converts");
        assert_eq!(enrollment.status(), EnrollmentStatus::Active);
    }

    #[test]
    fn unknown_status_surfaces_as_query_error() {
        let row = EnrollmentRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            status: "paused".into(),
            enrolled_at: Utc::now(),
        };
        assert!(matches!(
            row_to_enrollment(row),
            Err(EnrollmentStoreError::Query { .. })
        ));
    }
}
