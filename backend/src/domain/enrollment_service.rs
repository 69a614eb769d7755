//! Enrollment ledger service.
//!
//! Maintains the (user, course) uniqueness invariant over the course and
//! enrollment stores. There is deliberately no read-then-write duplicate
//! pre-check: the insert is attempted unconditionally and the store's
//! unique-violation maps to `Conflict`, so a racing duplicate request gets
//! the same outcome as a sequential one.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enrollment::{EnrolledCourse, Enrollment};
use crate::domain::error::Error;
use crate::domain::ports::{
    CourseRepository, CourseStoreError, EnrollmentLedger, EnrollmentRepository,
    EnrollmentStoreError,
};
use crate::domain::user::UserId;

fn map_course_error(error: CourseStoreError) -> Error {
    Error::internal(format!("catalog store failure: {error}"))
}

fn map_enrollment_error(error: EnrollmentStoreError) -> Error {
    match error {
        EnrollmentStoreError::DuplicatePair => {
            Error::conflict("already enrolled in this course")
        }
        other => Error::internal(format!("enrollment store failure: {other}")),
    }
}

/// Ledger implementation over the course and enrollment repositories.
#[derive(Clone)]
pub struct EnrollmentLedgerService<C, E> {
    courses: Arc<C>,
    enrollments: Arc<E>,
}

impl<C, E> EnrollmentLedgerService<C, E> {
    /// Create a new ledger service.
    pub fn new(courses: Arc<C>, enrollments: Arc<E>) -> Self {
        Self {
            courses,
            enrollments,
        }
    }
}

#[async_trait]
impl<C, E> EnrollmentLedger for EnrollmentLedgerService<C, E>
where
    C: CourseRepository,
    E: EnrollmentRepository,
{
    async fn enroll(&self, user_id: &UserId, course_id: Uuid) -> Result<Enrollment, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;

        // The existence check above is not atomic with the insert; the
        // store's compound-unique index decides a race.
        let enrollment = Enrollment::new(user_id.clone(), course.id());
        self.enrollments
            .insert(&enrollment)
            .await
            .map_err(map_enrollment_error)?;
        Ok(enrollment)
    }

    async fn unenroll(&self, user_id: &UserId, enrollment_id: Uuid) -> Result<(), Error> {
        let removed = self
            .enrollments
            .delete_owned(user_id, enrollment_id)
            .await
            .map_err(map_enrollment_error)?;
        if removed {
            Ok(())
        } else {
            // Same answer whether the row is absent or owned by someone else.
            Err(Error::not_found("enrollment not found"))
        }
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<EnrolledCourse>, Error> {
        self.enrollments
            .list_for_user(user_id)
            .await
            .map_err(map_enrollment_error)
    }

    async fn is_enrolled(&self, user_id: &UserId, course_id: Uuid) -> Result<bool, Error> {
        self.enrollments
            .pair_exists(user_id, course_id)
            .await
            .map_err(map_enrollment_error)
    }
}

#[cfg(test)]
mod tests {
    //! Ledger behaviour over an in-memory store that enforces the same
    //! compound-unique constraint as the database.

    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::course::{Course, CourseDraft};
    use crate::domain::enrollment::EnrollmentStatus;
    use crate::domain::ErrorCode;

    #[derive(Default)]
    struct InMemoryCourses {
        courses: Mutex<Vec<Course>>,
    }

    impl InMemoryCourses {
        fn with_courses(courses: Vec<Course>) -> Self {
            Self {
                courses: Mutex::new(courses),
            }
        }
    }

    #[async_trait]
    impl CourseRepository for InMemoryCourses {
        async fn insert(&self, course: &Course) -> Result<(), CourseStoreError> {
            self.courses.lock().expect("course lock").push(course.clone());
            Ok(())
        }

        async fn find_by_id(&self, course_id: Uuid) -> Result<Option<Course>, CourseStoreError> {
            Ok(self
                .courses
                .lock()
                .expect("course lock")
                .iter()
                .find(|course| course.id() == course_id)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<Course>, CourseStoreError> {
            Ok(self.courses.lock().expect("course lock").clone())
        }
    }

    /// In-memory ledger store. The insert rejects duplicate (user, course)
    /// pairs under a single lock, mirroring the database's unique index.
    #[derive(Default)]
    struct InMemoryEnrollments {
        rows: Mutex<Vec<Enrollment>>,
        courses: Mutex<Vec<Course>>,
        fail_queries: Mutex<bool>,
    }

    impl InMemoryEnrollments {
        fn with_catalog(courses: Vec<Course>) -> Self {
            Self {
                courses: Mutex::new(courses),
                ..Self::default()
            }
        }

        fn set_fail_queries(&self) {
            *self.fail_queries.lock().expect("flag lock") = true;
        }

        fn row_count(&self) -> usize {
            self.rows.lock().expect("row lock").len()
        }
    }

    #[async_trait]
    impl EnrollmentRepository for InMemoryEnrollments {
        async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentStoreError> {
            let mut rows = self.rows.lock().expect("row lock");
            let duplicate = rows.iter().any(|row| {
                row.user_id() == enrollment.user_id()
                    && row.course_id() == enrollment.course_id()
            });
            if duplicate {
                return Err(EnrollmentStoreError::duplicate_pair());
            }
            rows.push(enrollment.clone());
            Ok(())
        }

        async fn delete_owned(
            &self,
            user_id: &UserId,
            enrollment_id: Uuid,
        ) -> Result<bool, EnrollmentStoreError> {
            let mut rows = self.rows.lock().expect("row lock");
            let before = rows.len();
            rows.retain(|row| !(row.id() == enrollment_id && row.user_id() == user_id));
            Ok(rows.len() < before)
        }

        async fn list_for_user(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<EnrolledCourse>, EnrollmentStoreError> {
            if *self.fail_queries.lock().expect("flag lock") {
                return Err(EnrollmentStoreError::query("simulated outage"));
            }
            let courses = self.courses.lock().expect("course lock");
            let mut joined: Vec<EnrolledCourse> = self
                .rows
                .lock()
                .expect("row lock")
                .iter()
                .filter(|row| row.user_id() == user_id)
                .filter_map(|row| {
                    courses
                        .iter()
                        .find(|course| course.id() == row.course_id())
                        .map(|course| EnrolledCourse {
                            enrollment: row.clone(),
                            course: course.clone(),
                        })
                })
                .collect();
            joined.sort_by_key(|entry| std::cmp::Reverse(entry.enrollment.enrolled_at()));
            Ok(joined)
        }

        async fn pair_exists(
            &self,
            user_id: &UserId,
            course_id: Uuid,
        ) -> Result<bool, EnrollmentStoreError> {
            Ok(self
                .rows
                .lock()
                .expect("row lock")
                .iter()
                .any(|row| row.user_id() == user_id && row.course_id() == course_id))
        }
    }

    fn course(code: &str) -> Course {
        let draft = CourseDraft::try_from_parts(code, "Title", "Description", None, Some(3))
            .expect("valid draft");
        Course::from_draft(draft, Utc::now())
    }

    fn ledger_with_catalog(
        catalog: Vec<Course>,
    ) -> (
        EnrollmentLedgerService<InMemoryCourses, InMemoryEnrollments>,
        Arc<InMemoryEnrollments>,
    ) {
        let enrollments = Arc::new(InMemoryEnrollments::with_catalog(catalog.clone()));
        let service = EnrollmentLedgerService::new(
            Arc::new(InMemoryCourses::with_courses(catalog)),
            Arc::clone(&enrollments),
        );
        (service, enrollments)
    }

    #[tokio::test]
    async fn enroll_then_membership_is_true_and_second_enroll_conflicts() {
        let cs101 = course("CS101");
        let (ledger, _) = ledger_with_catalog(vec![cs101.clone()]);
        let user = UserId::random();

        let enrollment = ledger
            .enroll(&user, cs101.id())
            .await
            .expect("first enroll succeeds");
        assert_eq!(enrollment.status(), EnrollmentStatus::Active);
        assert!(ledger
            .is_enrolled(&user, cs101.id())
            .await
            .expect("membership query succeeds"));

        let err = ledger
            .enroll(&user, cs101.id())
            .await
            .expect_err("second enroll must conflict");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn unenroll_clears_membership_and_reenroll_gets_a_fresh_id() {
        let cs101 = course("CS101");
        let (ledger, _) = ledger_with_catalog(vec![cs101.clone()]);
        let user = UserId::random();

        let first = ledger.enroll(&user, cs101.id()).await.expect("enrolls");
        ledger
            .unenroll(&user, first.id())
            .await
            .expect("unenroll succeeds");
        assert!(!ledger
            .is_enrolled(&user, cs101.id())
            .await
            .expect("membership query succeeds"));

        let second = ledger
            .enroll(&user, cs101.id())
            .await
            .expect("re-enroll succeeds after unenroll");
        assert_ne!(second.id(), first.id());
    }

    #[tokio::test]
    async fn unenroll_of_another_users_row_is_not_found() {
        let cs101 = course("CS101");
        let (ledger, store) = ledger_with_catalog(vec![cs101.clone()]);
        let owner = UserId::random();
        let intruder = UserId::random();

        let enrollment = ledger.enroll(&owner, cs101.id()).await.expect("enrolls");
        let err = ledger
            .unenroll(&intruder, enrollment.id())
            .await
            .expect_err("foreign unenroll must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "enrollment not found");
        assert_eq!(store.row_count(), 1, "the row must survive");
    }

    #[tokio::test]
    async fn unenroll_of_a_missing_row_reads_the_same_as_foreign_ownership() {
        let (ledger, _) = ledger_with_catalog(vec![]);
        let err = ledger
            .unenroll(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("missing row must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "enrollment not found");
    }

    #[tokio::test]
    async fn enroll_in_a_missing_course_creates_no_row() {
        let (ledger, store) = ledger_with_catalog(vec![]);
        let err = ledger
            .enroll(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("missing course must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn listing_orders_by_enrollment_time_descending() {
        let cs101 = course("CS101");
        let web201 = course("WEB201");
        let (ledger, store) = ledger_with_catalog(vec![cs101.clone(), web201.clone()]);
        let user = UserId::random();

        // Insert with explicit timestamps so ordering does not depend on
        // sub-microsecond clock resolution.
        let now = Utc::now();
        for (course, offset) in [(&cs101, 2), (&web201, 1)] {
            let row = Enrollment::from_parts(
                Uuid::new_v4(),
                user.clone(),
                course.id(),
                EnrollmentStatus::Active,
                now - Duration::minutes(offset),
            );
            store.insert(&row).await.expect("seed insert succeeds");
        }

        let listed = ledger.list_by_user(&user).await.expect("listing succeeds");
        let codes: Vec<&str> = listed
            .iter()
            .map(|entry| entry.course.code().as_ref())
            .collect();
        assert_eq!(codes, vec!["WEB201", "CS101"]);
    }

    #[tokio::test]
    async fn concurrent_duplicate_enrolls_produce_one_row_and_one_conflict() {
        let cs101 = course("CS101");
        let (ledger, store) = ledger_with_catalog(vec![cs101.clone()]);
        let user = UserId::random();

        let (a, b) = tokio::join!(
            ledger.enroll(&user, cs101.id()),
            ledger.enroll(&user, cs101.id())
        );
        let outcomes = [a, b];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one enroll wins");
        let conflict = outcomes
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("the loser observes an error");
        assert_eq!(conflict.code, ErrorCode::Conflict);
        assert_eq!(store.row_count(), 1, "never two rows for the same pair");
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_surface_as_internal_errors() {
        let (ledger, store) = ledger_with_catalog(vec![]);
        store.set_fail_queries();
        let err = ledger
            .list_by_user(&UserId::random())
            .await
            .expect_err("outage must surface");
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
