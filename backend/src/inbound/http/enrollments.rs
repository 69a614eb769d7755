//! Enrollment ledger API handlers. All routes require a bearer credential.
//!
//! ```text
//! POST   /api/enrollments                  {"courseId":"<uuid>"}
//! GET    /api/enrollments/my-courses
//! GET    /api/enrollments/check/{courseId}
//! DELETE /api/enrollments/{enrollmentId}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{EnrolledCourse, Enrollment, EnrollmentStatus};
use crate::inbound::http::bearer::BearerIdentity;
use crate::inbound::http::courses::CourseDto;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Envelope};

/// Enrollment request body. `courseId` is the course's primary identifier.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: Uuid,
}

/// Wire representation of a ledger row.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTime<Utc>,
}

impl From<&Enrollment> for EnrollmentDto {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id(),
            user_id: *enrollment.user_id().as_uuid(),
            course_id: enrollment.course_id(),
            status: enrollment.status(),
            enrolled_at: enrollment.enrolled_at(),
        }
    }
}

/// A course the user is enrolled in: course fields flattened together with
/// the enrollment's own identifiers, as the "my courses" view renders them.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourseDto {
    #[serde(flatten)]
    pub course: CourseDto,
    pub enrollment_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

impl From<&EnrolledCourse> for EnrolledCourseDto {
    fn from(entry: &EnrolledCourse) -> Self {
        Self {
            course: CourseDto::from(&entry.course),
            enrollment_id: entry.enrollment.id(),
            enrolled_at: entry.enrollment.enrolled_at(),
            status: entry.enrollment.status(),
        }
    }
}

/// Membership check response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDto {
    pub is_enrolled: bool,
}

/// Enroll the authenticated user in a course.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created"),
        (status = 400, description = "Already enrolled"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["enrollments"],
    operation_id = "enroll"
)]
#[post("/enrollments")]
pub async fn enroll(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: web::Json<EnrollRequest>,
) -> ApiResult<HttpResponse> {
    let enrollment = state
        .ledger
        .enroll(identity.user_id(), payload.course_id)
        .await?;
    Ok(HttpResponse::Created().json(
        Envelope::data(EnrollmentDto::from(&enrollment))
            .with_message("successfully enrolled in course"),
    ))
}

/// List the authenticated user's enrolled courses, most recent first.
#[utoipa::path(
    get,
    path = "/api/enrollments/my-courses",
    responses(
        (status = 200, description = "Enrolled courses with count"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["enrollments"],
    operation_id = "myCourses"
)]
#[get("/enrollments/my-courses")]
pub async fn my_courses(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let entries = state.ledger.list_by_user(identity.user_id()).await?;
    let dtos: Vec<EnrolledCourseDto> = entries.iter().map(EnrolledCourseDto::from).collect();
    Ok(HttpResponse::Ok().json(Envelope::list(dtos)))
}

/// Check whether the authenticated user is enrolled in a course.
#[utoipa::path(
    get,
    path = "/api/enrollments/check/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course primary identifier")),
    responses(
        (status = 200, description = "Membership flag"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["enrollments"],
    operation_id = "checkEnrollment"
)]
#[get("/enrollments/check/{course_id}")]
pub async fn check_enrollment(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    course_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let is_enrolled = state
        .ledger
        .is_enrolled(identity.user_id(), course_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::data(MembershipDto { is_enrolled })))
}

/// Permanently remove one of the authenticated user's enrollments.
#[utoipa::path(
    delete,
    path = "/api/enrollments/{enrollment_id}",
    params(("enrollment_id" = Uuid, Path, description = "Enrollment identifier")),
    responses(
        (status = 200, description = "Enrollment removed"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Enrollment not found or not owned"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["enrollments"],
    operation_id = "unenroll"
)]
#[delete("/enrollments/{enrollment_id}")]
pub async fn unenroll(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    enrollment_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state
        .ledger
        .unenroll(identity.user_id(), enrollment_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message("successfully unenrolled from course")))
}
