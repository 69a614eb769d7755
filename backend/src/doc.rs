//! OpenAPI documentation surface.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ErrorCode;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::{auth, courses, enrollments, health};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Aggregated OpenAPI document served by Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        enrollments::enroll,
        enrollments::my_courses,
        enrollments::check_enrollment,
        enrollments::unenroll,
        health::ready,
        health::live,
    ),
    components(schemas(
        auth::RegisterRequest,
        auth::LoginRequest,
        auth::UserDto,
        auth::SessionDto,
        courses::CreateCourseRequest,
        courses::CourseDto,
        enrollments::EnrollRequest,
        enrollments::EnrollmentDto,
        enrollments::EnrolledCourseDto,
        enrollments::MembershipDto,
        ErrorBody,
        ErrorCode,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "courses", description = "Course catalog"),
        (name = "enrollments", description = "Enrollment ledger"),
        (name = "health", description = "Probes"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_the_enrollment_routes() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document serialises");
        assert!(json.contains("/api/enrollments/my-courses"));
        assert!(json.contains("/api/enrollments/check/{course_id}"));
    }

    #[test]
    fn document_registers_the_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document serialises");
        assert!(json.contains("bearerAuth"));
    }
}
