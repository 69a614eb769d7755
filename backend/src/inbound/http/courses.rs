//! Course catalog API handlers.
//!
//! Catalog browsing is public; catalog management requires a bearer
//! credential.

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Course, CourseDraft, Error};
use crate::inbound::http::bearer::BearerIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Envelope};

/// Course creation request body. `courseId` is the human-readable code.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub instructor: Option<String>,
    pub credits: Option<i16>,
}

/// Wire representation of a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    /// Human-readable unique code, e.g. `CS101`.
    pub course_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            course_id: course.code().to_string(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            instructor: course.instructor().map(ToOwned::to_owned),
            credits: course.credits(),
            created_at: course.created_at(),
        }
    }
}

/// List the whole catalog.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses with count"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let courses = state.catalog.list_courses().await?;
    let dtos: Vec<CourseDto> = courses.iter().map(CourseDto::from).collect();
    Ok(HttpResponse::Ok().json(Envelope::list(dtos)))
}

/// Fetch a single course by primary identifier.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course primary identifier")),
    responses(
        (status = 200, description = "Course"),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{course_id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    course_id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let course = state.catalog.get_course(course_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(CourseDto::from(&course))))
}

/// Add a course to the catalog.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created"),
        (status = 400, description = "Invalid input or duplicate course code"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    _identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CourseDraft::try_from_parts(
        &payload.course_id,
        &payload.title,
        &payload.description,
        payload.instructor.as_deref(),
        payload.credits,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))?;
    let course = state.catalog.create_course(draft).await?;
    Ok(HttpResponse::Created().json(
        Envelope::data(CourseDto::from(&course)).with_message("course created successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{header, StatusCode};
    use actix_web::{test as actix_test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{Accounts, AuthenticatedUser, Catalog, EnrollmentLedger};
    use crate::domain::{
        EmailAddress, EnrolledCourse, Enrollment, LoginCredentials, Registration, TokenIssuer,
        User, UserId,
    };

    const SECRET: &[u8] = b"courses-test-secret";

    fn sample_course(code: &str) -> Course {
        let draft = CourseDraft::try_from_parts(code, "Intro", "Basics", Some("Prof. X"), Some(3))
            .expect("valid draft");
        Course::from_draft(draft, Utc::now())
    }

    struct StubCatalog {
        course: Course,
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
            if draft.code.as_ref() == self.course.code().as_ref() {
                return Err(Error::conflict("course with this code already exists"));
            }
            Ok(Course::from_draft(draft, Utc::now()))
        }

        async fn get_course(&self, course_id: Uuid) -> Result<Course, Error> {
            if course_id == self.course.id() {
                Ok(self.course.clone())
            } else {
                Err(Error::not_found("course not found"))
            }
        }

        async fn list_courses(&self) -> Result<Vec<Course>, Error> {
            Ok(vec![self.course.clone()])
        }
    }

    struct UnusedAccounts;

    #[async_trait]
    impl Accounts for UnusedAccounts {
        async fn register(&self, _registration: Registration) -> Result<User, Error> {
            unreachable!("not exercised")
        }
        async fn login(&self, _credentials: LoginCredentials) -> Result<AuthenticatedUser, Error> {
            unreachable!("not exercised")
        }
    }

    struct UnusedLedger;

    #[async_trait]
    impl EnrollmentLedger for UnusedLedger {
        async fn enroll(&self, _user_id: &UserId, _course_id: Uuid) -> Result<Enrollment, Error> {
            unreachable!("not exercised")
        }
        async fn unenroll(&self, _user_id: &UserId, _enrollment_id: Uuid) -> Result<(), Error> {
            unreachable!("not exercised")
        }
        async fn list_by_user(&self, _user_id: &UserId) -> Result<Vec<EnrolledCourse>, Error> {
            unreachable!("not exercised")
        }
        async fn is_enrolled(&self, _user_id: &UserId, _course_id: Uuid) -> Result<bool, Error> {
            unreachable!("not exercised")
        }
    }

    fn test_app(
        course: Course,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = web::Data::new(HttpState::new(
            Arc::new(UnusedAccounts),
            Arc::new(StubCatalog { course }),
            Arc::new(UnusedLedger),
        ));
        App::new()
            .app_data(state)
            .app_data(web::Data::new(TokenIssuer::new(SECRET)))
            .service(
                web::scope("/api")
                    .service(list_courses)
                    .service(get_course)
                    .service(create_course),
            )
    }

    fn bearer() -> (header::HeaderName, String) {
        let issuer = TokenIssuer::new(SECRET);
        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let token = issuer
            .issue(&UserId::random(), &email)
            .expect("issuing succeeds");
        (
            header::AUTHORIZATION,
            format!("Bearer {}", token.as_str()),
        )
    }

    #[actix_web::test]
    async fn listing_is_public_and_reports_count() {
        let app = actix_test::init_service(test_app(sample_course("CS101"))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/courses").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["count"], 1);
        assert_eq!(value["data"][0]["courseId"], "CS101");
    }

    #[actix_web::test]
    async fn fetching_a_known_course_succeeds_without_auth() {
        let course = sample_course("CS101");
        let id = course.id();
        let app = actix_test::init_service(test_app(course)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/courses/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn fetching_an_unknown_course_is_404() {
        let app = actix_test::init_service(test_app(sample_course("CS101"))).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/courses/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn creation_requires_a_bearer_credential() {
        let app = actix_test::init_service(test_app(sample_course("CS101"))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/courses")
            .set_json(&CreateCourseRequest {
                course_id: "WEB201".into(),
                title: "Web".into(),
                description: "Web dev".into(),
                instructor: None,
                credits: Some(3),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn creation_with_a_token_returns_created() {
        let app = actix_test::init_service(test_app(sample_course("CS101"))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer())
            .set_json(&CreateCourseRequest {
                course_id: "WEB201".into(),
                title: "Web".into(),
                description: "Web dev".into(),
                instructor: Some("Dr. Davis".into()),
                credits: Some(3),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["data"]["courseId"], "WEB201");
        assert_eq!(value["message"], "course created successfully");
    }

    #[actix_web::test]
    async fn duplicate_code_maps_to_400() {
        let app = actix_test::init_service(test_app(sample_course("CS101"))).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer())
            .set_json(&CreateCourseRequest {
                course_id: "CS101".into(),
                title: "Intro".into(),
                description: "Basics".into(),
                instructor: None,
                credits: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "conflict");
    }
}
