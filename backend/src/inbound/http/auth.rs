//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"ada","email":"ada@example.com","password":"..."}
//! POST /api/auth/login    {"email":"ada@example.com","password":"..."}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::AuthenticatedUser;
use crate::domain::{Error, LoginCredentials, Registration, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, Envelope};

/// Registration request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; the password hash never appears here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Login response payload: the user plus their bearer credential.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl From<&AuthenticatedUser> for SessionDto {
    fn from(session: &AuthenticatedUser) -> Self {
        Self {
            id: *session.user.id().as_uuid(),
            username: session.user.username().to_string(),
            email: session.user.email().to_string(),
            token: session.token.as_str().to_owned(),
        }
    }
}

/// Create a new account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid input or duplicate email/username"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from_parts(&payload.username, &payload.email, &payload.password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(
        Envelope::data(UserDto::from(&user)).with_message("user registered successfully"),
    ))
}

/// Verify credentials and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success"),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let session = state.accounts.login(credentials).await?;
    Ok(HttpResponse::Ok()
        .json(Envelope::data(SessionDto::from(&session)).with_message("login successful")))
}
