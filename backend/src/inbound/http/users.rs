//! User API handlers.
//!
//! ```text
//! POST /api/v1/login {"principal":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! POST /api/v1/users {"name":"Alice","surname":"Smith"}
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{Error, PersonName, User, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Stands in for the identity layer: whatever authenticates the caller
/// upstream hands this service an opaque principal to carry in the session.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Opaque principal as a UUID string.
    pub principal: String,
}

/// Response payload projecting a ledger user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Principal identifier.
    pub id: String,
    /// Given name.
    pub name: String,
    /// Surname.
    pub surname: String,
    /// Deposited balance in the smallest denomination.
    pub balance: u64,
    /// Outstanding debt.
    pub debt: u64,
    /// Id of the held car while renting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rented_car_id: Option<u64>,
    /// Check-out instant while renting, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_start: Option<String>,
    /// Whole minutes since check-out while renting; display-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ride_minutes: Option<i64>,
}

impl UserResponse {
    /// Project a domain user, deriving display-only rental duration.
    #[must_use]
    pub fn from_user(user: &User, now: chrono::DateTime<Utc>) -> Self {
        let rental = user.active_rental();
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            surname: user.surname().to_string(),
            balance: user.balance(),
            debt: user.debt(),
            rented_car_id: rental.map(|rental| rental.car_id().get()),
            rent_start: rental.map(|rental| rental.started_at().to_rfc3339()),
            ride_minutes: rental.map(|rental| rental.ride_minutes(now)),
        }
    }
}

fn map_name_error(field: &'static str) -> impl Fn(UserValidationError) -> Error {
    move |error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": field, "code": "invalid_name" }))
    }
}

/// Establish a session for the given principal.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let principal = UserId::new(&payload.principal).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "principal", "code": "invalid_principal" }))
    })?;
    session.persist_user(&principal)?;
    Ok(HttpResponse::Ok().finish())
}

/// Request payload for self-registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Given name.
    pub name: String,
    /// Surname.
    pub surname: String,
}

/// Register the calling principal as a ledger user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 409, description = "Already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let RegisterRequest { name, surname } = payload.into_inner();
    let request = RegisterUserRequest {
        caller,
        name: PersonName::new(name).map_err(map_name_error("name"))?,
        surname: PersonName::new(surname).map_err(map_name_error("surname"))?,
    };

    let user = state.registry.register_user(request).await?;
    Ok(HttpResponse::Created().json(UserResponse::from_user(&user, Utc::now())))
}

/// Fetch the calling principal's ledger record.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let caller = session.require_user_id()?;
    let user = state.registry_query.get_user(&caller).await?;
    Ok(web::Json(UserResponse::from_user(&user, Utc::now())))
}
