//! Rental API handlers.
//!
//! ```text
//! POST /api/v1/rentals/check-out {"carId":1}
//! POST /api/v1/rentals/check-in
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{CarId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for check-out.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    /// Car to check out.
    pub car_id: u64,
}

/// Check a car out to the calling principal.
#[utoipa::path(
    post,
    path = "/api/v1/rentals/check-out",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Car checked out"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such car or user", body = Error),
        (status = 409, description = "Not available, already renting, or in debt", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "checkOut"
)]
#[post("/rentals/check-out")]
pub async fn check_out(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckOutRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let car_id = CarId::new(payload.car_id).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "carId", "code": "invalid_car_id" }))
    })?;

    state.rentals.check_out(&caller, car_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Return the calling principal's rented car.
#[utoipa::path(
    post,
    path = "/api/v1/rentals/check-in",
    responses(
        (status = 200, description = "Car checked in; rental fee accrued as debt"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 409, description = "No active rental", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "checkIn"
)]
#[post("/rentals/check-in")]
pub async fn check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state.rentals.check_in(&caller).await?;
    Ok(HttpResponse::Ok().finish())
}
