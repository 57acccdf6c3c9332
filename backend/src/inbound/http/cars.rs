//! Fleet API handlers.
//!
//! ```text
//! POST /api/v1/cars {"name":"Audi A6","imgUrl":"...","rentFee":10,"saleFee":50000}
//! GET /api/v1/cars?status=available
//! GET /api/v1/cars/count
//! GET /api/v1/cars/{id}
//! PUT /api/v1/cars/{id}
//! PUT /api/v1/cars/{id}/status {"status":"unavailable"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{AddCarRequest, EditCarMetadataRequest, EditCarStatusRequest};
use crate::domain::{Car, CarId, CarName, CarStatusKind, CarValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response payload projecting a fleet car.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    /// Sequential car id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Image URL shown by presentation code.
    pub img_url: String,
    /// Flat fee charged per completed rental.
    pub rent_fee: u64,
    /// Informational sale price.
    pub sale_fee: u64,
    /// Current status label.
    pub status: CarStatusKind,
    /// Renting principal while checked out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renter_id: Option<String>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id().get(),
            name: car.name().to_string(),
            img_url: car.img_url().to_owned(),
            rent_fee: car.rent_fee(),
            sale_fee: car.sale_fee(),
            status: car.status().kind(),
            renter_id: car.renter().map(ToString::to_string),
        }
    }
}

/// Owner-editable car fields, shared by listing and metadata edits.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    /// Display name.
    pub name: String,
    /// Image URL shown by presentation code.
    pub img_url: String,
    /// Flat fee charged per completed rental.
    pub rent_fee: u64,
    /// Informational sale price.
    pub sale_fee: u64,
}

/// Request payload for status edits.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarStatusPayload {
    /// Target status label; `available` or `unavailable`.
    pub status: String,
}

/// Query string for status-filtered listings.
#[derive(Debug, Deserialize)]
pub struct CarsByStatusQuery {
    status: String,
}

/// Response payload for the fleet size.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarCountResponse {
    /// Number of cars ever listed.
    pub count: u64,
}

fn parse_car_id(raw: u64) -> Result<CarId, Error> {
    CarId::new(raw).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "id", "code": "invalid_car_id" }))
    })
}

fn parse_car_name(raw: String) -> Result<CarName, Error> {
    CarName::new(raw).map_err(|error: CarValidationError| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "name", "code": "invalid_car_name" }))
    })
}

fn parse_status(raw: &str) -> Result<CarStatusKind, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("status must be available, rented, or unavailable")
            .with_details(json!({ "field": "status", "value": raw, "code": "invalid_status" }))
    })
}

/// List a new car; owner only.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = CarPayload,
    responses(
        (status = 201, description = "Car listed", body = CarResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "addCar"
)]
#[post("/cars")]
pub async fn add_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CarPayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let CarPayload {
        name,
        img_url,
        rent_fee,
        sale_fee,
    } = payload.into_inner();

    let car = state
        .registry
        .add_car(AddCarRequest {
            caller,
            name: parse_car_name(name)?,
            img_url,
            rent_fee,
            sale_fee,
        })
        .await?;
    Ok(HttpResponse::Created().json(CarResponse::from(car)))
}

/// Number of cars ever listed.
#[utoipa::path(
    get,
    path = "/api/v1/cars/count",
    responses(
        (status = 200, description = "Fleet size", body = CarCountResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "carCount"
)]
#[get("/cars/count")]
pub async fn car_count(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CarCountResponse>> {
    session.require_user_id()?;
    let count = state.fleet.car_count().await?;
    Ok(web::Json(CarCountResponse { count }))
}

/// Cars currently in the requested status, ascending by id.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    params(("status" = String, Query, description = "Status label to filter by")),
    responses(
        (status = 200, description = "Matching cars", body = [CarResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "carsByStatus"
)]
#[get("/cars")]
pub async fn cars_by_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<CarsByStatusQuery>,
) -> ApiResult<web::Json<Vec<CarResponse>>> {
    session.require_user_id()?;
    let status = parse_status(&query.status)?;
    let cars = state.fleet.cars_by_status(status).await?;
    Ok(web::Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Fetch one car by id.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    params(("id" = u64, Path, description = "Sequential car id")),
    responses(
        (status = 200, description = "Car", body = CarResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No such car", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "getCar"
)]
#[get("/cars/{id}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<CarResponse>> {
    session.require_user_id()?;
    let id = parse_car_id(path.into_inner())?;
    let car = state.registry_query.get_car(id).await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Replace a car's metadata; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    params(("id" = u64, Path, description = "Sequential car id")),
    request_body = CarPayload,
    responses(
        (status = 200, description = "Updated car", body = CarResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such car", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "editCarMetadata"
)]
#[put("/cars/{id}")]
pub async fn edit_car_metadata(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: web::Json<CarPayload>,
) -> ApiResult<web::Json<CarResponse>> {
    let caller = session.require_user_id()?;
    let car_id = parse_car_id(path.into_inner())?;
    let CarPayload {
        name,
        img_url,
        rent_fee,
        sale_fee,
    } = payload.into_inner();

    let car = state
        .registry
        .edit_car_metadata(EditCarMetadataRequest {
            caller,
            car_id,
            name: parse_car_name(name)?,
            img_url,
            rent_fee,
            sale_fee,
        })
        .await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Force a car between `available` and `unavailable`; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}/status",
    params(("id" = u64, Path, description = "Sequential car id")),
    request_body = CarStatusPayload,
    responses(
        (status = 200, description = "Updated car", body = CarResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "No such car", body = Error),
        (status = 409, description = "Illegal transition", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cars"],
    operation_id = "editCarStatus"
)]
#[put("/cars/{id}/status")]
pub async fn edit_car_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: web::Json<CarStatusPayload>,
) -> ApiResult<web::Json<CarResponse>> {
    let caller = session.require_user_id()?;
    let car_id = parse_car_id(path.into_inner())?;
    let status = parse_status(&payload.status)?;

    let car = state
        .registry
        .edit_car_status(EditCarStatusRequest {
            caller,
            car_id,
            status,
        })
        .await?;
    Ok(web::Json(CarResponse::from(car)))
}
