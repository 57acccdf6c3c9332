//! Owner API handlers.
//!
//! ```text
//! GET /api/v1/owner
//! PUT /api/v1/owner {"newOwner":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::TransferOwnershipRequest;
use crate::domain::{Error, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response payload naming the privileged principal.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    /// Owner principal.
    pub owner: String,
}

/// Request payload for ownership transfer.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetOwnerRequest {
    /// Principal receiving the privileged identity.
    pub new_owner: String,
}

/// The current owner principal.
#[utoipa::path(
    get,
    path = "/api/v1/owner",
    responses(
        (status = 200, description = "Owner principal", body = OwnerResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owner"],
    operation_id = "getOwner"
)]
#[get("/owner")]
pub async fn get_owner(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OwnerResponse>> {
    session.require_user_id()?;
    let owner = state.registry_query.owner().await?;
    Ok(web::Json(OwnerResponse {
        owner: owner.to_string(),
    }))
}

/// Hand the privileged identity to another principal; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/owner",
    request_body = SetOwnerRequest,
    responses(
        (status = 200, description = "Ownership transferred"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["owner"],
    operation_id = "setOwner"
)]
#[put("/owner")]
pub async fn set_owner(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetOwnerRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let new_owner = UserId::new(&payload.new_owner).map_err(|error| {
        Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "newOwner", "code": "invalid_principal" }))
    })?;

    state
        .registry
        .transfer_ownership(TransferOwnershipRequest { caller, new_owner })
        .await?;
    Ok(HttpResponse::Ok().finish())
}
