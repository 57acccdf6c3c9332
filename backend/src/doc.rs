//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, cars,
//!   rentals, funds, owner, health)
//! - **Schemas**: Request/response payloads plus the shared error envelope
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CarStatusKind, Error, ErrorCode};
use crate::inbound::http::cars::{CarCountResponse, CarPayload, CarResponse, CarStatusPayload};
use crate::inbound::http::funds::{AmountPayload, LedgerBalanceResponse, TotalPaymentsResponse};
use crate::inbound::http::owner::{OwnerResponse, SetOwnerRequest};
use crate::inbound::http::rentals::CheckOutRequest;
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Rental ledger API",
        description = "HTTP interface for the car rental bookkeeping ledger: registry, rentals, and accounting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::cars::add_car,
        crate::inbound::http::cars::car_count,
        crate::inbound::http::cars::cars_by_status,
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::edit_car_metadata,
        crate::inbound::http::cars::edit_car_status,
        crate::inbound::http::rentals::check_out,
        crate::inbound::http::rentals::check_in,
        crate::inbound::http::funds::deposit,
        crate::inbound::http::funds::make_payment,
        crate::inbound::http::funds::withdraw_balance,
        crate::inbound::http::funds::withdraw_owner_balance,
        crate::inbound::http::funds::total_payments,
        crate::inbound::http::funds::ledger_balance,
        crate::inbound::http::owner::get_owner,
        crate::inbound::http::owner::set_owner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CarStatusKind,
        LoginRequest,
        RegisterRequest,
        UserResponse,
        CarPayload,
        CarStatusPayload,
        CarResponse,
        CarCountResponse,
        CheckOutRequest,
        AmountPayload,
        TotalPaymentsResponse,
        LedgerBalanceResponse,
        OwnerResponse,
        SetOwnerRequest,
    )),
    tags(
        (name = "users", description = "Registration and the session stub"),
        (name = "cars", description = "Fleet administration and browsing"),
        (name = "rentals", description = "Check-out and check-in"),
        (name = "funds", description = "Deposits, payments, and withdrawals"),
        (name = "owner", description = "Privileged identity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
