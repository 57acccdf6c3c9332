//! Accounting API handlers.
//!
//! ```text
//! POST /api/v1/funds/deposit {"amount":100}
//! POST /api/v1/funds/payment
//! POST /api/v1/funds/withdrawal {"amount":50}
//! POST /api/v1/funds/owner-withdrawal {"amount":10}
//! GET /api/v1/funds/total-payments
//! GET /api/v1/funds/ledger-balance
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload carrying a transfer amount.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmountPayload {
    /// Amount in the smallest denomination; must be positive.
    pub amount: u64,
}

/// Response payload for the owner's collected-payments pool.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalPaymentsResponse {
    /// Settled debts awaiting owner withdrawal.
    pub total_payments: u64,
}

/// Response payload for the ledger's held value.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBalanceResponse {
    /// All user balances plus the collected-payments pool.
    pub total_held: u64,
}

/// Credit a confirmed external transfer to the caller's balance.
#[utoipa::path(
    post,
    path = "/api/v1/funds/deposit",
    request_body = AmountPayload,
    responses(
        (status = 200, description = "Deposit credited"),
        (status = 400, description = "Invalid amount", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Transfer rail unavailable", body = Error)
    ),
    tags = ["funds"],
    operation_id = "deposit"
)]
#[post("/funds/deposit")]
pub async fn deposit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AmountPayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state.accounting.deposit(&caller, payload.amount).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Settle the caller's entire debt from their balance.
#[utoipa::path(
    post,
    path = "/api/v1/funds/payment",
    responses(
        (status = 200, description = "Debt settled into the pool"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 409, description = "No debt or insufficient balance", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funds"],
    operation_id = "makePayment"
)]
#[post("/funds/payment")]
pub async fn make_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state.accounting.make_payment(&caller).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Pay out part of the caller's balance over the external rail.
#[utoipa::path(
    post,
    path = "/api/v1/funds/withdrawal",
    request_body = AmountPayload,
    responses(
        (status = 200, description = "Withdrawal paid out"),
        (status = 400, description = "Invalid amount", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 409, description = "Insufficient balance", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Transfer rail unavailable", body = Error)
    ),
    tags = ["funds"],
    operation_id = "withdrawBalance"
)]
#[post("/funds/withdrawal")]
pub async fn withdraw_balance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AmountPayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state
        .accounting
        .withdraw_balance(&caller, payload.amount)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Pay out part of the collected-payments pool; owner only.
#[utoipa::path(
    post,
    path = "/api/v1/funds/owner-withdrawal",
    request_body = AmountPayload,
    responses(
        (status = 200, description = "Pool withdrawal paid out"),
        (status = 400, description = "Invalid amount", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 409, description = "Insufficient pool", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Transfer rail unavailable", body = Error)
    ),
    tags = ["funds"],
    operation_id = "withdrawOwnerBalance"
)]
#[post("/funds/owner-withdrawal")]
pub async fn withdraw_owner_balance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AmountPayload>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    state
        .accounting
        .withdraw_owner_balance(&caller, payload.amount)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Collected-payments pool total; owner only.
#[utoipa::path(
    get,
    path = "/api/v1/funds/total-payments",
    responses(
        (status = 200, description = "Pool total", body = TotalPaymentsResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funds"],
    operation_id = "totalPayments"
)]
#[get("/funds/total-payments")]
pub async fn total_payments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<TotalPaymentsResponse>> {
    let caller = session.require_user_id()?;
    let total_payments = state.accounting_query.total_payments(&caller).await?;
    Ok(web::Json(TotalPaymentsResponse { total_payments }))
}

/// Total value held by the ledger; consistency check for presentation code.
#[utoipa::path(
    get,
    path = "/api/v1/funds/ledger-balance",
    responses(
        (status = 200, description = "Held value", body = LedgerBalanceResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["funds"],
    operation_id = "ledgerBalance"
)]
#[get("/funds/ledger-balance")]
pub async fn ledger_balance(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LedgerBalanceResponse>> {
    session.require_user_id()?;
    let total_held = state.accounting_query.ledger_balance().await?;
    Ok(web::Json(LedgerBalanceResponse { total_held }))
}
