//! Accounting domain service: deposits, debt settlement, and withdrawals.
//!
//! Operations that pair an internal mutation with an external transfer are
//! two-phase: deposits credit only after the gateway confirms the inbound
//! transfer, and withdrawals debit first, attempt the outbound transfer,
//! then restore the debit if the transfer fails.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Error;
use crate::domain::authorization::ensure_owner;
use crate::domain::ops_lock::OperationLock;
use crate::domain::ports::{
    AccountingCommand, AccountingQuery, FundsGateway, FundsGatewayError, LedgerStore,
    LedgerStoreError,
};
use crate::domain::user::{User, UserId, UserStateError};

fn map_store_error(error: LedgerStoreError) -> Error {
    match error {
        LedgerStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("ledger store unavailable: {message}"))
        }
        LedgerStoreError::Storage { message } => {
            Error::internal(format!("ledger store error: {message}"))
        }
    }
}

fn map_gateway_error(error: FundsGatewayError) -> Error {
    match error {
        FundsGatewayError::Rejected { message } => {
            Error::invalid_request(format!("transfer rejected: {message}"))
        }
        FundsGatewayError::Unavailable { message } => {
            Error::service_unavailable(format!("funds gateway unavailable: {message}"))
        }
    }
}

fn require_positive(amount: u64) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::invalid_amount("amount must be positive"));
    }
    Ok(())
}

/// Accounting service implementing the accounting driving ports.
#[derive(Clone)]
pub struct AccountingService<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
    lock: OperationLock,
}

impl<S, G> AccountingService<S, G> {
    /// Create a new accounting service over the shared store, gateway, and
    /// lock.
    pub fn new(store: Arc<S>, gateway: Arc<G>, lock: OperationLock) -> Self {
        Self {
            store,
            gateway,
            lock,
        }
    }
}

impl<S, G> AccountingService<S, G>
where
    S: LedgerStore,
    G: FundsGateway,
{
    async fn load_user(&self, caller: &UserId) -> Result<User, Error> {
        self.store
            .find_user(caller)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("principal {caller} is not registered")))
    }
}

#[async_trait]
impl<S, G> AccountingCommand for AccountingService<S, G>
where
    S: LedgerStore,
    G: FundsGateway,
{
    async fn deposit(&self, caller: &UserId, amount: u64) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;
        require_positive(amount)?;
        let mut user = self.load_user(caller).await?;

        // Credit only once the inbound transfer is confirmed.
        self.gateway
            .confirm_deposit(caller, amount)
            .await
            .map_err(map_gateway_error)?;
        user.credit(amount)
            .map_err(|error| Error::internal(format!("balance credit failed: {error}")))?;
        self.store.save_user(&user).await.map_err(map_store_error)?;
        tracing::info!(user = %caller, amount, "deposit credited");
        Ok(())
    }

    async fn make_payment(&self, caller: &UserId) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;
        let mut user = self.load_user(caller).await?;

        let owed = user.debt();
        if owed == 0 {
            return Err(Error::no_debt("no outstanding debt to settle"));
        }
        user.debit(owed).map_err(|error| match error {
            UserStateError::InsufficientBalance {
                requested,
                available,
            } => Error::insufficient_balance("balance does not cover the outstanding debt")
                .with_details(json!({ "requested": requested, "available": available })),
            other => Error::internal(format!("payment debit failed: {other}")),
        })?;
        let settled = user.settle_debt();

        let pool = self
            .store
            .collected_payments()
            .await
            .map_err(map_store_error)?;
        let pool = pool
            .checked_add(settled)
            .ok_or_else(|| Error::internal("collected payments overflow"))?;
        self.store
            .save_user_and_pool(&user, pool)
            .await
            .map_err(map_store_error)?;
        tracing::info!(user = %caller, amount = settled, "debt settled");
        Ok(())
    }

    async fn withdraw_balance(&self, caller: &UserId, amount: u64) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;
        require_positive(amount)?;
        let mut user = self.load_user(caller).await?;

        user.debit(amount).map_err(|error| match error {
            UserStateError::InsufficientBalance {
                requested,
                available,
            } => Error::insufficient_balance("balance does not cover the requested amount")
                .with_details(json!({ "requested": requested, "available": available })),
            other => Error::internal(format!("withdrawal debit failed: {other}")),
        })?;
        self.store.save_user(&user).await.map_err(map_store_error)?;

        // Debit is committed before the transfer so a retried transfer can
        // never pay out twice; a failed transfer restores the debit.
        if let Err(error) = self.gateway.transfer_out(caller, amount).await {
            user.credit(amount)
                .map_err(|err| Error::internal(format!("withdrawal rollback failed: {err}")))?;
            self.store.save_user(&user).await.map_err(map_store_error)?;
            tracing::warn!(user = %caller, amount, %error, "withdrawal rolled back");
            return Err(map_gateway_error(error));
        }
        tracing::info!(user = %caller, amount, "balance withdrawn");
        Ok(())
    }

    async fn withdraw_owner_balance(&self, caller: &UserId, amount: u64) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), caller).await?;
        require_positive(amount)?;

        let pool = self
            .store
            .collected_payments()
            .await
            .map_err(map_store_error)?;
        let remaining = pool.checked_sub(amount).ok_or_else(|| {
            Error::insufficient_pool("collected payments do not cover the requested amount")
                .with_details(json!({ "requested": amount, "available": pool }))
        })?;
        self.store
            .set_collected_payments(remaining)
            .await
            .map_err(map_store_error)?;

        if let Err(error) = self.gateway.transfer_out(caller, amount).await {
            self.store
                .set_collected_payments(pool)
                .await
                .map_err(map_store_error)?;
            tracing::warn!(amount, %error, "owner withdrawal rolled back");
            return Err(map_gateway_error(error));
        }
        tracing::info!(amount, "owner withdrawal paid out");
        Ok(())
    }
}

#[async_trait]
impl<S, G> AccountingQuery for AccountingService<S, G>
where
    S: LedgerStore,
    G: FundsGateway,
{
    async fn total_payments(&self, caller: &UserId) -> Result<u64, Error> {
        let _guard = self.lock.acquire().await;
        ensure_owner(self.store.as_ref(), caller).await?;
        self.store
            .collected_payments()
            .await
            .map_err(map_store_error)
    }

    async fn ledger_balance(&self) -> Result<u64, Error> {
        let _guard = self.lock.acquire().await;
        self.store.total_held().await.map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "accounting_service_tests.rs"]
mod tests;
