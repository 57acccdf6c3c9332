//! Driving ports for balance, debt, and pool accounting.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::user::UserId;

/// Value-moving accounting operations.
#[async_trait]
pub trait AccountingCommand: Send + Sync {
    /// Credit a confirmed external transfer to the caller's balance.
    async fn deposit(&self, caller: &UserId, amount: u64) -> Result<(), Error>;

    /// Settle the caller's entire debt from their balance into the pool.
    async fn make_payment(&self, caller: &UserId) -> Result<(), Error>;

    /// Pay out part of the caller's balance over the external rail.
    async fn withdraw_balance(&self, caller: &UserId, amount: u64) -> Result<(), Error>;

    /// Pay out part of the collected-payments pool to the owner.
    async fn withdraw_owner_balance(&self, caller: &UserId, amount: u64) -> Result<(), Error>;
}

/// Read-only accounting projections.
#[async_trait]
pub trait AccountingQuery: Send + Sync {
    /// Collected-payments pool total; owner only.
    async fn total_payments(&self, caller: &UserId) -> Result<u64, Error>;

    /// Total value held by the ledger: all balances plus the pool.
    ///
    /// Equals confirmed deposits minus confirmed withdrawals for any
    /// sequence of operations; used as a consistency check.
    async fn ledger_balance(&self) -> Result<u64, Error>;
}
