//! Port for the durable tables the ledger owns exclusively.
//!
//! The [`LedgerStore`] trait is the contract for the two keyed tables (users
//! by principal, cars by sequential id) and the ledger scalars (the
//! collected-payments pool and the owner principal). Adapters provide the
//! storage; all invariants and preconditions live in the domain services.

use async_trait::async_trait;

use crate::domain::car::{Car, CarId};
use crate::domain::user::{User, UserId};

/// Errors raised by ledger store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerStoreError {
    /// The store could not be reached.
    #[error("ledger store unavailable: {message}")]
    Unavailable {
        /// Adapter-specific cause.
        message: String,
    },
    /// A read or write failed during execution.
    #[error("ledger store operation failed: {message}")]
    Storage {
        /// Adapter-specific cause.
        message: String,
    },
}

impl LedgerStoreError {
    /// Construct an [`LedgerStoreError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Construct an [`LedgerStoreError::Storage`] error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Port for ledger table storage and retrieval.
///
/// Mutations are visible to all subsequent reads immediately; the store is
/// the single source of truth. The paired-save methods exist so the two
/// lockstep writes of the rental and payment flows stay atomic even against
/// a durable adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetch a user by principal; `None` when unregistered.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, LedgerStoreError>;

    /// Insert or replace a user record.
    async fn save_user(&self, user: &User) -> Result<(), LedgerStoreError>;

    /// Fetch a car by id; `None` when no such car was ever listed.
    async fn find_car(&self, id: CarId) -> Result<Option<Car>, LedgerStoreError>;

    /// Insert or replace a car record.
    async fn save_car(&self, car: &Car) -> Result<(), LedgerStoreError>;

    /// Allocate the next sequential car id, starting at 1.
    async fn allocate_car_id(&self) -> Result<CarId, LedgerStoreError>;

    /// All cars in ascending id order.
    async fn list_cars(&self) -> Result<Vec<Car>, LedgerStoreError>;

    /// Number of cars ever listed (equals the last allocated id).
    async fn car_count(&self) -> Result<u64, LedgerStoreError>;

    /// Replace a user and a car record in one atomic step.
    async fn save_user_and_car(&self, user: &User, car: &Car) -> Result<(), LedgerStoreError>;

    /// Replace a user record and the collected-payments pool in one atomic
    /// step.
    async fn save_user_and_pool(
        &self,
        user: &User,
        collected_payments: u64,
    ) -> Result<(), LedgerStoreError>;

    /// Current collected-payments pool.
    async fn collected_payments(&self) -> Result<u64, LedgerStoreError>;

    /// Replace the collected-payments pool.
    async fn set_collected_payments(&self, amount: u64) -> Result<(), LedgerStoreError>;

    /// The privileged owner principal.
    async fn owner(&self) -> Result<UserId, LedgerStoreError>;

    /// Replace the privileged owner principal.
    async fn set_owner(&self, owner: &UserId) -> Result<(), LedgerStoreError>;

    /// Total value held by the ledger: every user balance plus the pool.
    async fn total_held(&self) -> Result<u64, LedgerStoreError>;
}
