//! Fleet query service: read-only projections over the car table.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::car::{Car, CarStatusKind};
use crate::domain::ops_lock::OperationLock;
use crate::domain::ports::{FleetQuery, LedgerStore, LedgerStoreError};

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

/// Fleet query service implementing the browse driving port.
#[derive(Clone)]
pub struct FleetQueryService<S> {
    store: Arc<S>,
    lock: OperationLock,
}

impl<S> FleetQueryService<S> {
    /// Create a new query service over the shared store and lock.
    pub fn new(store: Arc<S>, lock: OperationLock) -> Self {
        Self { store, lock }
    }
}

#[async_trait]
impl<S> FleetQuery for FleetQueryService<S>
where
    S: LedgerStore,
{
    async fn cars_by_status(&self, status: CarStatusKind) -> Result<Vec<Car>, Error> {
        let _guard = self.lock.acquire().await;
        let cars = self.store.list_cars().await.map_err(map_store_error)?;
        Ok(cars
            .into_iter()
            .filter(|car| car.status().kind() == status)
            .collect())
    }

    async fn car_count(&self) -> Result<u64, Error> {
        let _guard = self.lock.acquire().await;
        self.store.car_count().await.map_err(map_store_error)
    }
}
