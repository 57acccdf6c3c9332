//! Rental domain service: the check-out/check-in state machine.
//!
//! Transitions move the car and the user together through one atomic store
//! write, so a car marked rented without its renter (or the reverse) is
//! never observable.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::car::{Car, CarId, CarStateError};
use crate::domain::ops_lock::OperationLock;
use crate::domain::ports::{LedgerStore, LedgerStoreError, RentalCommand};
use crate::domain::user::{ActiveRental, User, UserId};

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

/// Rental service implementing the rental driving port.
#[derive(Clone)]
pub struct RentalService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    lock: OperationLock,
}

impl<S> RentalService<S> {
    /// Create a new rental service over the shared store, clock, and lock.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, lock: OperationLock) -> Self {
        Self { store, clock, lock }
    }
}

impl<S> RentalService<S>
where
    S: LedgerStore,
{
    async fn load_user(&self, caller: &UserId) -> Result<User, Error> {
        self.store
            .find_user(caller)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("principal {caller} is not registered")))
    }

    async fn load_car(&self, id: CarId) -> Result<Car, Error> {
        self.store
            .find_car(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("car {id} not found")))
    }
}

#[async_trait]
impl<S> RentalCommand for RentalService<S>
where
    S: LedgerStore,
{
    async fn check_out(&self, caller: &UserId, car_id: CarId) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;

        let mut user = self.load_user(caller).await?;
        if user.debt() > 0 {
            return Err(Error::outstanding_debt(
                "outstanding debt must be settled before renting again",
            ));
        }
        if user.is_renting() {
            return Err(Error::already_renting("a rented car is already held"));
        }

        let mut car = self.load_car(car_id).await?;
        car.rent_to(*user.id()).map_err(|error| match error {
            CarStateError::NotAvailable { status } => {
                Error::not_available(format!("car {car_id} is not available (status {status})"))
            }
            CarStateError::NotRented | CarStateError::IllegalTransition { .. } => {
                Error::internal(format!("unexpected car state: {error}"))
            }
        })?;
        user.start_rental(ActiveRental::new(car_id, self.clock.utc()))
            .map_err(|error| Error::internal(format!("unexpected user state: {error}")))?;

        self.store
            .save_user_and_car(&user, &car)
            .await
            .map_err(map_store_error)?;
        tracing::info!(user = %caller, car = %car_id, "car checked out");
        Ok(())
    }

    async fn check_in(&self, caller: &UserId) -> Result<(), Error> {
        let _guard = self.lock.acquire().await;

        let mut user = self.load_user(caller).await?;
        let rental = user
            .finish_rental()
            .map_err(|_| Error::not_renting("no active rental to check in"))?;

        // A held rental always points at an existing, rented car; anything
        // else is table corruption.
        let mut car = self
            .store
            .find_car(rental.car_id())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::internal(format!("rented car {} missing", rental.car_id())))?;
        let renter = car
            .end_rental()
            .map_err(|error| Error::internal(format!("unexpected car state: {error}")))?;
        if renter != *caller {
            return Err(Error::internal(format!(
                "car {} was rented by a different principal",
                rental.car_id()
            )));
        }

        user.accrue_debt(car.rent_fee())
            .map_err(|error| Error::internal(format!("debt accrual failed: {error}")))?;

        self.store
            .save_user_and_car(&user, &car)
            .await
            .map_err(map_store_error)?;
        tracing::info!(
            user = %caller,
            car = %rental.car_id(),
            fee = car.rent_fee(),
            "car checked in",
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "rental_service_tests.rs"]
mod tests;
