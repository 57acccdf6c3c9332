//! Driving port for the rental state machine.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::car::CarId;
use crate::domain::user::UserId;

/// Check-out and check-in operations.
///
/// Both transitions move the car and the user in lockstep; no partial
/// update is ever observable.
#[async_trait]
pub trait RentalCommand: Send + Sync {
    /// Check `car_id` out to the caller.
    ///
    /// Requires the car to be `available` and the caller to be registered,
    /// debt-free, and not already renting.
    async fn check_out(&self, caller: &UserId, car_id: CarId) -> Result<(), Error>;

    /// Return the caller's rented car, accruing the car's flat fee as debt.
    async fn check_in(&self, caller: &UserId) -> Result<(), Error>;
}
