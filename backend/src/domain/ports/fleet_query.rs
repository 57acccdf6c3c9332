//! Driving port for fleet browsing projections.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::car::{Car, CarStatusKind};

/// Read-only projections over the car table.
#[async_trait]
pub trait FleetQuery: Send + Sync {
    /// Cars currently in `status`, ascending by id, recomputed per call.
    async fn cars_by_status(&self, status: CarStatusKind) -> Result<Vec<Car>, Error>;

    /// Number of cars ever listed.
    async fn car_count(&self) -> Result<u64, Error>;
}
