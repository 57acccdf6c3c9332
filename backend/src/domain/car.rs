//! Car entity: fleet metadata and the rental status machine.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::UserId;

/// Validation errors returned by the car value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarValidationError {
    /// Car ids are sequential from 1; zero is not a valid id.
    ZeroId,
    /// The car name was empty or whitespace-only.
    EmptyName,
    /// The car name exceeded the maximum length.
    NameTooLong {
        /// Maximum number of characters accepted.
        max: usize,
    },
}

impl fmt::Display for CarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroId => write!(f, "car id must be positive"),
            Self::EmptyName => write!(f, "car name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "car name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CarValidationError {}

/// Sequential car identifier, allocated by the store starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u64, example = 1)]
pub struct CarId(NonZeroU64);

impl CarId {
    /// Construct a [`CarId`] from a raw positive integer.
    pub fn new(id: u64) -> Result<Self, CarValidationError> {
        NonZeroU64::new(id)
            .map(Self)
            .ok_or(CarValidationError::ZeroId)
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a car name.
pub const CAR_NAME_MAX: usize = 64;

/// Validated car display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarName(String);

impl CarName {
    /// Validate and construct a [`CarName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, CarValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CarValidationError::EmptyName);
        }
        if name.chars().count() > CAR_NAME_MAX {
            return Err(CarValidationError::NameTooLong { max: CAR_NAME_MAX });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for CarName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CarName> for String {
    fn from(value: CarName) -> Self {
        value.0
    }
}

/// Rental status of a car.
///
/// The `Rented` variant carries the renter, so "rented implies a renter"
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarStatus {
    /// Listed and free to check out.
    Available,
    /// Checked out by the named principal.
    Rented {
        /// The renting user.
        renter: UserId,
    },
    /// Delisted by the owner; not rentable.
    Unavailable,
}

impl CarStatus {
    /// Status label without the renter payload.
    #[must_use]
    pub fn kind(&self) -> CarStatusKind {
        match self {
            Self::Available => CarStatusKind::Available,
            Self::Rented { .. } => CarStatusKind::Rented,
            Self::Unavailable => CarStatusKind::Unavailable,
        }
    }
}

/// Status label used for filters, edits, and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CarStatusKind {
    /// Listed and free to check out.
    Available,
    /// Checked out by some user.
    Rented,
    /// Delisted by the owner.
    Unavailable,
}

impl CarStatusKind {
    /// Canonical lowercase label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for CarStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown car status: {value}")]
pub struct ParseCarStatusError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for CarStatusKind {
    type Err = ParseCarStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(ParseCarStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// State-transition failures raised by [`Car`] mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarStateError {
    /// The car is not in the `Available` state.
    #[error("car is not available (status {status})")]
    NotAvailable {
        /// Current status label.
        status: CarStatusKind,
    },
    /// The car has no active rental to end.
    #[error("car has no active rental")]
    NotRented,
    /// The requested status edit is not a legal transition.
    #[error("cannot change car status from {from} to {to}")]
    IllegalTransition {
        /// Current status label.
        from: CarStatusKind,
        /// Requested status label.
        to: CarStatusKind,
    },
}

/// Rentable fleet asset.
///
/// ## Invariants
/// - `status == Rented` carries the renter; no separate renter field can
///   disagree with the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    id: CarId,
    name: CarName,
    img_url: String,
    rent_fee: u64,
    sale_fee: u64,
    status: CarStatus,
}

impl Car {
    /// List a new car; it starts `Available`.
    #[must_use]
    pub fn new(id: CarId, name: CarName, img_url: String, rent_fee: u64, sale_fee: u64) -> Self {
        Self {
            id,
            name,
            img_url,
            rent_fee,
            sale_fee,
            status: CarStatus::Available,
        }
    }

    /// Sequential identifier.
    #[must_use]
    pub fn id(&self) -> CarId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &CarName {
        &self.name
    }

    /// Image URL shown by presentation code.
    #[must_use]
    pub fn img_url(&self) -> &str {
        self.img_url.as_str()
    }

    /// Flat fee charged per completed rental.
    #[must_use]
    pub fn rent_fee(&self) -> u64 {
        self.rent_fee
    }

    /// Informational sale price; unused by the rental flow.
    #[must_use]
    pub fn sale_fee(&self) -> u64 {
        self.sale_fee
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> &CarStatus {
        &self.status
    }

    /// The renting principal while checked out.
    #[must_use]
    pub fn renter(&self) -> Option<&UserId> {
        match &self.status {
            CarStatus::Rented { renter } => Some(renter),
            CarStatus::Available | CarStatus::Unavailable => None,
        }
    }

    /// Replace the owner-editable metadata.
    pub fn update_metadata(
        &mut self,
        name: CarName,
        img_url: String,
        rent_fee: u64,
        sale_fee: u64,
    ) {
        self.name = name;
        self.img_url = img_url;
        self.rent_fee = rent_fee;
        self.sale_fee = sale_fee;
    }

    /// Check the car out to `renter`; fails unless currently `Available`.
    pub fn rent_to(&mut self, renter: UserId) -> Result<(), CarStateError> {
        match self.status {
            CarStatus::Available => {
                self.status = CarStatus::Rented { renter };
                Ok(())
            }
            CarStatus::Rented { .. } | CarStatus::Unavailable => Err(CarStateError::NotAvailable {
                status: self.status.kind(),
            }),
        }
    }

    /// Return the car from its rental, yielding the renter.
    pub fn end_rental(&mut self) -> Result<UserId, CarStateError> {
        match self.status {
            CarStatus::Rented { renter } => {
                self.status = CarStatus::Available;
                Ok(renter)
            }
            CarStatus::Available | CarStatus::Unavailable => Err(CarStateError::NotRented),
        }
    }

    /// Owner-directed listing change between `Available` and `Unavailable`.
    ///
    /// A car that is currently rented cannot be forced into another status,
    /// and `Rented` is never a legal edit target.
    pub fn set_listing(&mut self, target: CarStatusKind) -> Result<(), CarStateError> {
        let from = self.status.kind();
        if from == CarStatusKind::Rented {
            return Err(CarStateError::IllegalTransition { from, to: target });
        }
        self.status = match target {
            CarStatusKind::Available => CarStatus::Available,
            CarStatusKind::Unavailable => CarStatus::Unavailable,
            CarStatusKind::Rented => {
                return Err(CarStateError::IllegalTransition { from, to: target });
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests;
