//! Driving ports for user registration and fleet administration.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::car::{Car, CarId, CarName, CarStatusKind};
use crate::domain::user::{PersonName, User, UserId};

/// Input payload for [`RegistryCommand::register_user`].
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    /// Principal registering themself.
    pub caller: UserId,
    /// Given name.
    pub name: PersonName,
    /// Surname.
    pub surname: PersonName,
}

/// Input payload for [`RegistryCommand::add_car`].
#[derive(Debug, Clone)]
pub struct AddCarRequest {
    /// Principal issuing the operation; must be the owner.
    pub caller: UserId,
    /// Display name.
    pub name: CarName,
    /// Image URL shown by presentation code.
    pub img_url: String,
    /// Flat fee charged per completed rental.
    pub rent_fee: u64,
    /// Informational sale price.
    pub sale_fee: u64,
}

/// Input payload for [`RegistryCommand::edit_car_metadata`].
#[derive(Debug, Clone)]
pub struct EditCarMetadataRequest {
    /// Principal issuing the operation; must be the owner.
    pub caller: UserId,
    /// Car to edit.
    pub car_id: CarId,
    /// Replacement display name.
    pub name: CarName,
    /// Replacement image URL.
    pub img_url: String,
    /// Replacement rental fee.
    pub rent_fee: u64,
    /// Replacement sale price.
    pub sale_fee: u64,
}

/// Input payload for [`RegistryCommand::edit_car_status`].
#[derive(Debug, Clone)]
pub struct EditCarStatusRequest {
    /// Principal issuing the operation; must be the owner.
    pub caller: UserId,
    /// Car to edit.
    pub car_id: CarId,
    /// Target status; only `available` and `unavailable` are legal.
    pub status: CarStatusKind,
}

/// Input payload for [`RegistryCommand::transfer_ownership`].
#[derive(Debug, Clone)]
pub struct TransferOwnershipRequest {
    /// Principal issuing the operation; must be the current owner.
    pub caller: UserId,
    /// Principal receiving the privileged identity.
    pub new_owner: UserId,
}

/// Mutating registry operations.
#[async_trait]
pub trait RegistryCommand: Send + Sync {
    /// Register the caller; rejected when a record already exists.
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// List a new car with the next sequential id; owner only.
    async fn add_car(&self, request: AddCarRequest) -> Result<Car, Error>;

    /// Replace a car's metadata; owner only.
    async fn edit_car_metadata(&self, request: EditCarMetadataRequest) -> Result<Car, Error>;

    /// Force a car between `available` and `unavailable`; owner only.
    async fn edit_car_status(&self, request: EditCarStatusRequest) -> Result<Car, Error>;

    /// Hand the privileged identity to another principal; owner only.
    async fn transfer_ownership(&self, request: TransferOwnershipRequest) -> Result<(), Error>;
}

/// Read-only registry lookups.
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// Fetch a user by principal.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// Fetch a car by id.
    async fn get_car(&self, id: CarId) -> Result<Car, Error>;

    /// The current owner principal.
    async fn owner(&self) -> Result<UserId, Error>;
}
