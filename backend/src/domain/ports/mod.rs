//! Domain ports and supporting types for the hexagonal boundary.

mod accounting;
mod fleet_query;
mod funds_gateway;
mod ledger_store;
mod registry;
mod rental;

pub use accounting::{AccountingCommand, AccountingQuery};
pub use fleet_query::FleetQuery;
#[cfg(test)]
pub use funds_gateway::MockFundsGateway;
pub use funds_gateway::{FixtureFundsGateway, FundsGateway, FundsGatewayError};
#[cfg(test)]
pub use ledger_store::MockLedgerStore;
pub use ledger_store::{LedgerStore, LedgerStoreError};
pub use registry::{
    AddCarRequest, EditCarMetadataRequest, EditCarStatusRequest, RegisterUserRequest,
    RegistryCommand, RegistryQuery, TransferOwnershipRequest,
};
pub use rental::RentalCommand;
