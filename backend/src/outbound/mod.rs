//! Outbound adapters fulfilling the domain ports.

pub mod funds;
pub mod store;

pub use funds::LoggingFundsGateway;
pub use store::InMemoryLedgerStore;
