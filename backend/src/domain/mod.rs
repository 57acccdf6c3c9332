//! Domain primitives, ports, and services for the rental ledger.
//!
//! Purpose: hold every invariant of the bookkeeping core — the user and car
//! registry, the rental state machine, and balance/debt accounting — behind
//! transport-agnostic types. Inbound adapters translate HTTP to these
//! services; outbound adapters fulfil the ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — typed operation failures.
//! - [`User`], [`Car`] and their value types — validated entities.
//! - [`ports`] — store, funds gateway, and driving command/query traits.
//! - The four services: registry, rental, accounting, and fleet query.

mod authorization;
pub mod car;
pub mod error;
mod ops_lock;
pub mod ports;
mod trace_id;
pub mod user;

mod accounting_service;
mod query_service;
mod registry_service;
mod rental_service;

pub use self::accounting_service::AccountingService;
pub use self::car::{Car, CarId, CarName, CarStatus, CarStatusKind, CarValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ops_lock::OperationLock;
pub use self::query_service::FleetQueryService;
pub use self::registry_service::RegistryService;
pub use self::rental_service::RentalService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ActiveRental, PersonName, User, UserId, UserValidationError};

/// Convenient result alias for ledger operations.
pub type ApiResult<T> = Result<T, Error>;
