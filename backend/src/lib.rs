//! Rental ledger backend library modules.
//!
//! The crate is organised hexagonally: [`domain`] holds the ledger's
//! entities, ports, and services; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] fulfils the store and funds-gateway ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-tracing middleware applied to every route.
pub use middleware::Trace;
