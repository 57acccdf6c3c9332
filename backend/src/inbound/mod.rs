//! Inbound adapters translating transports into domain operations.

pub mod http;
