//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use backend::domain::UserId;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) owner: UserId,
}

impl ServerConfig {
    /// Construct a server configuration from bootstrap settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        owner: UserId,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            owner,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the principal seeded as the ledger owner.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}
