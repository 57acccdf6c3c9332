//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountingCommand, AccountingQuery, FleetQuery, FundsGateway, LedgerStore, RegistryCommand,
    RegistryQuery, RentalCommand,
};
use crate::domain::{
    AccountingService, FleetQueryService, OperationLock, RegistryService, RentalService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and fleet administration.
    pub registry: Arc<dyn RegistryCommand>,
    /// Id-keyed registry lookups.
    pub registry_query: Arc<dyn RegistryQuery>,
    /// Check-out/check-in transitions.
    pub rentals: Arc<dyn RentalCommand>,
    /// Deposits, payments, and withdrawals.
    pub accounting: Arc<dyn AccountingCommand>,
    /// Pool and held-value projections.
    pub accounting_query: Arc<dyn AccountingQuery>,
    /// Fleet browsing projections.
    pub fleet: Arc<dyn FleetQuery>,
}

impl HttpState {
    /// Wire the real ledger services over the given adapters.
    ///
    /// All services share one [`OperationLock`], so operations apply one at
    /// a time regardless of which port they enter through.
    pub fn assemble<S, G>(store: Arc<S>, gateway: Arc<G>, clock: Arc<dyn Clock>) -> Self
    where
        S: LedgerStore + 'static,
        G: FundsGateway + 'static,
    {
        let lock = OperationLock::new();
        let registry = Arc::new(RegistryService::new(Arc::clone(&store), lock.clone()));
        let rentals = Arc::new(RentalService::new(
            Arc::clone(&store),
            clock,
            lock.clone(),
        ));
        let accounting = Arc::new(AccountingService::new(
            Arc::clone(&store),
            gateway,
            lock.clone(),
        ));
        let fleet = Arc::new(FleetQueryService::new(store, lock));

        Self {
            registry: registry.clone(),
            registry_query: registry,
            rentals,
            accounting: accounting.clone(),
            accounting_query: accounting,
            fleet,
        }
    }
}
