//! Owner authorisation predicate.
//!
//! Every owner-only effect funnels through [`ensure_owner`] so the
//! privileged check lives in exactly one place.

use crate::domain::Error;
use crate::domain::ports::{LedgerStore, LedgerStoreError};
use crate::domain::user::UserId;

/// Reject `caller` unless it is the current owner principal.
pub(crate) async fn ensure_owner<S>(store: &S, caller: &UserId) -> Result<(), Error>
where
    S: LedgerStore + ?Sized,
{
    let owner = store.owner().await.map_err(|error| match error {
        LedgerStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("ledger store unavailable: {message}"))
        }
        LedgerStoreError::Storage { message } => {
            Error::internal(format!("ledger store error: {message}"))
        }
    })?;
    if owner == *caller {
        Ok(())
    } else {
        Err(Error::not_owner("operation reserved for the owner"))
    }
}
