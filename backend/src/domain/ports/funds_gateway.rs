//! Port for the external value-transfer collaborator.
//!
//! Deposits and withdrawals pair an internal table mutation with a transfer
//! on an external rail. The ledger only sees a pass/fail outcome; the
//! accounting service decides the ordering (credit after confirmation,
//! debit before transfer with rollback on failure).

use async_trait::async_trait;

use crate::domain::user::UserId;

/// Errors raised by funds gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FundsGatewayError {
    /// The rail refused the transfer.
    #[error("transfer rejected: {message}")]
    Rejected {
        /// Rail-specific cause.
        message: String,
    },
    /// The rail could not be reached.
    #[error("funds gateway unavailable: {message}")]
    Unavailable {
        /// Rail-specific cause.
        message: String,
    },
}

impl FundsGatewayError {
    /// Construct a [`FundsGatewayError::Rejected`] error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Construct a [`FundsGatewayError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for confirming inbound transfers and issuing outbound ones.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundsGateway: Send + Sync {
    /// Confirm that `principal` transferred `amount` in. The ledger credits
    /// the balance only after this returns `Ok`.
    async fn confirm_deposit(&self, principal: &UserId, amount: u64)
    -> Result<(), FundsGatewayError>;

    /// Transfer `amount` out to `principal`. The ledger debits before
    /// calling this and rolls the debit back on failure.
    async fn transfer_out(&self, principal: &UserId, amount: u64) -> Result<(), FundsGatewayError>;
}

/// Fixture implementation that confirms every transfer.
///
/// Use it in tests where transfer behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFundsGateway;

#[async_trait]
impl FundsGateway for FixtureFundsGateway {
    async fn confirm_deposit(
        &self,
        _principal: &UserId,
        _amount: u64,
    ) -> Result<(), FundsGatewayError> {
        Ok(())
    }

    async fn transfer_out(
        &self,
        _principal: &UserId,
        _amount: u64,
    ) -> Result<(), FundsGatewayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_gateway_confirms_deposits() {
        let gateway = FixtureFundsGateway;
        let principal = UserId::random();

        gateway
            .confirm_deposit(&principal, 100)
            .await
            .expect("fixture deposit should confirm");
    }

    #[tokio::test]
    async fn fixture_gateway_accepts_outbound_transfers() {
        let gateway = FixtureFundsGateway;
        let principal = UserId::random();

        gateway
            .transfer_out(&principal, 50)
            .await
            .expect("fixture transfer should succeed");
    }

    #[test]
    fn rejected_error_formats_the_cause() {
        let error = FundsGatewayError::rejected("limit exceeded");
        assert_eq!(error.to_string(), "transfer rejected: limit exceeded");
    }
}
