//! Funds gateway adapter standing in for the external payment rail.
//!
//! The real rail lives outside this service; deployments front it with
//! their own integration. This adapter confirms every transfer and records
//! it in the logs so operators can reconcile against the rail.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::domain::ports::{FundsGateway, FundsGatewayError};

/// Gateway that accepts every transfer and logs it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFundsGateway;

#[async_trait]
impl FundsGateway for LoggingFundsGateway {
    async fn confirm_deposit(
        &self,
        principal: &UserId,
        amount: u64,
    ) -> Result<(), FundsGatewayError> {
        tracing::info!(%principal, amount, "inbound transfer confirmed");
        Ok(())
    }

    async fn transfer_out(&self, principal: &UserId, amount: u64) -> Result<(), FundsGatewayError> {
        tracing::info!(%principal, amount, "outbound transfer issued");
        Ok(())
    }
}
