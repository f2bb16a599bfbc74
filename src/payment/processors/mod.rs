mod gateway;
mod offline;

pub use gateway::GatewayPaymentProcessor;
pub use offline::OfflinePaymentProcessor;

use super::commons::{CustomerData, PaymentData, PaymentResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;
}

#[async_trait]
pub trait RefundProcessor: Send + Sync {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse>;
}

#[async_trait]
pub trait RecurringPaymentProcessor: Send + Sync {
    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse>;
}
