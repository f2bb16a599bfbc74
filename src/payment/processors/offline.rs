use super::PaymentProcessor;
use crate::payment::commons::{CustomerData, PaymentData, PaymentResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Accepts every payment locally. Only supports one-off charges.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflinePaymentProcessor;

#[async_trait]
impl PaymentProcessor for OfflinePaymentProcessor {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        tracing::info!("processing offline payment for {}", customer.name);
        Ok(PaymentResponse {
            status: "success".to_string(),
            amount: payment.amount,
            transaction_id: Some(Uuid::new_v4().to_string()),
            message: Some("Offline payment succeeded".to_string()),
        })
    }
}
