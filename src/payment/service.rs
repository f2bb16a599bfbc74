use super::commons::{CustomerData, PaymentData, PaymentResponse};
use super::logger::TransactionLogger;
use super::notifiers::Notifier;
use super::processors::{PaymentProcessor, RecurringPaymentProcessor, RefundProcessor};
use super::validators::{CustomerValidator, PaymentDataValidator};
use crate::utils::error::{LabError, Result};
use std::sync::Arc;

/// Orchestrates a payment. Every collaborator is injected behind a trait,
/// so swapping the processor or the notifier never touches this type.
pub struct PaymentService {
    payment_processor: Arc<dyn PaymentProcessor>,
    notifier: Box<dyn Notifier>,
    customer_validator: CustomerValidator,
    payment_validator: PaymentDataValidator,
    logger: TransactionLogger,
    refund_processor: Option<Arc<dyn RefundProcessor>>,
    recurring_processor: Option<Arc<dyn RecurringPaymentProcessor>>,
}

impl PaymentService {
    pub fn new(
        payment_processor: Arc<dyn PaymentProcessor>,
        notifier: Box<dyn Notifier>,
        logger: TransactionLogger,
    ) -> Self {
        Self {
            payment_processor,
            notifier,
            customer_validator: CustomerValidator,
            payment_validator: PaymentDataValidator,
            logger,
            refund_processor: None,
            recurring_processor: None,
        }
    }

    pub fn with_refunds(mut self, processor: Arc<dyn RefundProcessor>) -> Self {
        self.refund_processor = Some(processor);
        self
    }

    pub fn with_recurring(mut self, processor: Arc<dyn RecurringPaymentProcessor>) -> Self {
        self.recurring_processor = Some(processor);
        self
    }

    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    /// Validate, charge, notify, log. Validation failures stop before the
    /// processor is called.
    pub async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        self.customer_validator.validate(customer)?;
        self.payment_validator.validate(payment)?;

        let response = self
            .payment_processor
            .process_transaction(customer, payment)
            .await?;
        tracing::info!(
            "transaction for {} finished with status '{}'",
            customer.name,
            response.status
        );

        if let Some(sent) = self.notifier.send_confirmation(customer)? {
            tracing::info!("{}", sent);
        }
        self.logger.log_transaction(customer, payment, &response)?;
        Ok(response)
    }

    pub async fn process_refund(&self, transaction_id: &str) -> Result<PaymentResponse> {
        let processor = self
            .refund_processor
            .as_ref()
            .ok_or_else(|| LabError::unsupported("refunds"))?;
        let response = processor.refund_payment(transaction_id).await?;
        self.logger.log_refund(transaction_id, &response)?;
        Ok(response)
    }

    pub async fn setup_recurring(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let processor = self
            .recurring_processor
            .as_ref()
            .ok_or_else(|| LabError::unsupported("recurring payments"))?;
        let response = processor.setup_recurring_payment(customer, payment).await?;
        self.logger.log_transaction(customer, payment, &response)?;
        Ok(response)
    }
}
