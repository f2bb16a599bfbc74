use super::commons::{CustomerData, PaymentData};
use crate::utils::error::{LabError, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerValidator;

impl CustomerValidator {
    pub fn validate(&self, customer: &CustomerData) -> Result<()> {
        if customer.name.trim().is_empty() {
            tracing::warn!("invalid customer data: a name is required");
            return Err(LabError::validation("Invalid customer data: missing name"));
        }
        let contact = &customer.contact_info;
        if contact.email().is_none() && contact.phone().is_none() {
            tracing::warn!("invalid customer data: an email or phone is required");
            return Err(LabError::validation(
                "Invalid customer data: missing email and phone",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PaymentDataValidator;

impl PaymentDataValidator {
    pub fn validate(&self, payment: &PaymentData) -> Result<()> {
        if payment.source.trim().is_empty() {
            tracing::warn!("invalid payment data: the source is missing");
            return Err(LabError::validation("Invalid payment data: missing source"));
        }
        if payment.amount <= 0 {
            tracing::warn!("invalid payment data: the amount must be greater than zero");
            return Err(LabError::validation(
                "Invalid payment data: amount must be positive",
            ));
        }
        Ok(())
    }
}
