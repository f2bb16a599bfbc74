use super::commons::CustomerData;
use crate::utils::error::{LabError, Result};

pub const CONFIRMATION_TEXT: &str = "Thank you for your purchase.";

/// Tells the customer their payment went through.
pub trait Notifier: Send + Sync {
    /// Returns a description of what was sent, `None` when nothing was.
    fn send_confirmation(&self, customer: &CustomerData) -> Result<Option<String>>;
}

#[derive(Debug, Clone)]
pub struct EmailNotifier {
    from: String,
    subject: String,
}

impl Default for EmailNotifier {
    fn default() -> Self {
        Self {
            from: "no-reply@example.com".to_string(),
            subject: "Purchase confirmation".to_string(),
        }
    }
}

impl Notifier for EmailNotifier {
    fn send_confirmation(&self, customer: &CustomerData) -> Result<Option<String>> {
        let to = customer.contact_info.email().ok_or_else(|| {
            LabError::validation("Email address is required to send an email")
        })?;
        tracing::debug!(from = %self.from, subject = %self.subject, "sending confirmation email");
        Ok(Some(format!("Email sent to {}", to)))
    }
}

#[derive(Debug, Clone)]
pub struct SmsNotifier {
    gateway: String,
}

impl SmsNotifier {
    pub fn new(gateway: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
        }
    }
}

impl Notifier for SmsNotifier {
    /// Customers without a phone number are skipped.
    fn send_confirmation(&self, customer: &CustomerData) -> Result<Option<String>> {
        let Some(phone) = customer.contact_info.phone() else {
            tracing::warn!("SMS not sent: {} has no phone number", customer.name);
            return Ok(None);
        };
        Ok(Some(format!(
            "SMS sent through gateway {} to {}: {}",
            self.gateway, phone, CONFIRMATION_TEXT
        )))
    }
}
