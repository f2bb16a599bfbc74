pub mod commons;
pub mod logger;
pub mod notifiers;
pub mod processors;
pub mod service;
pub mod validators;

pub use commons::{ContactInfo, CustomerData, PaymentData, PaymentResponse};
pub use logger::TransactionLogger;
pub use service::PaymentService;

use crate::config::toml_config::PaymentSettings;
use crate::utils::error::Result;
use notifiers::{EmailNotifier, SmsNotifier};
use processors::{GatewayPaymentProcessor, OfflinePaymentProcessor};
use std::io::Write;
use std::sync::Arc;

fn print_response(out: &mut dyn Write, label: &str, response: &PaymentResponse) -> Result<()> {
    writeln!(
        out,
        "{}: status={} amount={} id={} message={}",
        label,
        response.status,
        response.amount,
        response.transaction_id.as_deref().unwrap_or("-"),
        response.message.as_deref().unwrap_or("-")
    )?;
    Ok(())
}

/// Runs the service first with the offline processor, then against the
/// configured gateway when an API key is available.
pub async fn run_walkthrough(settings: &PaymentSettings, out: &mut dyn Write) -> Result<()> {
    let logger = TransactionLogger::new(&settings.transaction_log);
    let with_email = CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"));
    let with_phone = CustomerData::new("Jane Smith", ContactInfo::with_phone("+1234567890"));
    let payment = PaymentData::new(1000, "tok_visa");

    writeln!(out, "--- Offline processor with SMS notifications ---")?;
    let offline = PaymentService::new(
        Arc::new(OfflinePaymentProcessor),
        Box::new(SmsNotifier::new(&settings.sms_gateway)),
        logger.clone(),
    );
    let response = offline.process_transaction(&with_phone, &payment).await?;
    print_response(out, "Payment", &response)?;

    let invalid = PaymentData::new(-10, "tok_visa");
    if let Err(e) = offline.process_transaction(&with_phone, &invalid).await {
        writeln!(out, "Rejected: {}", e)?;
    }
    if let Err(e) = offline.process_refund("offline-1").await {
        writeln!(out, "Refund: {}", e.user_friendly_message())?;
    }

    writeln!(out, "\n--- Gateway processor with email notifications ---")?;
    if settings.api_key.is_none() {
        writeln!(out, "No payment.api_key configured, skipping the gateway run.")?;
        return Ok(());
    }

    let gateway = Arc::new(GatewayPaymentProcessor::from_settings(settings));
    let mut online = PaymentService::new(
        gateway.clone(),
        Box::new(EmailNotifier::default()),
        logger,
    )
    .with_refunds(gateway.clone());
    if settings.price_id.is_some() {
        online = online.with_recurring(gateway);
    }

    let charge = online.process_transaction(&with_email, &payment).await?;
    print_response(out, "Payment", &charge)?;

    if let Some(transaction_id) = charge.transaction_id.as_deref() {
        let refund = online.process_refund(transaction_id).await?;
        print_response(out, "Refund", &refund)?;
    }

    match online.setup_recurring(&with_email, &PaymentData::new(1000, "pm_card_visa")).await {
        Ok(subscription) => print_response(out, "Subscription", &subscription)?,
        Err(e) => writeln!(out, "Subscription: {}", e.user_friendly_message())?,
    }

    writeln!(out, "\nTransactions logged to {}", settings.transaction_log)?;
    Ok(())
}
