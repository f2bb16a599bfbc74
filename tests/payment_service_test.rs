use httpmock::prelude::*;
use pattern_lab::config::PaymentSettings;
use pattern_lab::payment::notifiers::{EmailNotifier, SmsNotifier};
use pattern_lab::payment::processors::{GatewayPaymentProcessor, OfflinePaymentProcessor};
use pattern_lab::payment::{
    self, ContactInfo, CustomerData, PaymentData, PaymentService, TransactionLogger,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn gateway_settings(server: &MockServer, dir: &TempDir) -> PaymentSettings {
    PaymentSettings {
        gateway_url: server.base_url(),
        api_key: Some("sk_test_123".to_string()),
        transaction_log: dir
            .path()
            .join("transactions.log")
            .to_string_lossy()
            .to_string(),
        ..PaymentSettings::default()
    }
}

#[tokio::test]
async fn test_gateway_charge_then_refund_are_logged() {
    let server = MockServer::start_async().await;
    let charge_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/charges")
                .header("authorization", "Bearer sk_test_123");
            then.status(200)
                .json_body(json!({"id": "ch_1", "status": "succeeded", "amount": 1000}));
        })
        .await;
    let refund_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/refunds");
            then.status(200)
                .json_body(json!({"id": "re_1", "status": "succeeded", "amount": 1000}));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let settings = gateway_settings(&server, &dir);
    let gateway = Arc::new(GatewayPaymentProcessor::from_settings(&settings));
    let service = PaymentService::new(
        gateway.clone(),
        Box::new(EmailNotifier::default()),
        TransactionLogger::new(&settings.transaction_log),
    )
    .with_refunds(gateway);

    let customer = CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"));
    let charge = service
        .process_transaction(&customer, &PaymentData::new(1000, "tok_visa"))
        .await
        .unwrap();
    assert_eq!(charge.status, "succeeded");
    assert_eq!(charge.transaction_id.as_deref(), Some("ch_1"));

    let refund = service.process_refund("ch_1").await.unwrap();
    assert_eq!(refund.transaction_id.as_deref(), Some("re_1"));

    charge_mock.assert_async().await;
    refund_mock.assert_async().await;

    let log = std::fs::read_to_string(&settings.transaction_log).unwrap();
    assert!(log.contains("John Doe paid 1000"));
    assert!(log.contains("Transaction ID: ch_1"));
    assert!(log.contains("Refund processed for transaction ch_1"));
}

#[tokio::test]
async fn test_declined_charge_is_reported_not_raised() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/charges");
            then.status(402)
                .json_body(json!({"error": {"message": "Your card was declined."}}));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let settings = gateway_settings(&server, &dir);
    let service = PaymentService::new(
        Arc::new(GatewayPaymentProcessor::from_settings(&settings)),
        Box::new(EmailNotifier::default()),
        TransactionLogger::new(&settings.transaction_log),
    );

    let customer = CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"));
    let response = service
        .process_transaction(&customer, &PaymentData::new(1000, "tok_chargeDeclined"))
        .await
        .unwrap();

    assert!(response.is_failed());
    assert!(response
        .message
        .as_deref()
        .unwrap_or_default()
        .contains("Your card was declined."));
}

#[tokio::test]
async fn test_invalid_customer_never_reaches_the_processor() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let service = PaymentService::new(
        Arc::new(OfflinePaymentProcessor),
        Box::new(SmsNotifier::new("test-gateway")),
        TransactionLogger::new(&log_path),
    );

    let nameless = CustomerData::new("", ContactInfo::with_phone("+1234567890"));
    let err = service
        .process_transaction(&nameless, &PaymentData::new(1000, "cash"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Invalid customer data: missing name");
    assert!(!log_path.exists());
}

#[tokio::test]
async fn test_offline_setup_has_no_refunds_or_recurring() {
    let dir = TempDir::new().unwrap();
    let service = PaymentService::new(
        Arc::new(OfflinePaymentProcessor),
        Box::new(SmsNotifier::new("test-gateway")),
        TransactionLogger::new(dir.path().join("transactions.log")),
    );
    let customer = CustomerData::new("Jane Smith", ContactInfo::with_phone("+1234567890"));

    let refund = service.process_refund("any").await.unwrap_err();
    assert_eq!(refund.user_friendly_message(), "This setup does not support refunds");

    let recurring = service
        .setup_recurring(&customer, &PaymentData::new(1000, "pm_card_visa"))
        .await
        .unwrap_err();
    assert_eq!(
        recurring.user_friendly_message(),
        "This setup does not support recurring payments"
    );
}

#[tokio::test]
async fn test_walkthrough_without_api_key_stays_offline() {
    let dir = TempDir::new().unwrap();
    let settings = PaymentSettings {
        transaction_log: dir.path().join("t.log").to_string_lossy().to_string(),
        ..PaymentSettings::default()
    };

    let mut out = Vec::new();
    payment::run_walkthrough(&settings, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("Offline payment succeeded"));
    assert!(output.contains("Rejected: Invalid payment data: amount must be positive"));
    assert!(output.contains("This setup does not support refunds"));
    assert!(output.contains("skipping the gateway run"));
}

#[tokio::test]
async fn test_walkthrough_against_mock_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/charges");
            then.status(200)
                .json_body(json!({"id": "ch_9", "status": "succeeded", "amount": 1000}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/refunds");
            then.status(200)
                .json_body(json!({"id": "re_9", "status": "succeeded", "amount": 1000}));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let settings = gateway_settings(&server, &dir);

    let mut out = Vec::new();
    payment::run_walkthrough(&settings, &mut out).await.unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("id=ch_9"), "{}", output);
    assert!(output.contains("id=re_9"), "{}", output);
    assert!(output.contains("Subscription: This setup does not support recurring payments"));
}

#[tokio::test]
async fn test_recurring_for_existing_customer_retrieves_instead_of_creating() {
    let server = MockServer::start_async().await;
    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/customers/cus_42");
            then.status(200).json_body(json!({"id": "cus_42"}));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/customers");
            then.status(200).json_body(json!({"id": "cus_new"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/payment_methods/pm_card_visa");
            then.status(200).json_body(json!({"id": "pm_1"}));
        })
        .await;
    let attach = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/payment_methods/pm_1/attach")
                .json_body(json!({"customer": "cus_42"}));
            then.status(200).json_body(json!({"id": "pm_1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/customers/cus_42");
            then.status(200).json_body(json!({"id": "cus_42"}));
        })
        .await;
    let subscribe = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/subscriptions")
                .json_body_partial(r#"{"customer": "cus_42", "items": [{"price": "price_gold"}]}"#);
            then.status(200).json_body(json!({
                "id": "sub_42",
                "status": "active",
                "items": {"data": [{"price": {"unit_amount": 2500}}]}
            }));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let settings = PaymentSettings {
        price_id: Some("price_gold".to_string()),
        ..gateway_settings(&server, &dir)
    };
    let gateway = Arc::new(GatewayPaymentProcessor::from_settings(&settings));
    let service = PaymentService::new(
        gateway.clone(),
        Box::new(EmailNotifier::default()),
        TransactionLogger::new(&settings.transaction_log),
    )
    .with_recurring(gateway);

    let customer = CustomerData {
        customer_id: Some("cus_42".to_string()),
        ..CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"))
    };
    let response = service
        .setup_recurring(&customer, &PaymentData::new(2500, "pm_card_visa"))
        .await
        .unwrap();

    retrieve.assert_async().await;
    create.assert_hits_async(0).await;
    attach.assert_async().await;
    subscribe.assert_async().await;
    assert_eq!(response.status, "active");
    assert_eq!(response.amount, 2500);
    assert_eq!(response.transaction_id.as_deref(), Some("sub_42"));
}

#[tokio::test]
async fn test_rejected_subscription_is_a_failed_response_with_zero_amount() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/customers");
            then.status(200).json_body(json!({"id": "cus_1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/payment_methods/pm_card_visa");
            then.status(200).json_body(json!({"id": "pm_1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/payment_methods/pm_1/attach");
            then.status(200).json_body(json!({"id": "pm_1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/customers/cus_1");
            then.status(200).json_body(json!({"id": "cus_1"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/subscriptions");
            then.status(400)
                .json_body(json!({"error": {"message": "No such price: 'price_missing'"}}));
        })
        .await;

    let dir = TempDir::new().unwrap();
    let settings = PaymentSettings {
        price_id: Some("price_missing".to_string()),
        ..gateway_settings(&server, &dir)
    };
    let gateway = Arc::new(GatewayPaymentProcessor::from_settings(&settings));
    let service = PaymentService::new(
        gateway.clone(),
        Box::new(EmailNotifier::default()),
        TransactionLogger::new(&settings.transaction_log),
    )
    .with_recurring(gateway);

    let customer = CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"));
    let response = service
        .setup_recurring(&customer, &PaymentData::new(1000, "pm_card_visa"))
        .await
        .unwrap();

    assert!(response.is_failed());
    assert_eq!(response.amount, 0);
    assert_eq!(response.transaction_id, None);
    assert_eq!(
        response.message.as_deref(),
        Some("Gateway error: No such price: 'price_missing'")
    );

    let log = std::fs::read_to_string(&settings.transaction_log).unwrap();
    assert!(log.contains("Payment status: failed"));
}

#[tokio::test]
async fn test_notifier_failure_after_charge_skips_the_log() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("transactions.log");
    let service = PaymentService::new(
        Arc::new(OfflinePaymentProcessor),
        Box::new(EmailNotifier::default()),
        TransactionLogger::new(&log_path),
    );

    // Valid for the validator (a phone is enough) but the email notifier needs an address.
    let customer = CustomerData::new("Jane Smith", ContactInfo::with_phone("+1234567890"));
    let err = service
        .process_transaction(&customer, &PaymentData::new(1000, "cash"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Email address is required to send an email");
    assert!(!log_path.exists());
}
