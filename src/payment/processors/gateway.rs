use super::{PaymentProcessor, RecurringPaymentProcessor, RefundProcessor};
use crate::config::toml_config::PaymentSettings;
use crate::payment::commons::{CustomerData, PaymentData, PaymentResponse};
use crate::utils::error::{LabError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Processor backed by a generic card gateway. Resources are shaped after
/// Stripe's; request bodies are JSON.
///
/// Rejections and unreachable gateways come back as a `"failed"` response
/// carrying the gateway's message; only invalid input is an `Err`.
#[derive(Debug, Clone)]
pub struct GatewayPaymentProcessor {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    currency: String,
    price_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GatewayObject {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct Subscription {
    id: String,
    status: String,
    items: SubscriptionItems,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItems {
    data: Vec<SubscriptionItem>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItem {
    price: Price,
}

#[derive(Debug, Deserialize)]
struct Price {
    unit_amount: Option<i64>,
}

impl GatewayPaymentProcessor {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            currency: "usd".to_string(),
            price_id: None,
        }
    }

    pub fn from_settings(settings: &PaymentSettings) -> Self {
        let mut processor = Self::new(&settings.gateway_url).with_currency(&settings.currency);
        processor.api_key = settings.api_key.clone();
        processor.price_id = settings.price_id.clone();
        processor
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into().to_lowercase();
        self
    }

    pub fn with_price_id(mut self, price_id: impl Into<String>) -> Self {
        self.price_id = Some(price_id.into());
        self
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let endpoint = format!("{}{}", self.base_url, path);
        tracing::debug!("gateway request: {} {}", method, endpoint);

        let mut request = self
            .client
            .request(method, &endpoint)
            .timeout(Duration::from_secs(30));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("gateway response status: {}", status);

        if !status.is_success() {
            let payload: Value = response.json().await.unwrap_or(Value::Null);
            let message = payload
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("gateway answered {}", status));
            return Err(LabError::GatewayError { message });
        }

        Ok(response.json::<T>().await?)
    }

    /// The payment's own currency, or the configured one when it is blank.
    fn currency_for(&self, payment: &PaymentData) -> String {
        match payment.currency.trim() {
            "" => self.currency.clone(),
            currency => currency.to_lowercase(),
        }
    }

    async fn get_or_create_customer(&self, customer: &CustomerData) -> Result<String> {
        if let Some(customer_id) = &customer.customer_id {
            let existing: GatewayObject = self
                .call(Method::GET, &format!("/v1/customers/{}", customer_id), None)
                .await?;
            tracing::info!("customer retrieved: {}", existing.id);
            return Ok(existing.id);
        }

        let email = customer
            .contact_info
            .email()
            .ok_or_else(|| LabError::validation("Email is required to create a customer"))?;
        let created: GatewayObject = self
            .call(
                Method::POST,
                "/v1/customers",
                Some(json!({ "name": customer.name, "email": email })),
            )
            .await?;
        tracing::info!("customer created: {}", created.id);
        Ok(created.id)
    }

    async fn attach_payment_method(&self, customer_id: &str, source: &str) -> Result<String> {
        let method: GatewayObject = self
            .call(Method::GET, &format!("/v1/payment_methods/{}", source), None)
            .await?;
        let _: Value = self
            .call(
                Method::POST,
                &format!("/v1/payment_methods/{}/attach", method.id),
                Some(json!({ "customer": customer_id })),
            )
            .await?;
        tracing::info!("payment method {} attached to {}", method.id, customer_id);
        Ok(method.id)
    }

    async fn set_default_payment_method(&self, customer_id: &str, method_id: &str) -> Result<()> {
        let _: Value = self
            .call(
                Method::POST,
                &format!("/v1/customers/{}", customer_id),
                Some(json!({ "invoice_settings": { "default_payment_method": method_id } })),
            )
            .await?;
        Ok(())
    }

    async fn subscribe(&self, customer: &CustomerData, payment: &PaymentData) -> Result<Subscription> {
        let customer_id = self.get_or_create_customer(customer).await?;
        let method_id = self.attach_payment_method(&customer_id, &payment.source).await?;
        self.set_default_payment_method(&customer_id, &method_id).await?;

        self.call(
            Method::POST,
            "/v1/subscriptions",
            Some(json!({
                "customer": customer_id,
                "items": [{ "price": self.price_id.clone().unwrap_or_default() }],
                "expand": ["latest_invoice.payment_intent"],
            })),
        )
        .await
    }
}

/// Gateway and transport failures become a failed response, anything else
/// propagates.
fn settle(
    outcome: Result<PaymentResponse>,
    failed_amount: i64,
    operation: &str,
) -> Result<PaymentResponse> {
    match outcome {
        Err(e @ (LabError::GatewayError { .. } | LabError::HttpError(_))) => {
            tracing::warn!("error during {}: {}", operation, e);
            Ok(PaymentResponse::failed(failed_amount, e.to_string()))
        }
        other => other,
    }
}

#[async_trait]
impl PaymentProcessor for GatewayPaymentProcessor {
    async fn process_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let charge = self
            .call::<GatewayObject>(
                Method::POST,
                "/v1/charges",
                Some(json!({
                    "amount": payment.amount,
                    "currency": self.currency_for(payment),
                    "source": payment.source,
                    "description": format!("Charge for {}", customer.name),
                })),
            )
            .await
            .map(|charge| PaymentResponse {
                status: charge.status,
                amount: charge.amount,
                transaction_id: Some(charge.id),
                message: Some("Transaction succeeded".to_string()),
            });
        settle(charge, payment.amount, "the transaction")
    }
}

#[async_trait]
impl RefundProcessor for GatewayPaymentProcessor {
    async fn refund_payment(&self, transaction_id: &str) -> Result<PaymentResponse> {
        let refund = self
            .call::<GatewayObject>(
                Method::POST,
                "/v1/refunds",
                Some(json!({ "charge": transaction_id })),
            )
            .await
            .map(|refund| PaymentResponse {
                status: refund.status,
                amount: refund.amount,
                transaction_id: Some(refund.id),
                message: Some("Refund succeeded".to_string()),
            });
        settle(refund, 0, "the refund")
    }
}

#[async_trait]
impl RecurringPaymentProcessor for GatewayPaymentProcessor {
    async fn setup_recurring_payment(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
    ) -> Result<PaymentResponse> {
        let subscription = self
            .subscribe(customer, payment)
            .await
            .map(|subscription| PaymentResponse {
                amount: subscription
                    .items
                    .data
                    .first()
                    .and_then(|item| item.price.unit_amount)
                    .unwrap_or(0),
                status: subscription.status,
                transaction_id: Some(subscription.id),
                message: Some("Recurring payment set up".to_string()),
            });
        settle(subscription, 0, "the recurring payment setup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::commons::ContactInfo;
    use httpmock::prelude::*;

    fn customer() -> CustomerData {
        CustomerData::new("John Doe", ContactInfo::with_email("john@example.com"))
    }

    #[tokio::test]
    async fn test_successful_charge() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/charges")
                    .header("authorization", "Bearer sk_test")
                    .json_body(json!({
                        "amount": 1000,
                        "currency": "usd",
                        "source": "tok_visa",
                        "description": "Charge for John Doe",
                    }));
                then.status(200)
                    .json_body(json!({"id": "ch_1", "status": "succeeded", "amount": 1000}));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url()).with_api_key("sk_test");
        let response = processor
            .process_transaction(&customer(), &PaymentData::new(1000, "tok_visa"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, "succeeded");
        assert_eq!(response.transaction_id.as_deref(), Some("ch_1"));
    }

    #[tokio::test]
    async fn test_charge_uses_the_payment_currency() {
        let server = MockServer::start_async().await;
        let eur = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/charges")
                    .json_body_partial(r#"{"currency": "eur"}"#);
                then.status(200)
                    .json_body(json!({"id": "ch_eur", "status": "succeeded", "amount": 500}));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url()).with_currency("GBP");
        let payment = PaymentData {
            currency: "EUR".to_string(),
            ..PaymentData::new(500, "tok_visa")
        };
        let response = processor
            .process_transaction(&customer(), &payment)
            .await
            .unwrap();

        eur.assert_async().await;
        assert_eq!(response.transaction_id.as_deref(), Some("ch_eur"));
    }

    #[tokio::test]
    async fn test_blank_payment_currency_falls_back_to_configured() {
        let server = MockServer::start_async().await;
        let gbp = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/charges")
                    .json_body_partial(r#"{"currency": "gbp"}"#);
                then.status(200)
                    .json_body(json!({"id": "ch_gbp", "status": "succeeded", "amount": 500}));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url()).with_currency("GBP");
        let payment = PaymentData {
            currency: "  ".to_string(),
            ..PaymentData::new(500, "tok_visa")
        };
        processor
            .process_transaction(&customer(), &payment)
            .await
            .unwrap();

        gbp.assert_async().await;
    }

    #[tokio::test]
    async fn test_declined_charge_becomes_failed_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/charges");
                then.status(402)
                    .json_body(json!({"error": {"message": "Your card was declined."}}));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url());
        let response = processor
            .process_transaction(&customer(), &PaymentData::new(1000, "tok_chargeDeclined"))
            .await
            .unwrap();

        assert!(response.is_failed());
        assert_eq!(response.amount, 1000);
        assert_eq!(response.transaction_id, None);
        assert_eq!(
            response.message.as_deref(),
            Some("Gateway error: Your card was declined.")
        );
    }

    #[tokio::test]
    async fn test_refund() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/refunds")
                    .json_body(json!({"charge": "ch_1"}));
                then.status(200)
                    .json_body(json!({"id": "re_1", "status": "succeeded", "amount": 1000}));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url());
        let response = processor.refund_payment("ch_1").await.unwrap();
        assert_eq!(response.transaction_id.as_deref(), Some("re_1"));
        assert_eq!(response.amount, 1000);
    }

    #[tokio::test]
    async fn test_recurring_flow_for_new_customer() {
        let server = MockServer::start_async().await;
        let create_customer = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/customers")
                    .json_body(json!({"name": "John Doe", "email": "john@example.com"}));
                then.status(200).json_body(json!({"id": "cus_1"}));
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
                    .json_body(json!({"customer": "cus_1"}));
                then.status(200).json_body(json!({"id": "pm_1"}));
            })
            .await;
        let set_default = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/customers/cus_1");
                then.status(200).json_body(json!({"id": "cus_1"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/subscriptions");
                then.status(200).json_body(json!({
                    "id": "sub_1",
                    "status": "active",
                    "items": {"data": [{"price": {"unit_amount": 1500}}]}
                }));
            })
            .await;

        let processor = GatewayPaymentProcessor::new(server.base_url()).with_price_id("price_1");
        let response = processor
            .setup_recurring_payment(&customer(), &PaymentData::new(1500, "pm_card_visa"))
            .await
            .unwrap();

        create_customer.assert_async().await;
        attach.assert_async().await;
        set_default.assert_async().await;
        assert_eq!(response.status, "active");
        assert_eq!(response.amount, 1500);
        assert_eq!(response.transaction_id.as_deref(), Some("sub_1"));
    }

    #[tokio::test]
    async fn test_recurring_without_email_is_invalid() {
        let processor = GatewayPaymentProcessor::new("http://127.0.0.1:9");
        let customer = CustomerData::new("Jane", ContactInfo::with_phone("+1"));
        let err = processor
            .setup_recurring_payment(&customer, &PaymentData::new(100, "pm_1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email is required to create a customer");
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_a_failed_refund() {
        let processor = GatewayPaymentProcessor::new("http://127.0.0.1:9");
        let response = processor.refund_payment("ch_1").await.unwrap();
        assert!(response.is_failed());
        assert_eq!(response.amount, 0);
    }
}
