use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: None,
        }
    }

    pub fn with_phone(phone: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(phone.into()),
        }
    }

    /// The email address, ignoring blank values.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// The phone number, ignoring blank values.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub name: String,
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub customer_id: Option<String>,
}

impl CustomerData {
    pub fn new(name: impl Into<String>, contact_info: ContactInfo) -> Self {
        Self {
            name: name.into(),
            contact_info,
            customer_id: None,
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Amounts are in the currency's smallest unit (cents for USD).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentData {
    pub amount: i64,
    pub source: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentData {
    pub fn new(amount: i64, source: impl Into<String>) -> Self {
        Self {
            amount,
            source: source.into(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub status: String,
    pub amount: i64,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PaymentResponse {
    pub fn failed(amount: i64, message: impl Into<String>) -> Self {
        Self {
            status: "failed".to_string(),
            amount,
            transaction_id: None,
            message: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }
}
