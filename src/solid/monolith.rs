use crate::utils::error::{LabError, Result};
use serde_json::{json, Value};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub id: String,
    pub status: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonolithReceipt {
    pub charge: Charge,
    pub notification: Option<String>,
    pub logged: bool,
}

#[derive(Debug, Clone)]
pub struct MonolithicPaymentProcessor {
    log_path: PathBuf,
    sms_gateway: String,
}

impl MonolithicPaymentProcessor {
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            sms_gateway: "the SMS gateway".to_string(),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn process_transaction(&self, customer: &Value, payment: &Value) -> Result<MonolithReceipt> {
        let name = customer
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                tracing::warn!("invalid customer data: a name is required");
                LabError::validation("Invalid customer data: missing name")
            })?;

        let contact = customer
            .get("contact_info")
            .filter(|c| c.as_object().is_some_and(|o| !o.is_empty()))
            .ok_or_else(|| {
                tracing::warn!("invalid customer data: an email or phone is required");
                LabError::validation("Invalid customer data: missing contact info")
            })?;

        let source = payment
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LabError::validation("Invalid payment data"))?;
        let amount = payment.get("amount").and_then(Value::as_i64).unwrap_or(0);

        // the "gateway call" lives right here too
        tracing::debug!("charging {} to source {}", amount, source);
        let charge = Charge {
            id: format!("ch_{}", Uuid::new_v4().simple()),
            status: "succeeded".to_string(),
            amount,
        };

        let notification = if let Some(email) = contact.get("email").and_then(Value::as_str) {
            format!("Email sent to {}", email)
        } else if let Some(phone) = contact.get("phone").and_then(Value::as_str) {
            format!(
                "SMS sent through gateway {} to {}: Thank you for your purchase.",
                self.sms_gateway, phone
            )
        } else {
            // an unreachable customer also skips the log write
            tracing::warn!("could not send the notification: contact info is missing");
            return Ok(MonolithReceipt {
                charge,
                notification: None,
                logged: false,
            });
        };

        let mut log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        write!(
            log_file,
            "{} - paid {} - {}\nPayment status: {}\n",
            name, charge.amount, charge.id, charge.status
        )?;

        Ok(MonolithReceipt {
            charge,
            notification: Some(notification),
            logged: true,
        })
    }
}

const LOG_DIR_PREFIX: &str = "pattern-lab-monolith-";

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    // Removed on drop, including when a write below fails.
    let log_dir = tempfile::Builder::new().prefix(LOG_DIR_PREFIX).tempdir()?;
    let log_path = log_dir.path().join("transactions.log");
    let processor = MonolithicPaymentProcessor::new(&log_path);
    let payment = json!({"amount": 1000, "source": "tok_visa", "cvv": "123"});

    let customers = [
        json!({"name": "John Doe", "contact_info": {"email": "e@gmail.com"}}),
        json!({"name": "Jane Smith", "contact_info": {"phone": "+1234567890"}}),
        json!({"name": "", "contact_info": {"phone": "+1234567890"}}),
    ];

    for customer in &customers {
        match processor.process_transaction(customer, &payment) {
            Ok(receipt) => {
                writeln!(
                    out,
                    "Charge {} {} for {}",
                    receipt.charge.id, receipt.charge.status, receipt.charge.amount
                )?;
                if let Some(notification) = receipt.notification {
                    writeln!(out, "  {}", notification)?;
                }
            }
            Err(e) => writeln!(out, "Rejected: {}", e)?,
        }
    }

    writeln!(out, "\nTransaction log:")?;
    write!(out, "{}", std::fs::read_to_string(&log_path)?)?;
    Ok(())
}
