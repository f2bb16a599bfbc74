use super::commons::{CustomerData, PaymentData, PaymentResponse};
use crate::utils::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends a plain-text trail of transactions and refunds to a log file.
#[derive(Debug, Clone)]
pub struct TransactionLogger {
    path: PathBuf,
}

impl TransactionLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_transaction(
        &self,
        customer: &CustomerData,
        payment: &PaymentData,
        response: &PaymentResponse,
    ) -> Result<()> {
        let mut entry = format!(
            "{} paid {}\nPayment status: {}\n",
            customer.name, payment.amount, response.status
        );
        if let Some(transaction_id) = &response.transaction_id {
            entry.push_str(&format!("Transaction ID: {}\n", transaction_id));
        }
        entry.push_str(&format!("Message: {}\n", response.message.as_deref().unwrap_or("-")));
        self.append(&entry)
    }

    pub fn log_refund(&self, transaction_id: &str, response: &PaymentResponse) -> Result<()> {
        self.append(&format!(
            "Refund processed for transaction {}\nRefund status: {}\nMessage: {}\n",
            transaction_id,
            response.status,
            response.message.as_deref().unwrap_or("-")
        ))
    }

    fn append(&self, entry: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        tracing::debug!("transaction log updated: {}", self.path.display());
        Ok(())
    }
}
