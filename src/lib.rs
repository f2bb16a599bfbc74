pub mod catalog;
pub mod config;
pub mod patterns;
pub mod payment;
pub mod solid;
pub mod transcribe;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use catalog::{Category, Demo};
pub use config::LabConfig;
pub use payment::PaymentService;
pub use transcribe::{TranscriptionOutcome, TranscriptionService};
pub use utils::error::{LabError, Result};
