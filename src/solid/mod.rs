pub mod monolith;

pub use monolith::MonolithicPaymentProcessor;
