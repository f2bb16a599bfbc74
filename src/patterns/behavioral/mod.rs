pub mod chain_of_responsibility;
pub mod command;
pub mod mediator;
pub mod observer;
pub mod state;
pub mod strategy;
pub mod template_method;
