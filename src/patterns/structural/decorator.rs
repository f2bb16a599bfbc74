use crate::utils::error::Result;
use std::io::Write;

pub trait Notifier {
    fn send(&self, message: &str) -> String;
}

#[derive(Debug, Default)]
pub struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn send(&self, message: &str) -> String {
        format!("Email notification: '{}'", message)
    }
}

pub struct SmsNotifierDecorator<N: Notifier> {
    wrapped: N,
}

impl<N: Notifier> SmsNotifierDecorator<N> {
    pub fn new(wrapped: N) -> Self {
        Self { wrapped }
    }
}

impl<N: Notifier> Notifier for SmsNotifierDecorator<N> {
    fn send(&self, message: &str) -> String {
        format!("SMS notification: '{}'\n{}", message, self.wrapped.send(message))
    }
}

pub struct SlackNotifierDecorator<N: Notifier> {
    wrapped: N,
}

impl<N: Notifier> SlackNotifierDecorator<N> {
    pub fn new(wrapped: N) -> Self {
        Self { wrapped }
    }
}

impl<N: Notifier> Notifier for SlackNotifierDecorator<N> {
    fn send(&self, message: &str) -> String {
        format!("Slack notification: '{}'\n{}", message, self.wrapped.send(message))
    }
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send(&self, message: &str) -> String {
        (**self).send(message)
    }
}

fn client_code(notifier: &dyn Notifier, message: &str, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n--- RESULT ---")?;
    writeln!(out, "{}", notifier.send(message))?;
    writeln!(out, "--------------")?;
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let message = "Your order has been shipped!";

    writeln!(out, "Client: a plain component (EmailNotifier):")?;
    client_code(&EmailNotifier, message, out)?;

    writeln!(out, "\nClient: a decorated component (Email + SMS):")?;
    let with_sms = SmsNotifierDecorator::new(EmailNotifier);
    client_code(&with_sms, message, out)?;

    writeln!(out, "\nClient: a doubly decorated component (Email + SMS + Slack):")?;
    let with_slack = SlackNotifierDecorator::new(with_sms);
    client_code(&with_slack, message, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorator_keeps_wrapped_behaviour() {
        let notifier = SmsNotifierDecorator::new(EmailNotifier);
        assert_eq!(
            notifier.send("hi"),
            "SMS notification: 'hi'\nEmail notification: 'hi'"
        );
    }

    #[test]
    fn test_stacking_order() {
        let notifier = SlackNotifierDecorator::new(SmsNotifierDecorator::new(EmailNotifier));
        let lines: Vec<String> = notifier.send("x").lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "Slack notification: 'x'",
                "SMS notification: 'x'",
                "Email notification: 'x'",
            ]
        );
    }

    #[test]
    fn test_boxed_components_can_be_wrapped() {
        let base: Box<dyn Notifier> = Box::new(EmailNotifier);
        let notifier = SlackNotifierDecorator::new(base);
        assert!(notifier.send("y").ends_with("Email notification: 'y'"));
    }
}
