use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseRequest {
    pub id: u32,
    pub amount: f64,
}

impl PurchaseRequest {
    pub fn new(id: u32, amount: f64) -> Self {
        Self { id, amount }
    }
}

pub trait ApprovalHandler {
    /// Appends `handler` at the end of the chain.
    fn set_next(&mut self, handler: Box<dyn ApprovalHandler>);

    fn next(&self) -> Option<&dyn ApprovalHandler>;

    /// Approves the request or passes it on. `None` when nobody in the chain
    /// could handle it.
    fn handle(&self, request: &PurchaseRequest) -> Option<String>;

    fn pass_on(&self, request: &PurchaseRequest) -> Option<String> {
        self.next().and_then(|next| next.handle(request))
    }
}

/// A handler that signs off anything up to `limit`.
pub struct LimitApprover {
    role: &'static str,
    limit: Option<f64>,
    next: Option<Box<dyn ApprovalHandler>>,
}

impl LimitApprover {
    pub fn manager() -> Self {
        Self::with_limit("Manager", Some(1000.0))
    }

    pub fn director() -> Self {
        Self::with_limit("Director", Some(5000.0))
    }

    /// No upper limit.
    pub fn ceo() -> Self {
        Self::with_limit("CEO", None)
    }

    pub fn with_limit(role: &'static str, limit: Option<f64>) -> Self {
        Self {
            role,
            limit,
            next: None,
        }
    }

    pub fn role(&self) -> &'static str {
        self.role
    }
}

impl ApprovalHandler for LimitApprover {
    fn set_next(&mut self, handler: Box<dyn ApprovalHandler>) {
        match self.next.as_mut() {
            Some(next) => next.set_next(handler),
            None => self.next = Some(handler),
        }
    }

    fn next(&self) -> Option<&dyn ApprovalHandler> {
        self.next.as_deref()
    }

    fn handle(&self, request: &PurchaseRequest) -> Option<String> {
        let within_limit = self.limit.map_or(true, |limit| request.amount <= limit);
        if within_limit {
            return Some(format!(
                "Request {}: approved by the {} (amount: ${})",
                request.id, self.role, request.amount
            ));
        }

        tracing::debug!(
            "Request {}: amount ${} too high for the {}, passing it on",
            request.id,
            request.amount,
            self.role
        );
        self.pass_on(request)
    }
}

/// Manager → Director → CEO.
pub fn approval_chain() -> Box<dyn ApprovalHandler> {
    let mut manager = LimitApprover::manager();
    manager.set_next(Box::new(LimitApprover::director()));
    manager.set_next(Box::new(LimitApprover::ceo()));
    Box::new(manager)
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let chain = approval_chain();
    let requests = [
        PurchaseRequest::new(1, 500.0),
        PurchaseRequest::new(2, 2500.0),
        PurchaseRequest::new(3, 10000.0),
        PurchaseRequest::new(4, 999.0),
    ];

    for request in &requests {
        writeln!(
            out,
            "\nClient: sending request {} for ${}...",
            request.id, request.amount
        )?;
        match chain.handle(request) {
            Some(result) => writeln!(out, "  {}", result)?,
            None => writeln!(
                out,
                "  Request {}: nobody in the chain could handle it.",
                request.id
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_level_approves_its_range() {
        let chain = approval_chain();
        let approver = |amount: f64| chain.handle(&PurchaseRequest::new(1, amount)).unwrap();

        assert!(approver(500.0).contains("Manager"));
        assert!(approver(1000.0).contains("Manager"));
        assert!(approver(1000.01).contains("Director"));
        assert!(approver(5000.0).contains("Director"));
        assert!(approver(10000.0).contains("CEO"));
    }

    #[test]
    fn test_unhandled_request() {
        let mut manager = LimitApprover::manager();
        manager.set_next(Box::new(LimitApprover::director()));

        assert_eq!(manager.handle(&PurchaseRequest::new(9, 7500.0)), None);
    }

    #[test]
    fn test_message_format() {
        let result = LimitApprover::ceo().handle(&PurchaseRequest::new(3, 10000.0));
        assert_eq!(
            result.as_deref(),
            Some("Request 3: approved by the CEO (amount: $10000)")
        );
    }
}
