use crate::utils::error::Result;
use std::io::Write;

/// What happened when an action was delegated to the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub transitioned_to: Option<&'static str>,
}

impl Outcome {
    fn stay(message: &str) -> Self {
        Self {
            message: message.to_string(),
            transitioned_to: None,
        }
    }

    fn moved(message: &str, to: &'static str) -> Self {
        Self {
            message: message.to_string(),
            transitioned_to: Some(to),
        }
    }
}

trait DocumentState {
    fn name(&self) -> &'static str;
    fn request_review(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome);
    fn publish(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome);
}

struct Draft;
struct Moderation;
struct Published;

impl DocumentState for Draft {
    fn name(&self) -> &'static str {
        "Draft"
    }

    fn request_review(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (
            Box::new(Moderation),
            Outcome::moved("Draft: review requested, moving to Moderation.", "Moderation"),
        )
    }

    fn publish(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (
            self,
            Outcome::stay("Draft: cannot publish yet. Request a review first."),
        )
    }
}

impl DocumentState for Moderation {
    fn name(&self) -> &'static str {
        "Moderation"
    }

    fn request_review(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (self, Outcome::stay("Moderation: the document is already in review."))
    }

    fn publish(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (
            Box::new(Published),
            Outcome::moved("Moderation: approved and published.", "Published"),
        )
    }
}

impl DocumentState for Published {
    fn name(&self) -> &'static str {
        "Published"
    }

    fn request_review(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (
            self,
            Outcome::stay("Published: cannot request a review, the document is already published."),
        )
    }

    fn publish(self: Box<Self>) -> (Box<dyn DocumentState>, Outcome) {
        (self, Outcome::stay("Published: the document has already been published."))
    }
}

/// The context.
pub struct Document {
    pub content: String,
    state: Option<Box<dyn DocumentState>>,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            state: Some(Box::new(Draft)),
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.as_ref().map(|s| s.name()).unwrap_or("Draft")
    }

    pub fn request_review(&mut self) -> Outcome {
        self.delegate(|state| state.request_review())
    }

    pub fn publish(&mut self) -> Outcome {
        self.delegate(|state| state.publish())
    }

    fn delegate(
        &mut self,
        action: impl FnOnce(Box<dyn DocumentState>) -> (Box<dyn DocumentState>, Outcome),
    ) -> Outcome {
        // the slot is always refilled before returning
        let current = self.state.take().unwrap_or_else(|| Box::new(Draft));
        let (next, outcome) = action(current);
        if let Some(to) = outcome.transitioned_to {
            tracing::debug!("Document: transition to {}", to);
        }
        self.state = Some(next);
        outcome
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let mut doc = Document::new("This is my first draft.");
    writeln!(out, "Document: starting in {}.", doc.state_name())?;

    let steps: [(&str, fn(&mut Document) -> Outcome); 5] = [
        ("Trying to publish from Draft", Document::publish),
        ("Requesting a review", Document::request_review),
        ("Requesting a review again (in Moderation)", Document::request_review),
        ("Publishing the document", Document::publish),
        ("Trying to publish again (already Published)", Document::publish),
    ];

    for (title, step) in steps {
        writeln!(out, "\n--- {} ---", title)?;
        let outcome = step(&mut doc);
        writeln!(out, "{}", outcome.message)?;
        if let Some(to) = outcome.transitioned_to {
            writeln!(out, "Document: transition to {}.", to)?;
        }
    }
    Ok(())
}
