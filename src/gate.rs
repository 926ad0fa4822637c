//! Confirmation gate in front of destructive actions.

use tracing::debug;

use crate::prompt::Prompter;

/// Where a gate stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Pending,
    Resolved(bool),
}

/// A yes/no question that must be answered before a request proceeds.
///
/// The prompt is shown at most once; later calls to [`ConfirmationGate::ask`]
/// return the stored answer.
#[derive(Debug)]
pub struct ConfirmationGate<'a> {
    title: &'a str,
    question: &'a str,
    state: GateState,
}

impl<'a> ConfirmationGate<'a> {
    pub fn new(title: &'a str, question: &'a str) -> Self {
        Self {
            title,
            question,
            state: GateState::Pending,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Record an answer obtained elsewhere. A resolved gate keeps its first answer.
    pub fn resolve(&mut self, answer: bool) -> bool {
        if let GateState::Resolved(previous) = self.state {
            return previous;
        }
        debug!(question = self.question, answer, "confirmation resolved");
        self.state = GateState::Resolved(answer);
        answer
    }

    /// Block on `prompter` while pending, then report whether to proceed
    pub fn ask(&mut self, prompter: &dyn Prompter) -> bool {
        match self.state {
            GateState::Resolved(answer) => answer,
            GateState::Pending => {
                let answer = prompter.confirm(self.title, self.question);
                self.resolve(answer)
            }
        }
    }

    /// Run `proceed` only after a positive answer
    pub fn guard<T>(&mut self, prompter: &dyn Prompter, proceed: impl FnOnce() -> T) -> Option<T> {
        self.ask(prompter).then(proceed)
    }
}
