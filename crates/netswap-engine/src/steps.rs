use crate::time::now_rfc3339;
use netswap_model::OperationStep;

/// Ordered, append-only history of one orchestration run. A step is recorded
/// exactly once, at its terminal status; records are never mutated.
#[derive(Debug, Default)]
pub(crate) struct StepLog {
    steps: Vec<OperationStep>,
}

impl StepLog {
    pub(crate) fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub(crate) fn complete(&mut self, message: impl Into<String>) {
        let step = self.next_number();
        self.steps
            .push(OperationStep::completed(step, message, now_rfc3339()));
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>, error: impl Into<String>) {
        let step = self.next_number();
        self.steps
            .push(OperationStep::failed(step, message, now_rfc3339(), error));
    }

    pub(crate) fn into_steps(self) -> Vec<OperationStep> {
        self.steps
    }

    fn next_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}
