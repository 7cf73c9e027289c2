use super::types::{BucketSelection, Substep};

/// Wizard progress and the bucket data is written to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepsState {
    pub current_step: usize,
    pub substep: Option<Substep>,
    pub selection: Option<BucketSelection>,
}

impl StepsState {
    pub fn set_bucket_info(&mut self, selection: BucketSelection) {
        self.selection = Some(selection);
    }

    pub fn set_current_step(&mut self, step: usize) {
        self.current_step = step;
    }

    pub fn increment(&mut self) {
        self.current_step = self.current_step.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// A substep always belongs to the step it is set with
    pub fn set_substep(&mut self, step: usize, substep: Substep) {
        self.current_step = step;
        self.substep = Some(substep);
    }

    /// Id of the selected bucket, or an empty string
    pub fn selected_bucket_id(&self) -> &str {
        self.selection
            .as_ref()
            .map(|s| s.bucket_id.as_str())
            .unwrap_or("")
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
