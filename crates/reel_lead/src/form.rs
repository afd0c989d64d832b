//! Multi-step enquiry form
//!
//! The form walks through four steps. Moving forward and back never leaves
//! the `1..=4` range, and submission is only offered from the last step in
//! the UI, though [`LeadForm::submit`] itself only cares that the record is
//! valid.

use std::fmt;

use crate::error::{LeadError, Result};
use crate::record::{Goal, LeadRecord, ProjectType};
use crate::sink::LeadSink;

/// One page of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormStep {
    Contact = 1,
    Project = 2,
    Requirements = 3,
    Additional = 4,
}

impl FormStep {
    pub const ALL: [FormStep; 4] = [
        FormStep::Contact,
        FormStep::Project,
        FormStep::Requirements,
        FormStep::Additional,
    ];

    /// 1-based position of the step
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(self) -> &'static str {
        match self {
            FormStep::Contact => "Contact Information",
            FormStep::Project => "Project Details",
            FormStep::Requirements => "Requirements",
            FormStep::Additional => "Additional Information",
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.number(), Self::ALL.len())
    }
}

/// Where the form is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Editing,
    /// Delivered; the form shows its confirmation until reset
    Submitted,
}

/// Enquiry form state
#[derive(Clone, Debug)]
pub struct LeadForm {
    step: FormStep,
    record: LeadRecord,
    state: SubmitState,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadForm {
    /// An empty form on the first step
    pub fn new() -> Self {
        Self {
            step: FormStep::Contact,
            record: LeadRecord::default(),
            state: SubmitState::Editing,
        }
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    /// Completion shown in the progress bar, `step / 4 * 100`
    pub fn progress_percent(&self) -> f32 {
        self.step.number() as f32 / FormStep::ALL.len() as f32 * 100.0
    }

    /// Go to the next step; returns false on the last step
    pub fn next(&mut self) -> bool {
        self.go(self.step.next())
    }

    /// Go to the previous step; returns false on the first step
    pub fn back(&mut self) -> bool {
        self.go(self.step.previous())
    }

    fn go(&mut self, step: Option<FormStep>) -> bool {
        match step {
            Some(step) => {
                tracing::debug!(from = self.step.number(), to = step.number(), "lead form step");
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn record(&self) -> &LeadRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut LeadRecord {
        &mut self.record
    }

    /// Select or deselect a project type; returns whether it is now selected
    pub fn toggle_project_type(&mut self, project_type: ProjectType) -> bool {
        toggle(&mut self.record.project_type, project_type)
    }

    /// Select or deselect a goal; returns whether it is now selected
    pub fn toggle_goal(&mut self, goal: Goal) -> bool {
        toggle(&mut self.record.goals, goal)
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SubmitState::Submitted
    }

    /// Validate the record and hand it to `sink`
    ///
    /// On any error the form keeps its data and stays editable.
    pub fn submit(&mut self, sink: &mut dyn LeadSink) -> Result<()> {
        if self.is_submitted() {
            return Err(LeadError::AlreadySubmitted);
        }
        self.record.validate()?;
        sink.deliver(&self.record)?;

        tracing::info!(
            name = %self.record.full_name(),
            projects = self.record.project_type.len(),
            goals = self.record.goals.len(),
            "lead submitted"
        );
        self.state = SubmitState::Submitted;
        Ok(())
    }

    /// Clear everything and return to the first step
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Remove `value` if present, otherwise append it
fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) -> bool {
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
            false
        }
        None => {
            values.push(value);
            true
        }
    }
}
