//! Reel Lead Capture
//!
//! The enquiry form that sits beside the story sections:
//!
//! - **Record**: the flat field-value record handed to delivery, serialized
//!   with camelCase field names
//! - **Form**: four-step progression (contact, project, requirements,
//!   additional) with multi-select toggles and submission state
//! - **Sinks**: the [`LeadSink`] seam a delivery endpoint plugs into, plus a
//!   logging sink and an in-memory sink
//!
//! # Example
//!
//! ```rust
//! use reel_lead::{LeadForm, MemorySink, ProjectType};
//!
//! let mut form = LeadForm::new();
//! form.record_mut().first_name = "Ada".into();
//! form.record_mut().last_name = "Lovelace".into();
//! form.record_mut().email = "ada@example.com".into();
//! form.toggle_project_type(ProjectType::Website);
//!
//! let mut sink = MemorySink::new();
//! form.submit(&mut sink).unwrap();
//! assert!(form.is_submitted());
//! assert_eq!(sink.payloads()[0]["firstName"], "Ada");
//! ```

pub mod error;
pub mod form;
pub mod record;
pub mod sink;

pub use error::{LeadError, Result};
pub use form::{FormStep, LeadForm, SubmitState};
pub use record::{Budget, Goal, LeadRecord, ProjectTimeline, ProjectType, ReferralSource, Urgency};
pub use sink::{LeadSink, LogSink, MemorySink};
