//! Field validation for the intake form.
//!
//! Split in two layers:
//! - [`field`] — pure per-field checks mapping a semantic kind and raw value
//!   to a verdict.
//! - [`engine`] — runs the per-field checks across an ordered set of field
//!   specs and aggregates them into a single step-level decision.
//!
//! Validation never reads UI state and never throws: malformed input is
//! represented as a failing verdict the view can display.

pub mod engine;
pub mod field;

pub use engine::{FieldSpec, StepValidation, ValidationEngine};
pub use field::{FieldKind, FieldValidator, ValidationVerdict};
