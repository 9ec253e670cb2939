//! Optional observability helpers for widget stages.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `auth_picker.stage` with the `stage` and
//!   `site` (call site) fields.
//! - Enable `metrics` to increment the `auth_picker_stage_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Widget stages observed by the instrumentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
	/// Provider-list discovery cycle.
	Discovery,
	/// Login dispatch.
	Dispatch,
	/// Callback-token parsing.
	Callback,
}
impl StageKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageKind::Discovery => "discovery",
			StageKind::Dispatch => "dispatch",
			StageKind::Callback => "callback",
		}
	}
}
impl Display for StageKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a widget stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure surfaced through the widget's error handling.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
