//! Widget configuration surface: the immutable options record and its builder.
//!
//! `id` holds the validated identifier newtypes; `builder` assembles and
//! validates [`WidgetConfig`] values. Success/failure hooks are injected on
//! the widget builder instead, keeping this record plain data.

pub mod builder;
pub mod id;

pub use builder::*;
pub use id::*;

// self
use crate::{_prelude::*, region::Region};

/// Default button text prefix.
pub const DEFAULT_PRETEXT: &str = "Sign in with";

/// Immutable per-mount configuration for an auth widget.
///
/// Supplied once when the widget is built; the two discovery-triggering
/// inputs (workspace id and region) can later be replaced together through
/// `AuthWidget::retarget`, which restarts discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
	/// Workspace whose providers are listed.
	pub workspace_id: WorkspaceId,
	/// Data center region selecting the API base URL.
	#[serde(default)]
	pub region: Region,
	/// Environment tag forwarded to the login flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub environment: Option<String>,
	/// Title displayed above the provider controls.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Description displayed below the title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Redirect target after successful login; defaults to the current location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub success_url: Option<Url>,
	/// Redirect target after failed login; defaults to the current location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub failure_url: Option<Url>,
	/// Opaque state round-tripped to the redirect targets.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Button text prefix.
	#[serde(default = "default_pretext")]
	pub pretext: String,
	/// Whether provider controls render label text.
	#[serde(default = "default_flag")]
	pub include_text: bool,
	/// Whether provider controls render icons.
	#[serde(default = "default_flag")]
	pub include_icon: bool,
}
impl WidgetConfig {
	/// Creates a new builder for the provided workspace.
	pub fn builder(workspace_id: WorkspaceId) -> WidgetConfigBuilder {
		WidgetConfigBuilder::new(workspace_id)
	}
}

fn default_pretext() -> String {
	DEFAULT_PRETEXT.to_owned()
}

const fn default_flag() -> bool {
	true
}
