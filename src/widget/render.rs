//! Headless render model projected from the widget state.
//!
//! The widget owns no markup; it hands the host a [`RenderModel`] describing
//! what to draw. Styling, layout, and the actual click wiring stay with the
//! embedding application.

// self
use crate::{_prelude::*, config::{ProviderId, WidgetConfig}, provider::ProviderRecord, widget::LoadState};

/// Notice shown when a workspace has no configured providers.
pub const NO_PROVIDERS_NOTICE: &str = "No authentication providers available.";

/// One provider control ready for the host to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderControl {
	/// Provider identifier to pass back into `AuthWidget::dispatch`.
	pub provider: ProviderId,
	/// Button label (`"<pretext> <name>"`), present only when text is enabled.
	pub label: Option<String>,
	/// Icon markup or logo URL, present only when icons are enabled.
	pub icon: Option<String>,
	/// Whether the control may trigger dispatch; disabled controls are inert.
	pub enabled: bool,
}
impl ProviderControl {
	/// Whether the control carries any visible content at all.
	pub fn has_visible_content(&self) -> bool {
		self.label.is_some() || self.icon.is_some()
	}
}

/// Snapshot of everything the host needs to draw the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderModel {
	/// Discovery is still in flight.
	Loading,
	/// Discovery failed; show the message.
	Failed {
		/// Human-readable failure message.
		message: String,
	},
	/// Discovery completed; show the provider controls.
	Ready {
		/// Optional title above the controls.
		title: Option<String>,
		/// Optional description below the title.
		description: Option<String>,
		/// One control per discovered provider, in response order.
		controls: Vec<ProviderControl>,
		/// Whether the workspace has no providers at all.
		no_providers: bool,
	},
}
impl RenderModel {
	pub(crate) fn project(config: &WidgetConfig, state: &LoadState) -> Self {
		match state {
			LoadState::Loading => Self::Loading,
			LoadState::Failed { message } => Self::Failed { message: message.clone() },
			LoadState::Ready(providers) => {
				let controls = providers
					.iter()
					.map(|record| project_control(config, record))
					.collect::<Vec<_>>();

				Self::Ready {
					title: config.title.clone(),
					description: config.description.clone(),
					no_providers: controls.is_empty(),
					controls,
				}
			},
		}
	}

	/// Returns the empty-workspace notice when it applies.
	pub fn no_providers_notice(&self) -> Option<&'static str> {
		match self {
			Self::Ready { no_providers: true, .. } => Some(NO_PROVIDERS_NOTICE),
			_ => None,
		}
	}
}

fn project_control(config: &WidgetConfig, record: &ProviderRecord) -> ProviderControl {
	let label = config.include_text.then(|| format!("{} {}", config.pretext, record.name));
	let icon = if config.include_icon { record.icon.clone() } else { None };

	ProviderControl { provider: record.id.clone(), label, icon, enabled: record.enabled }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::WorkspaceId;

	fn record(id: &str, name: &str) -> ProviderRecord {
		ProviderRecord {
			id: ProviderId::new(id).expect("Provider fixture should be valid."),
			name: name.into(),
			icon: Some("<svg/>".into()),
			enabled: true,
		}
	}

	fn config() -> WidgetConfig {
		WidgetConfig::builder(
			WorkspaceId::new("workspace-123").expect("Workspace fixture should be valid."),
		)
		.title("Pick a provider")
		.build()
		.expect("Config fixture should build successfully.")
	}

	#[test]
	fn ready_projection_labels_providers() {
		let state = LoadState::Ready(vec![record("google", "Google")]);
		let model = RenderModel::project(&config(), &state);
		let RenderModel::Ready { title, controls, no_providers, .. } = model else {
			panic!("Ready state should project to a ready model.");
		};

		assert_eq!(title.as_deref(), Some("Pick a provider"));
		assert!(!no_providers);
		assert_eq!(controls[0].label.as_deref(), Some("Sign in with Google"));
		assert_eq!(controls[0].icon.as_deref(), Some("<svg/>"));
	}

	#[test]
	fn suppressing_text_and_icon_leaves_no_visible_content() {
		let config = WidgetConfig::builder(
			WorkspaceId::new("workspace-123").expect("Workspace fixture should be valid."),
		)
		.include_text(false)
		.include_icon(false)
		.build()
		.expect("Config fixture should build successfully.");
		let state = LoadState::Ready(vec![record("google", "Google")]);
		let RenderModel::Ready { controls, .. } = RenderModel::project(&config, &state) else {
			panic!("Ready state should project to a ready model.");
		};

		assert!(!controls[0].has_visible_content());
	}

	#[test]
	fn empty_ready_list_surfaces_the_notice() {
		let model = RenderModel::project(&config(), &LoadState::Ready(Vec::new()));

		assert_eq!(model.no_providers_notice(), Some(NO_PROVIDERS_NOTICE));
		assert_eq!(RenderModel::project(&config(), &LoadState::Loading).no_providers_notice(), None);
	}
}
