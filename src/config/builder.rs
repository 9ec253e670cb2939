//! Builder that assembles and validates [`WidgetConfig`] values.

// self
use crate::{
	_prelude::*,
	config::{DEFAULT_PRETEXT, WidgetConfig, WorkspaceId},
	error::ConfigError,
	region::Region,
};

/// Builder for [`WidgetConfig`] values.
///
/// Redirect targets are accepted as strings and validated during
/// [`build`](WidgetConfigBuilder::build), mirroring how embedding hosts
/// usually carry them.
#[derive(Debug)]
pub struct WidgetConfigBuilder {
	/// Workspace whose providers are listed.
	pub workspace_id: WorkspaceId,
	/// Data center region selector.
	pub region: Region,
	/// Optional environment tag.
	pub environment: Option<String>,
	/// Optional title text.
	pub title: Option<String>,
	/// Optional description text.
	pub description: Option<String>,
	/// Optional raw success redirect target.
	pub success_url: Option<String>,
	/// Optional raw failure redirect target.
	pub failure_url: Option<String>,
	/// Optional opaque state passthrough.
	pub state: Option<String>,
	/// Button text prefix.
	pub pretext: String,
	/// Whether provider controls render label text.
	pub include_text: bool,
	/// Whether provider controls render icons.
	pub include_icon: bool,
}
impl WidgetConfigBuilder {
	/// Creates a new builder seeded with the provided workspace.
	pub fn new(workspace_id: WorkspaceId) -> Self {
		Self {
			workspace_id,
			region: Region::default(),
			environment: None,
			title: None,
			description: None,
			success_url: None,
			failure_url: None,
			state: None,
			pretext: DEFAULT_PRETEXT.to_owned(),
			include_text: true,
			include_icon: true,
		}
	}

	/// Selects the data center region.
	pub fn region(mut self, region: Region) -> Self {
		self.region = region;

		self
	}

	/// Sets the environment tag.
	pub fn environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());

		self
	}

	/// Sets the title text.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Sets the description text.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the success redirect target.
	pub fn success_url(mut self, url: impl Into<String>) -> Self {
		self.success_url = Some(url.into());

		self
	}

	/// Sets the failure redirect target.
	pub fn failure_url(mut self, url: impl Into<String>) -> Self {
		self.failure_url = Some(url.into());

		self
	}

	/// Sets the opaque state passthrough.
	pub fn state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the button text prefix.
	pub fn pretext(mut self, pretext: impl Into<String>) -> Self {
		self.pretext = pretext.into();

		self
	}

	/// Toggles label text on provider controls.
	pub fn include_text(mut self, include: bool) -> Self {
		self.include_text = include;

		self
	}

	/// Toggles icons on provider controls.
	pub fn include_icon(mut self, include: bool) -> Self {
		self.include_icon = include;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<WidgetConfig, ConfigError> {
		let success_url = parse_redirect("success", self.success_url)?;
		let failure_url = parse_redirect("failure", self.failure_url)?;

		Ok(WidgetConfig {
			workspace_id: self.workspace_id,
			region: self.region,
			environment: self.environment,
			title: self.title,
			description: self.description,
			success_url,
			failure_url,
			state: self.state,
			pretext: self.pretext,
			include_text: self.include_text,
			include_icon: self.include_icon,
		})
	}
}

fn parse_redirect(target: &'static str, raw: Option<String>) -> Result<Option<Url>, ConfigError> {
	raw.map(|value| {
		Url::parse(&value).map_err(|e| ConfigError::InvalidRedirect { target, source: e })
	})
	.transpose()
}
