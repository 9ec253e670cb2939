//! Region selection and endpoint URL construction.
//!
//! The region selector maps to exactly one of three fixed base URLs. Hosts
//! that front the API themselves (and the integration tests) can swap the
//! table out with [`Endpoints::custom`]; everything downstream only ever
//! sees an [`Endpoints`] value.

// self
use crate::{
	_prelude::*,
	config::{ProviderId, WorkspaceId},
	error::{ConfigError, DispatchError},
};

const DISCOVERY_SEGMENTS: [&str; 3] = ["unified", "integration", "workspace"];
const LOGIN_SEGMENTS: [&str; 2] = ["auth", "login"];

/// Data center selector choosing the regional API base URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
	#[default]
	/// United States (the default).
	Us,
	/// European Union.
	Eu,
	/// Australia.
	Au,
}
impl Region {
	/// Returns the fixed base URL string for the region.
	pub const fn base_str(self) -> &'static str {
		match self {
			Region::Us => "https://unified.to",
			Region::Eu => "https://eu.unified.to",
			Region::Au => "https://au.unified.to",
		}
	}

	/// Returns a stable lowercase label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Region::Us => "us",
			Region::Eu => "eu",
			Region::Au => "au",
		}
	}
}
impl Display for Region {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Query parameters carried by a login dispatch URL.
///
/// The success and failure targets are always present (the widget defaults
/// them to the host's current location); `state` and `environment` are
/// omitted from the query string entirely when unset, never sent empty.
#[derive(Clone, Debug)]
pub struct LoginParams {
	/// Redirect target after a successful provider login.
	pub success_url: Url,
	/// Redirect target after a failed provider login.
	pub failure_url: Url,
	/// Opaque state round-tripped to the redirect targets.
	pub state: Option<String>,
	/// Environment tag forwarded to the login flow.
	pub environment: Option<String>,
}

/// Validated API base plus the URL builders derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	base: Url,
}
impl Endpoints {
	/// Resolves the fixed base URL for a region.
	pub fn for_region(region: Region) -> Result<Self, ConfigError> {
		let base =
			Url::parse(region.base_str()).map_err(|e| ConfigError::InvalidEndpoint { source: e })?;

		Self::custom(base)
	}

	/// Wraps a caller-supplied base URL (self-hosted deployments, tests).
	pub fn custom(base: Url) -> Result<Self, ConfigError> {
		if base.cannot_be_a_base() {
			return Err(ConfigError::OpaqueEndpoint { url: base.to_string() });
		}

		Ok(Self { base })
	}

	/// Returns the validated base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Builds the provider discovery URL for a workspace.
	///
	/// Shape: `<base>/unified/integration/workspace/<workspace_id>` with the
	/// fixed `categories=auth&summary=true&active=true` filter.
	pub fn discovery_url(&self, workspace: &WorkspaceId) -> Result<Url, ConfigError> {
		let mut url = self.base.clone();

		url.path_segments_mut()
			.map_err(|()| ConfigError::OpaqueEndpoint { url: self.base.to_string() })?
			.pop_if_empty()
			.extend(DISCOVERY_SEGMENTS)
			.push(workspace.as_ref());
		url.query_pairs_mut()
			.append_pair("categories", "auth")
			.append_pair("summary", "true")
			.append_pair("active", "true");

		Ok(url)
	}

	/// Builds the full-page login dispatch URL for a provider.
	///
	/// Shape: `<base>/auth/login/<workspace_id>/<provider_id>?success_url=…&failure_url=…[&state=…][&environment=…]`.
	pub fn login_url(
		&self,
		workspace: &WorkspaceId,
		provider: &ProviderId,
		params: &LoginParams,
	) -> Result<Url, DispatchError> {
		let mut url = self.base.clone();

		url.path_segments_mut()
			.map_err(|()| DispatchError::OpaqueBase)?
			.pop_if_empty()
			.extend(LOGIN_SEGMENTS)
			.push(workspace.as_ref())
			.push(provider.as_ref());

		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("success_url", params.success_url.as_str());
		pairs.append_pair("failure_url", params.failure_url.as_str());

		if let Some(state) = params.state.as_deref() {
			pairs.append_pair("state", state);
		}
		if let Some(environment) = params.environment.as_deref() {
			pairs.append_pair("environment", environment);
		}

		drop(pairs);

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn workspace() -> WorkspaceId {
		WorkspaceId::new("workspace-123").expect("Workspace fixture should be valid.")
	}

	#[test]
	fn region_table_is_fixed() {
		assert_eq!(Region::default(), Region::Us);
		assert_eq!(Region::Us.base_str(), "https://unified.to");
		assert_eq!(Region::Eu.base_str(), "https://eu.unified.to");
		assert_eq!(Region::Au.base_str(), "https://au.unified.to");
	}

	#[test]
	fn eu_discovery_url_interpolates_the_workspace() {
		let endpoints =
			Endpoints::for_region(Region::Eu).expect("Region base should resolve successfully.");
		let url = endpoints
			.discovery_url(&workspace())
			.expect("Discovery URL should build successfully.");

		assert_eq!(
			url.as_str(),
			"https://eu.unified.to/unified/integration/workspace/workspace-123?categories=auth&summary=true&active=true"
		);
	}

	#[test]
	fn custom_base_keeps_its_path_prefix() {
		let base = Url::parse("https://sso.example.com/api/")
			.expect("Custom base fixture should parse successfully.");
		let endpoints = Endpoints::custom(base).expect("Custom base should be accepted.");
		let url = endpoints
			.discovery_url(&workspace())
			.expect("Discovery URL should build successfully.");

		assert!(url.path().starts_with("/api/unified/integration/workspace/"));
	}

	#[test]
	fn opaque_base_is_rejected_at_construction() {
		let base = Url::parse("data:text/plain,hi").expect("Opaque URL fixture should parse.");

		assert!(matches!(Endpoints::custom(base), Err(ConfigError::OpaqueEndpoint { .. })));
	}

	#[test]
	fn login_url_omits_unset_optional_params() {
		let endpoints =
			Endpoints::for_region(Region::Us).expect("Region base should resolve successfully.");
		let provider = ProviderId::new("google").expect("Provider fixture should be valid.");
		let current = Url::parse("https://app.example.com/signin")
			.expect("Current location fixture should parse successfully.");
		let params = LoginParams {
			success_url: current.clone(),
			failure_url: current,
			state: None,
			environment: None,
		};
		let url = endpoints
			.login_url(&workspace(), &provider, &params)
			.expect("Login URL should build successfully.");

		assert_eq!(url.path(), "/auth/login/workspace-123/google");

		let keys: Vec<_> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();

		assert_eq!(keys, ["success_url", "failure_url"]);
	}

	#[test]
	fn login_url_appends_state_and_environment_when_set() {
		let endpoints =
			Endpoints::for_region(Region::Au).expect("Region base should resolve successfully.");
		let provider = ProviderId::new("github").expect("Provider fixture should be valid.");
		let current = Url::parse("https://app.example.com/")
			.expect("Current location fixture should parse successfully.");
		let params = LoginParams {
			success_url: current.clone(),
			failure_url: current,
			state: Some("opaque-42".into()),
			environment: Some("sandbox".into()),
		};
		let url = endpoints
			.login_url(&workspace(), &provider, &params)
			.expect("Login URL should build successfully.");
		let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("state"), Some(&"opaque-42".into()));
		assert_eq!(pairs.get("environment"), Some(&"sandbox".into()));
	}
}
