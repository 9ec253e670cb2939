//! Canonical provider record schema and discovery-response parsing.
//!
//! The wire contract is the `id`/`icon`/`enabled` variant of the provider
//! schema. Responses that omit `enabled` (the presence-implies-enabled
//! flavor) still parse: the flag defaults to `true`. The `type`/`logo_url`
//! variant is not accepted; there is no discriminated dual contract.

// self
use crate::{_prelude::*, config::ProviderId, error::DiscoveryError};

/// One configured identity provider available for a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
	/// Dispatch key, unique within a discovery response.
	pub id: ProviderId,
	/// Human-readable provider name.
	pub name: String,
	/// Inline icon markup or a logo URL, when the workspace supplies one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
	/// Whether dispatch to the provider is currently allowed.
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

const fn default_enabled() -> bool {
	true
}

/// Discovery response envelope returned by the integration endpoint.
///
/// A missing or null `providers` field parses as an empty list, so a
/// workspace with no configured providers still reaches the ready state.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryResponse {
	#[serde(default)]
	providers: Option<Vec<ProviderRecord>>,
}
impl DiscoveryResponse {
	/// Consumes the envelope, defaulting an absent list to empty.
	pub fn into_providers(self) -> Vec<ProviderRecord> {
		self.providers.unwrap_or_default()
	}
}

/// Parses a discovery response body, reporting the failing JSON path.
pub fn parse_discovery_body(body: &[u8]) -> Result<Vec<ProviderRecord>, DiscoveryError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let response: DiscoveryResponse = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|e| DiscoveryError::BodyParse { source: e })?;

	Ok(response.into_providers())
}
