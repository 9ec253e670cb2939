//! Widget-level error types shared across configuration, discovery, and dispatch.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical widget error exposed by public APIs and the failure hook.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider discovery failure (transport or HTTP status).
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
	/// Login dispatch failure.
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
}

/// Configuration and validation failures raised while assembling a widget.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Workspace or provider identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::config::IdentifierError),
	/// A redirect target could not be parsed as a URL.
	#[error("The {target} redirect target is not a valid URL.")]
	InvalidRedirect {
		/// Which redirect target failed validation.
		target: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The endpoint base URL could not be parsed.
	#[error("Endpoint base is not a valid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The endpoint base cannot carry path segments (e.g. `data:` URLs).
	#[error("Endpoint base `{url}` cannot serve as a hierarchical base.")]
	OpaqueEndpoint {
		/// Offending base URL.
		url: String,
	},
	/// A required host capability was not supplied to the builder.
	#[error("Widget requires a {capability} capability.")]
	MissingCapability {
		/// Human-readable capability label (location, navigator, HTTP client).
		capability: &'static str,
	},
}

/// Provider discovery failures (network transport or HTTP level).
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while fetching the provider list.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Discovery endpoint answered with a non-success status.
	#[error("Failed to fetch providers: HTTP {status}.")]
	Status {
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Discovery endpoint returned malformed JSON.
	#[error("Provider list response contained malformed JSON.")]
	BodyParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl DiscoveryError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for DiscoveryError {
	fn from(e: ReqwestError) -> Self {
		Self::transport(e)
	}
}

/// Login dispatch failures.
///
/// Only [`DispatchError::OpaqueBase`] takes the widget's error path (state
/// transition plus failure hook); the remaining variants describe an inert
/// dispatch attempt and are reported to the caller alone.
#[derive(Debug, ThisError)]
pub enum DispatchError {
	/// Dispatch was attempted before a discovery cycle reached ready.
	#[error("Provider list is not ready; dispatch requires a completed discovery cycle.")]
	NotReady,
	/// Requested provider is not part of the most recent provider list.
	#[error("Provider `{provider}` is not part of the discovered list.")]
	Unknown {
		/// Requested provider identifier.
		provider: String,
	},
	/// Requested provider is present but disabled for the workspace.
	#[error("Provider `{provider}` is disabled for this workspace.")]
	Disabled {
		/// Requested provider identifier.
		provider: String,
	},
	/// Login URL construction failed because the base cannot carry segments.
	#[error("Endpoint base cannot carry login path segments.")]
	OpaqueBase,
}
