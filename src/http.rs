//! Transport primitives for provider discovery.
//!
//! [`DiscoveryHttpClient`] is the widget's only dependency on an HTTP stack.
//! The trait is object-safe so the widget can hold `Arc<dyn DiscoveryHttpClient>`
//! and tests can script responses without a network. The crate ships a
//! reqwest-backed implementation behind the `reqwest` feature; hosts with
//! their own fetch capability (webviews, WASM shims) implement the trait
//! over it. The widget enforces no timeout or retry of its own - whatever
//! the transport does is what happens.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, error::DiscoveryError};

/// Status and body captured from one discovery response.
#[derive(Clone, Debug)]
pub struct FetchResponse {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl FetchResponse {
	/// Whether the status code is in the success range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Boxed future returned by [`DiscoveryHttpClient::get`].
pub type FetchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<FetchResponse, DiscoveryError>> + Send + 'a>>;

/// Abstraction over HTTP transports capable of fetching the provider list.
///
/// Implementations report transport-level failures through
/// [`DiscoveryError::Transport`] and leave HTTP status classification to the
/// widget, which receives the status alongside the body.
pub trait DiscoveryHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes a single GET request against the discovery endpoint.
	fn get(&self, url: Url) -> FetchFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Discovery follows the client's default redirect policy; callers
/// supplying a custom [`ReqwestClient`] keep full control over TLS, proxies,
/// and timeouts.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl DiscoveryHttpClient for ReqwestHttpClient {
	fn get(&self, url: Url) -> FetchFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.get(url).send().await.map_err(DiscoveryError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(DiscoveryError::from)?.to_vec();

			Ok(FetchResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_range_is_2xx() {
		assert!(FetchResponse { status: 200, body: Vec::new() }.is_success());
		assert!(FetchResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!FetchResponse { status: 301, body: Vec::new() }.is_success());
		assert!(!FetchResponse { status: 404, body: Vec::new() }.is_success());
		assert!(!FetchResponse { status: 500, body: Vec::new() }.is_success());
	}
}
