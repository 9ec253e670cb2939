//! Embeddable provider-picker core for hosted sign-in flows: region-aware provider discovery,
//! login dispatch, and callback-claims parsing behind injectable host capabilities.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod host;
pub mod http;
pub mod obs;
pub mod provider;
pub mod region;
pub mod token;
pub mod widget;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience mocks and fixtures for widget tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		config::{WidgetConfig, WorkspaceId},
		error::DiscoveryError,
		host::{FixedLocation, HostNavigator},
		http::{DiscoveryHttpClient, FetchFuture, FetchResponse},
		widget::AuthWidget,
	};

	/// Scripted transport returning queued responses and recording request URLs.
	///
	/// An exhausted queue reports a transport failure, so a test that fetches
	/// more than it scripted fails loudly instead of hanging.
	#[derive(Default)]
	pub struct ScriptedHttpClient {
		queue: Mutex<VecDeque<Result<FetchResponse, DiscoveryError>>>,
		requests: Mutex<Vec<Url>>,
	}
	impl ScriptedHttpClient {
		/// Queues a 200 response with the given JSON body.
		pub fn push_json(&self, body: &str) {
			self.queue
				.lock()
				.push_back(Ok(FetchResponse { status: 200, body: body.as_bytes().to_vec() }));
		}

		/// Queues an empty-bodied response with the given status.
		pub fn push_status(&self, status: u16) {
			self.queue.lock().push_back(Ok(FetchResponse { status, body: Vec::new() }));
		}

		/// Queues a transport-level failure carrying `message`.
		pub fn push_transport_error(&self, message: &str) {
			self.queue
				.lock()
				.push_back(Err(DiscoveryError::transport(std::io::Error::other(
					message.to_owned(),
				))));
		}

		/// Returns the URLs requested so far, in order.
		pub fn requests(&self) -> Vec<Url> {
			self.requests.lock().clone()
		}
	}
	impl DiscoveryHttpClient for ScriptedHttpClient {
		fn get(&self, url: Url) -> FetchFuture<'_> {
			self.requests.lock().push(url);

			let next = self.queue.lock().pop_front();

			Box::pin(async move {
				match next {
					Some(outcome) => outcome,
					None => Err(DiscoveryError::transport(std::io::Error::other(
						"No scripted response remains.",
					))),
				}
			})
		}
	}

	/// Transport wrapper that holds every request until `gate` is unlocked.
	///
	/// Lets tests freeze an in-flight discovery cycle while they supersede it.
	pub struct GatedHttpClient {
		gate: Arc<AsyncMutex<()>>,
		inner: Arc<ScriptedHttpClient>,
	}
	impl GatedHttpClient {
		/// Wraps a scripted client behind the given gate.
		pub fn new(gate: Arc<AsyncMutex<()>>, inner: Arc<ScriptedHttpClient>) -> Self {
			Self { gate, inner }
		}
	}
	impl DiscoveryHttpClient for GatedHttpClient {
		fn get(&self, url: Url) -> FetchFuture<'_> {
			let gate = self.gate.clone();
			let inner = self.inner.clone();

			Box::pin(async move {
				let _open = gate.lock().await;

				inner.get(url).await
			})
		}
	}

	/// Navigator that records every navigation instead of performing one.
	#[derive(Default)]
	pub struct RecordingNavigator {
		visited: Mutex<Vec<Url>>,
	}
	impl RecordingNavigator {
		/// Returns the navigation targets recorded so far, in order.
		pub fn visited(&self) -> Vec<Url> {
			self.visited.lock().clone()
		}
	}
	impl HostNavigator for RecordingNavigator {
		fn navigate(&self, url: Url) {
			self.visited.lock().push(url);
		}
	}

	/// Baseline configuration used across widget tests.
	pub fn test_config() -> WidgetConfig {
		WidgetConfig::builder(
			WorkspaceId::new("workspace-123").expect("Workspace fixture should be valid."),
		)
		.build()
		.expect("Baseline test configuration should build successfully.")
	}

	/// Location capability reading a fixed URL.
	pub fn test_location(url: &str) -> FixedLocation {
		FixedLocation::new(Url::parse(url).expect("Location fixture should parse successfully."))
	}

	/// Builds a widget wired to a scripted transport and a recording navigator.
	pub fn scripted_widget(
		config: WidgetConfig,
		location: &str,
	) -> (AuthWidget, Arc<ScriptedHttpClient>, Arc<RecordingNavigator>) {
		let client = Arc::new(ScriptedHttpClient::default());
		let navigator = Arc::new(RecordingNavigator::default());
		let widget = AuthWidget::builder(config)
			.http_client::<ScriptedHttpClient>(client.clone())
			.location(test_location(location))
			.navigator::<RecordingNavigator>(navigator.clone())
			.build()
			.expect("Test widget should build successfully.");

		(widget, client, navigator)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
