//! The embeddable provider-picker widget core.
//!
//! [`AuthWidget`] owns the load-state machine: per-mount callback parsing,
//! generation-guarded discovery cycles, and login dispatch through the
//! injected navigator. Every mounted instance owns its state exclusively;
//! nothing is shared between instances and nothing is persisted.

pub mod render;

mod metrics;

pub use metrics::*;
pub use render::*;

// std
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	config::{WidgetConfig, WorkspaceId},
	error::{ConfigError, DiscoveryError, DispatchError},
	host::{HostLocation, HostNavigator},
	http::DiscoveryHttpClient,
	obs::{StageKind, StageOutcome, StageSpan, record_stage_outcome},
	provider::{ProviderRecord, parse_discovery_body},
	region::{Endpoints, LoginParams, Region},
	token::{CallbackClaims, decode_callback_token, token_from_location},
};

/// Fallback message recorded when a discovery failure carries no text of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to load authentication providers.";

/// Success hook invoked with decoded callback claims.
pub type OnSuccess = Arc<dyn Fn(CallbackClaims) + Send + Sync>;
/// Failure hook invoked with the widget error that caused a failure.
pub type OnFailure = Arc<dyn Fn(&Error) + Send + Sync>;

/// Optional success/failure collaborators, each invoked at most once per
/// triggering event and never assumed to be present.
#[derive(Clone, Default)]
pub struct Hooks {
	on_success: Option<OnSuccess>,
	on_failure: Option<OnFailure>,
}
impl Hooks {
	fn success(&self, claims: CallbackClaims) {
		if let Some(hook) = self.on_success.as_ref() {
			hook(claims);
		}
	}

	fn failure(&self, error: &Error) {
		if let Some(hook) = self.on_failure.as_ref() {
			hook(error);
		}
	}
}
impl Debug for Hooks {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Hooks")
			.field("on_success", &self.on_success.is_some())
			.field("on_failure", &self.on_failure.is_some())
			.finish()
	}
}

/// Load state owned by one widget instance.
///
/// `Loading → Ready` on a successful fetch (possibly with an empty list),
/// `Loading → Failed` on a rejected fetch or non-success status. The only
/// way out of `Ready`/`Failed` is a new discovery cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	#[default]
	/// Discovery has not completed yet.
	Loading,
	/// Discovery completed with the given provider list.
	Ready(Vec<ProviderRecord>),
	/// Discovery failed with a human-readable message.
	Failed {
		/// Recorded failure message.
		message: String,
	},
}
impl LoadState {
	/// Whether discovery is still in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	/// Returns the provider list when the state is ready.
	pub fn providers(&self) -> Option<&[ProviderRecord]> {
		match self {
			Self::Ready(providers) => Some(providers),
			_ => None,
		}
	}
}

#[derive(Clone, Debug)]
struct Target {
	workspace: WorkspaceId,
	region: Region,
	endpoints: Endpoints,
}

/// Builder for [`AuthWidget`] instances.
///
/// The location and navigator capabilities are mandatory: there is no
/// ambient browser to fall back on, and requiring them is what keeps the
/// widget testable without one. The HTTP client defaults to the reqwest
/// transport when the `reqwest` feature is enabled.
pub struct AuthWidgetBuilder {
	config: WidgetConfig,
	http_client: Option<Arc<dyn DiscoveryHttpClient>>,
	location: Option<Arc<dyn HostLocation>>,
	navigator: Option<Arc<dyn HostNavigator>>,
	endpoints: Option<Endpoints>,
	hooks: Hooks,
}
impl AuthWidgetBuilder {
	/// Creates a new builder seeded with the provided configuration.
	pub fn new(config: WidgetConfig) -> Self {
		Self {
			config,
			http_client: None,
			location: None,
			navigator: None,
			endpoints: None,
			hooks: Hooks::default(),
		}
	}

	/// Supplies the discovery HTTP client.
	pub fn http_client<C>(mut self, client: impl Into<Arc<C>>) -> Self
	where
		C: DiscoveryHttpClient,
	{
		let client: Arc<C> = client.into();

		self.http_client = Some(client);

		self
	}

	/// Supplies the current-location reader.
	pub fn location<L>(mut self, location: impl Into<Arc<L>>) -> Self
	where
		L: HostLocation,
	{
		let location: Arc<L> = location.into();

		self.location = Some(location);

		self
	}

	/// Supplies the navigation capability.
	pub fn navigator<N>(mut self, navigator: impl Into<Arc<N>>) -> Self
	where
		N: HostNavigator,
	{
		let navigator: Arc<N> = navigator.into();

		self.navigator = Some(navigator);

		self
	}

	/// Overrides the region-derived endpoints (self-hosted deployments, tests).
	///
	/// When set, later `retarget` calls keep this base regardless of region.
	pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = Some(endpoints);

		self
	}

	/// Attaches the success hook.
	pub fn on_success(mut self, hook: impl Fn(CallbackClaims) + Send + Sync + 'static) -> Self {
		self.hooks.on_success = Some(Arc::new(hook));

		self
	}

	/// Attaches the failure hook.
	pub fn on_failure(mut self, hook: impl Fn(&Error) + Send + Sync + 'static) -> Self {
		self.hooks.on_failure = Some(Arc::new(hook));

		self
	}

	/// Consumes the builder and assembles the widget.
	pub fn build(self) -> Result<AuthWidget, ConfigError> {
		let endpoints = match self.endpoints.as_ref() {
			Some(endpoints) => endpoints.clone(),
			None => Endpoints::for_region(self.config.region)?,
		};
		let http_client = match self.http_client {
			Some(client) => client,
			#[cfg(feature = "reqwest")]
			None => Arc::new(crate::http::ReqwestHttpClient::default()),
			#[cfg(not(feature = "reqwest"))]
			None => return Err(ConfigError::MissingCapability { capability: "HTTP client" }),
		};
		let location =
			self.location.ok_or(ConfigError::MissingCapability { capability: "location" })?;
		let navigator =
			self.navigator.ok_or(ConfigError::MissingCapability { capability: "navigator" })?;
		let target = Target {
			workspace: self.config.workspace_id.clone(),
			region: self.config.region,
			endpoints,
		};

		Ok(AuthWidget {
			config: self.config,
			http_client,
			location,
			navigator,
			endpoint_override: self.endpoints,
			hooks: self.hooks,
			target: Mutex::new(target),
			state: Mutex::new(LoadState::default()),
			generation: AtomicU64::new(0),
			closed: AtomicBool::new(false),
			callback_parsed: AtomicBool::new(false),
			cycle_guard: AsyncMutex::new(()),
			metrics: DiscoveryMetrics::default(),
		})
	}
}
impl Debug for AuthWidgetBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthWidgetBuilder")
			.field("config", &self.config)
			.field("endpoints", &self.endpoints)
			.field("hooks", &self.hooks)
			.finish_non_exhaustive()
	}
}

/// One mounted provider-picker instance.
pub struct AuthWidget {
	config: WidgetConfig,
	http_client: Arc<dyn DiscoveryHttpClient>,
	location: Arc<dyn HostLocation>,
	navigator: Arc<dyn HostNavigator>,
	endpoint_override: Option<Endpoints>,
	hooks: Hooks,
	target: Mutex<Target>,
	state: Mutex<LoadState>,
	generation: AtomicU64,
	closed: AtomicBool,
	callback_parsed: AtomicBool,
	cycle_guard: AsyncMutex<()>,
	metrics: DiscoveryMetrics,
}
impl AuthWidget {
	/// Creates a new builder for the provided configuration.
	pub fn builder(config: WidgetConfig) -> AuthWidgetBuilder {
		AuthWidgetBuilder::new(config)
	}

	/// Returns the immutable configuration record.
	pub fn config(&self) -> &WidgetConfig {
		&self.config
	}

	/// Returns a snapshot of the current load state.
	pub fn state(&self) -> LoadState {
		self.state.lock().clone()
	}

	/// Returns the current discovery target as a `(workspace, region)` pair.
	pub fn target(&self) -> (WorkspaceId, Region) {
		let target = self.target.lock();

		(target.workspace.clone(), target.region)
	}

	/// Returns the per-instance discovery counters.
	pub fn discovery_metrics(&self) -> &DiscoveryMetrics {
		&self.metrics
	}

	/// Projects the current state into a headless render model.
	pub fn render(&self) -> RenderModel {
		RenderModel::project(&self.config, &self.state.lock())
	}

	/// Runs the two mount-time effects: callback parsing, then discovery.
	///
	/// The two effects are independent by contract; the ordering here is an
	/// implementation detail, not something hosts may rely on.
	pub async fn mount(&self) {
		self.parse_callback();
		self.refresh().await;
	}

	/// Inspects the host location for a callback token, exactly once per mount.
	///
	/// Returns the decoded claims when a token was present and decoded, in
	/// which case the success hook has been invoked with a copy. Decode
	/// failures are swallowed (diagnostic log only); neither hook fires.
	pub fn parse_callback(&self) -> Option<CallbackClaims> {
		if self.callback_parsed.swap(true, Ordering::SeqCst) {
			return None;
		}

		let _guard = StageSpan::new(StageKind::Callback, "parse_callback").entered();
		let location = self.location.current();
		let token = token_from_location(&location)?;

		record_stage_outcome(StageKind::Callback, StageOutcome::Attempt);

		match decode_callback_token(&token) {
			Ok(claims) => {
				record_stage_outcome(StageKind::Callback, StageOutcome::Success);
				self.hooks.success(claims.clone());

				Some(claims)
			},
			Err(e) => {
				record_stage_outcome(StageKind::Callback, StageOutcome::Failure);
				#[cfg(feature = "tracing")]
				tracing::warn!(error = %e, "Failed to decode callback token.");
				#[cfg(not(feature = "tracing"))]
				let _ = e;

				None
			},
		}
	}

	/// Runs one discovery cycle for the current target.
	///
	/// Cycles are serialized per instance; a cycle superseded by a newer one
	/// (or by [`close`](AuthWidget::close)) leaves the state and hooks
	/// untouched when it eventually completes.
	pub async fn refresh(&self) {
		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

		self.enter_loading(generation);

		let span = StageSpan::new(StageKind::Discovery, "refresh");
		let _serial = self.cycle_guard.lock().await;
		let outcome = span.instrument(self.fetch_providers()).await;

		self.apply(generation, outcome);
	}

	/// Replaces the discovery-triggering inputs and restarts discovery.
	///
	/// A retarget to the values already in effect is a no-op; the contract
	/// allows exactly one outbound request per triggering change.
	pub async fn retarget(&self, workspace: WorkspaceId, region: Region) -> Result<()> {
		{
			let mut target = self.target.lock();

			if target.workspace == workspace && target.region == region {
				return Ok(());
			}

			let endpoints = match self.endpoint_override.as_ref() {
				Some(endpoints) => endpoints.clone(),
				None => Endpoints::for_region(region).map_err(Error::from)?,
			};

			*target = Target { workspace, region, endpoints };
		}

		self.refresh().await;

		Ok(())
	}

	/// Dispatches the browser to the provider's login flow.
	///
	/// The provider must come from the most recent ready list. Unknown,
	/// disabled, or not-yet-ready dispatch attempts are inert: the error is
	/// returned but no state transition happens and no hook fires. A URL
	/// construction failure takes the error path (state plus failure hook).
	pub fn dispatch(&self, provider: &str) -> Result<()> {
		let _guard = StageSpan::new(StageKind::Dispatch, "dispatch").entered();
		let record = {
			let state = self.state.lock();
			let LoadState::Ready(providers) = &*state else {
				return Err(DispatchError::NotReady.into());
			};
			let Some(record) = providers.iter().find(|record| record.id.as_ref() == provider)
			else {
				return Err(DispatchError::Unknown { provider: provider.to_owned() }.into());
			};

			if !record.enabled {
				return Err(DispatchError::Disabled { provider: provider.to_owned() }.into());
			}

			record.clone()
		};

		record_stage_outcome(StageKind::Dispatch, StageOutcome::Attempt);

		let current = self.location.current();
		let params = LoginParams {
			success_url: self.config.success_url.clone().unwrap_or_else(|| current.clone()),
			failure_url: self.config.failure_url.clone().unwrap_or(current),
			state: self.config.state.clone(),
			environment: self.config.environment.clone(),
		};
		let (workspace, endpoints) = {
			let target = self.target.lock();

			(target.workspace.clone(), target.endpoints.clone())
		};

		match endpoints.login_url(&workspace, &record.id, &params) {
			Ok(url) => {
				record_stage_outcome(StageKind::Dispatch, StageOutcome::Success);
				self.navigator.navigate(url);

				Ok(())
			},
			Err(e) => {
				let error = Error::from(e);

				record_stage_outcome(StageKind::Dispatch, StageOutcome::Failure);

				*self.state.lock() = LoadState::Failed { message: failure_message(&error) };

				self.hooks.failure(&error);

				Err(error)
			},
		}
	}

	/// Marks the instance closed; late discovery completions are suppressed.
	pub fn close(&self) {
		self.closed.store(true, Ordering::SeqCst);
	}

	/// Whether [`close`](AuthWidget::close) has been called.
	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	fn enter_loading(&self, generation: u64) {
		if self.is_stale(generation) {
			return;
		}

		*self.state.lock() = LoadState::Loading;
	}

	async fn fetch_providers(&self) -> Result<Vec<ProviderRecord>> {
		self.metrics.record_attempt();
		record_stage_outcome(StageKind::Discovery, StageOutcome::Attempt);

		let (workspace, endpoints) = {
			let target = self.target.lock();

			(target.workspace.clone(), target.endpoints.clone())
		};
		let url = endpoints.discovery_url(&workspace).map_err(Error::from)?;
		let response = self.http_client.get(url).await.map_err(Error::from)?;

		if !response.is_success() {
			return Err(DiscoveryError::Status { status: response.status }.into());
		}

		Ok(parse_discovery_body(&response.body)?)
	}

	fn apply(&self, generation: u64, outcome: Result<Vec<ProviderRecord>>) {
		if self.is_stale(generation) {
			#[cfg(feature = "tracing")]
			tracing::debug!(generation, "Dropping superseded discovery completion.");

			return;
		}

		match outcome {
			Ok(providers) => {
				self.metrics.record_success();
				record_stage_outcome(StageKind::Discovery, StageOutcome::Success);

				*self.state.lock() = LoadState::Ready(providers);
			},
			Err(error) => {
				self.metrics.record_failure();
				record_stage_outcome(StageKind::Discovery, StageOutcome::Failure);

				*self.state.lock() = LoadState::Failed { message: failure_message(&error) };

				self.hooks.failure(&error);
			},
		}
	}

	fn is_stale(&self, generation: u64) -> bool {
		self.closed.load(Ordering::SeqCst)
			|| self.generation.load(Ordering::SeqCst) != generation
	}
}
impl Debug for AuthWidget {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthWidget")
			.field("config", &self.config)
			.field("state", &*self.state.lock())
			.field("closed", &self.is_closed())
			.finish_non_exhaustive()
	}
}
impl Drop for AuthWidget {
	fn drop(&mut self) {
		self.close();
	}
}

fn failure_message(error: &Error) -> String {
	let mut message = error.to_string();
	let mut source = StdError::source(error);

	while let Some(cause) = source {
		message.push(' ');
		message.push_str(&cause.to_string());

		source = cause.source();
	}

	if message.trim().is_empty() { DEFAULT_FAILURE_MESSAGE.to_owned() } else { message }
}
