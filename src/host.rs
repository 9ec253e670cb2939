//! Injected host capabilities replacing ambient browser globals.
//!
//! The widget never touches a hidden `window.location`: the host hands in a
//! [`HostLocation`] reader and a [`HostNavigator`] at build time, so the
//! component runs headless in tests and navigation stays mockable. Webview
//! and WASM hosts adapt their platform objects behind these traits.

// self
use crate::_prelude::*;

/// Read access to the currently loaded document URL.
pub trait HostLocation
where
	Self: 'static + Send + Sync,
{
	/// Returns the current location.
	fn current(&self) -> Url;
}

/// Full-page navigation capability.
///
/// A dispatch hands the login URL to this hook and never returns control;
/// from the widget's perspective the navigation is irreversible.
pub trait HostNavigator
where
	Self: 'static + Send + Sync,
{
	/// Navigates the host page to `url`.
	fn navigate(&self, url: Url);
}

/// [`HostLocation`] backed by a snapshot URL.
///
/// Suits hosts that capture their current URL once per page load, which is
/// also the cadence at which the widget reads it.
#[derive(Clone, Debug)]
pub struct FixedLocation(Url);
impl FixedLocation {
	/// Wraps the snapshot URL.
	pub fn new(url: Url) -> Self {
		Self(url)
	}
}
impl HostLocation for FixedLocation {
	fn current(&self) -> Url {
		self.0.clone()
	}
}
