//! Callback-token decoding for the post-login redirect.
//!
//! The identity provider reloads the host page with a `jwt` query parameter
//! carrying a compact three-part token. The widget base64url-decodes the
//! middle segment and reads `name`/`emails` out of the JSON payload.
//!
//! **This decoding performs no signature verification.** The extracted
//! claims are informational only and must never feed authorization
//! decisions downstream; that is a documented contract of this module, not
//! a gap. Decode failures are an expected steady-state condition (most page
//! loads carry no token) and stay silent apart from a diagnostic log.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Query parameter name the identity provider uses for the callback token.
pub const CALLBACK_TOKEN_PARAM: &str = "jwt";

/// Identity claims extracted from a decoded callback token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackClaims {
	/// Display name, when the payload carries one.
	#[serde(default)]
	pub name: Option<String>,
	/// Email addresses, when the payload carries them.
	#[serde(default)]
	pub emails: Option<Vec<String>>,
}

/// Reasons a callback token failed to decode.
///
/// Never surfaced through widget hooks; the widget swallows these and logs.
#[derive(Debug, ThisError)]
pub enum TokenDecodeError {
	/// Token has fewer than two dot-separated segments.
	#[error("Token is missing a payload segment.")]
	MissingPayload,
	/// Payload segment is not valid unpadded base64url.
	#[error("Token payload is not valid base64url.")]
	Encoding(#[from] base64::DecodeError),
	/// Payload decoded but is not a valid claims document.
	#[error("Token payload contained malformed claims JSON.")]
	Claims(#[from] serde_path_to_error::Error<serde_json::Error>),
}

/// Decodes the payload segment of a compact token into [`CallbackClaims`].
pub fn decode_callback_token(token: &str) -> Result<CallbackClaims, TokenDecodeError> {
	let payload = token.split('.').nth(1).ok_or(TokenDecodeError::MissingPayload)?;
	let raw = URL_SAFE_NO_PAD.decode(payload)?;
	let mut deserializer = serde_json::Deserializer::from_slice(&raw);
	let claims = serde_path_to_error::deserialize(&mut deserializer)?;

	Ok(claims)
}

/// Extracts the callback token from a location URL, if one is present.
///
/// An empty parameter value is treated as absent.
pub fn token_from_location(location: &Url) -> Option<String> {
	location
		.query_pairs()
		.find(|(key, _)| key == CALLBACK_TOKEN_PARAM)
		.map(|(_, value)| value.into_owned())
		.filter(|value| !value.is_empty())
}
