//! Request helpers shared by the Google clients

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use solar_types::{ProviderError, ProviderResult};
use tracing::debug;
use url::Url;

/// Join `path` onto `base_url` and append query parameters.
///
/// `path` is resolved relative to the base directory, so custom-method
/// paths such as `buildingInsights:findClosest` are not read as a scheme.
pub fn build_url(base_url: &str, path: &str, params: &[(&str, String)]) -> ProviderResult<Url> {
	let mut url = Url::parse(base_url).map_err(|e| ProviderError::ConfigError {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	if !path.is_empty() {
		if !url.path().ends_with('/') {
			url.set_path(&format!("{}/", url.path()));
		}
		url = url
			.join(&format!("./{}", path.trim_start_matches('/')))
			.map_err(|e| ProviderError::ConfigError {
				reason: format!("Failed to join '{}' to '{}': {}", path, base_url, e),
			})?;
	}

	if !params.is_empty() {
		let mut pairs = url.query_pairs_mut();
		for (key, value) in params {
			pairs.append_pair(key, value);
		}
	}
	Ok(url)
}

/// Error envelope returned by Google Cloud APIs
#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
	error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
	#[serde(default)]
	message: String,
	#[serde(default)]
	status: String,
}

/// GET `url` and decode a JSON body, mapping transport and status failures
pub async fn get_json<T: DeserializeOwned>(
	client: &Client,
	url: Url,
	timeout_ms: u64,
) -> ProviderResult<T> {
	debug!("GET {}{}", url.origin().ascii_serialization(), url.path());
	let response = client
		.get(url)
		.send()
		.await
		.map_err(|e| map_transport_error(e, timeout_ms))?;
	decode(response, timeout_ms).await
}

async fn decode<T: DeserializeOwned>(response: Response, timeout_ms: u64) -> ProviderResult<T> {
	let status = response.status();
	let body = response
		.text()
		.await
		.map_err(|e| map_transport_error(e, timeout_ms))?;

	if !status.is_success() {
		if let Ok(envelope) = serde_json::from_str::<GoogleErrorEnvelope>(&body) {
			if status.as_u16() == 404 {
				return Err(ProviderError::NotFound {
					query: envelope.error.message,
				});
			}
			return Err(ProviderError::ApiError {
				status: envelope.error.status,
				message: envelope.error.message,
			});
		}
		return Err(ProviderError::from_http_failure(status.as_u16()));
	}

	serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
		reason: format!("Failed to parse response: {}", e),
	})
}

fn map_transport_error(error: reqwest::Error, timeout_ms: u64) -> ProviderError {
	if error.is_timeout() {
		ProviderError::Timeout { timeout_ms }
	} else {
		ProviderError::HttpError(error.without_url())
	}
}
