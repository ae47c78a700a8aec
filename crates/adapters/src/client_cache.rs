//! HTTP client cache
//!
//! One pooled `reqwest::Client` per provider configuration, recreated after a TTL.

use dashmap::{mapref::entry::Entry, DashMap};
use reqwest::{Client, ClientBuilder};
use solar_types::{ProviderError, ProviderResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const USER_AGENT: &str = concat!("solar-quote/", env!("CARGO_PKG_VERSION"));

/// Settings that distinguish one cached client from another
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	pub provider_id: String,
	pub base_url: String,
	/// Whole-request timeout
	pub timeout_ms: u64,
	pub max_idle_per_host: usize,
	pub keep_alive_timeout_ms: u64,
	pub headers: Vec<(String, String)>,
}

impl ClientConfig {
	pub fn new(provider_id: &str, base_url: &str, timeout_ms: u64) -> Self {
		Self {
			provider_id: provider_id.to_string(),
			base_url: base_url.to_string(),
			timeout_ms,
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
			headers: vec![("Accept".to_string(), "application/json".to_string())],
		}
	}

	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		self.headers.push((name.to_string(), value.to_string()));
		self
	}
}

#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients keyed by [`ClientConfig`]
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Cache with a 30 minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create the client for `config`
	pub fn get_client(&self, config: &ClientConfig) -> ProviderResult<Arc<Client>> {
		self.clients
			.remove_if(config, |_, cached| cached.is_expired(self.ttl));

		if let Some(cached) = self.clients.get(config) {
			return Ok(cached.client.clone());
		}

		debug!(
			"Creating HTTP client for {} ({})",
			config.provider_id, config.base_url
		);
		let cached = CachedClient::new(build_client(config)?);

		// Another task may have inserted meanwhile; keep the first one.
		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().client.clone()),
			Entry::Vacant(entry) => Ok(entry.insert(cached).client.clone()),
		}
	}

	/// Drop expired clients, returning how many were removed
	pub fn cleanup_expired(&self) -> usize {
		let before = self.clients.len();
		self.clients.retain(|_, cached| !cached.is_expired(self.ttl));
		let removed = before.saturating_sub(self.clients.len());
		if removed > 0 {
			debug!("Cleaned up {} expired HTTP clients", removed);
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

fn build_client(config: &ClientConfig) -> ProviderResult<Client> {
	let mut header_map = reqwest::header::HeaderMap::new();
	for (key, value) in &config.headers {
		let name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
			ProviderError::ConfigError {
				reason: format!("invalid header name '{}': {}", key, e),
			}
		})?;
		let value =
			reqwest::header::HeaderValue::from_str(value).map_err(|e| ProviderError::ConfigError {
				reason: format!("invalid value for header '{}': {}", key, e),
			})?;
		header_map.insert(name, value);
	}

	ClientBuilder::new()
		.user_agent(USER_AGENT)
		.default_headers(header_map)
		.timeout(Duration::from_millis(config.timeout_ms))
		.pool_max_idle_per_host(config.max_idle_per_host)
		.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
		.tcp_keepalive(Duration::from_secs(60))
		.build()
		.map_err(ProviderError::HttpError)
}
