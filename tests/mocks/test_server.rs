//! Test server for integration tests

use std::sync::Arc;

use axum::Router;
use solar_quote::mocks::{FailingSolarProvider, MockGeocoder};
use solar_quote::{MockSolarProvider, QuoteServerBuilder, SolarDataProvider};
use tokio::task::JoinHandle;

use super::api_fixtures::ApiFixtures;

/// Running server bound to an ephemeral local port
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Mock geocoder and instant mock building data
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_solar(Arc::new(MockSolarProvider::instant())).await
	}

	/// Solar provider that always fails; fallback controlled by `fallback_to_mock`
	#[allow(dead_code)]
	pub async fn spawn_with_failing_solar(
		fallback_to_mock: bool,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let mut settings = ApiFixtures::settings();
		settings.providers.fallback_to_mock = fallback_to_mock;
		let (app, _) = QuoteServerBuilder::new()
			.with_settings(settings)
			.with_geocoder(Arc::new(MockGeocoder::denver()))
			.with_solar_provider(Arc::new(FailingSolarProvider::default()))
			.start()
			.await?;
		Self::spawn_server_with_app(app).await
	}

	pub async fn spawn_with_solar(
		solar: Arc<dyn SolarDataProvider>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (app, _) = QuoteServerBuilder::new()
			.with_settings(ApiFixtures::settings())
			.with_geocoder(Arc::new(MockGeocoder::denver()))
			.with_solar_provider(solar)
			.start()
			.await?;
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
