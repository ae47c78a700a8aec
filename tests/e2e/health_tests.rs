/// E2E tests for health endpoints
use crate::mocks::TestServer;
use reqwest::Client;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/health")).send().await.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	assert_eq!(resp.text().await.unwrap(), "OK");

	server.abort();
}

#[tokio::test]
async fn test_ready_reports_providers() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/ready")).send().await.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ready");
	assert_eq!(body["storage_healthy"], true);
	assert_eq!(body["providers"]["mock-geocoding"], true);
	assert_eq!(body["providers"]["mock-solar"], true);

	server.abort();
}

#[tokio::test]
async fn test_ready_degraded_when_solar_provider_unhealthy() {
	let server = TestServer::spawn_with_failing_solar(true)
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/ready")).send().await.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "degraded");

	server.abort();
}

#[tokio::test]
async fn test_unknown_endpoint_404() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.get(server.url("/unknown-endpoint"))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

	server.abort();
}
