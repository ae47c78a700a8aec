/// E2E tests for the stateless quote and geocode endpoints
use crate::mocks::{api_fixtures::KNOWN_ADDRESS, ApiFixtures, TestServer};
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::test]
async fn test_quote_from_bill() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/v1/quotes"))
		.json(&ApiFixtures::quote_data())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let body: Value = resp.json().await.unwrap();
	assert!(body["quoteId"].is_string());
	assert!(body["integrityChecksum"].is_string());
	let system = &body["system"];
	assert_eq!(system["annualUsageKwh"], 11250.0);
	assert!(system["panelCount"].as_u64().unwrap() > 0);
	assert!(system["netPrice"].as_f64().unwrap() < system["grossPrice"].as_f64().unwrap());

	server.abort();
}

#[tokio::test]
async fn test_quote_without_usage_is_validation_error() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/v1/quotes"))
		.json(&json!({ "address": "somewhere" }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "VALIDATION_ERROR");
	assert!(body["timestamp"].is_i64());

	server.abort();
}

#[tokio::test]
async fn test_quote_malformed_json() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/v1/quotes"))
		.body("{ invalid json")
		.header("content-type", "application/json")
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	server.abort();
}

#[tokio::test]
async fn test_geocode_known_and_unknown_address() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/v1/geocode"))
		.json(&json!({ "address": KNOWN_ADDRESS }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["location"]["latitude"], 39.742);

	let resp = client
		.post(server.url("/api/v1/geocode"))
		.json(&json!({ "address": "1 Nowhere Lane" }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "GEOCODING_FAILED");

	let resp = client
		.post(server.url("/api/v1/geocode"))
		.json(&json!({ "address": "   " }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	server.abort();
}
