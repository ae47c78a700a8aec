/// E2E tests for the mock solar-data endpoint
use crate::mocks::TestServer;
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::test]
async fn test_solar_data_returns_fixed_building() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/solar-data"))
		.json(&json!({ "latitude": 39.7392, "longitude": -104.9903 }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let body: Value = resp.json().await.unwrap();
	let segments = body["roofSegments"].as_array().unwrap();
	assert_eq!(segments.len(), 2);
	assert_eq!(segments[0]["pitchDegrees"], 25.0);
	assert_eq!(segments[0]["azimuthDegrees"], 180.0);
	assert_eq!(segments[1]["azimuthDegrees"], 0.0);
	assert_eq!(body["solarPotential"]["maxArrayPanelsCount"], 20);
	assert_eq!(body["solarPotential"]["yearlyEnergyDcKwh"], 8500.0);
	assert_eq!(body["solarPotential"]["panelCapacityWatts"], 400.0);

	server.abort();
}

#[tokio::test]
async fn test_solar_data_missing_coordinates() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	for body in [
		json!({}),
		json!({ "latitude": 39.7392 }),
		json!({ "latitude": "39.7", "longitude": "-104.9" }),
		json!({ "latitude": 120.0, "longitude": 10.0 }),
	] {
		let resp = client
			.post(server.url("/api/solar-data"))
			.json(&body)
			.send()
			.await
			.unwrap();
		assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST, "body {}", body);
		let error: Value = resp.json().await.unwrap();
		assert_eq!(error, json!({ "error": "Latitude and longitude are required" }));
	}

	server.abort();
}

#[tokio::test]
async fn test_solar_data_unreadable_body() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.post(server.url("/api/solar-data"))
		.header("content-type", "application/json")
		.body("not json")
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
	let error: Value = resp.json().await.unwrap();
	assert_eq!(error, json!({ "error": "Failed to fetch solar data" }));

	server.abort();
}
