/// E2E tests for the four-step wizard
use crate::e2e::{post_step, session_at_quote, start_session};
use crate::mocks::{api_fixtures::KNOWN_ADDRESS, ApiFixtures, TestServer};
use reqwest::Client;
use serde_json::{json, Value};

#[tokio::test]
async fn test_full_wizard_flow() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;

	let session = post_step(&client, &server, &id, "address", json!({ "address": KNOWN_ADDRESS })).await;
	assert_eq!(session["step"], "energy");
	assert_eq!(session["buildingSource"], "live");
	assert_eq!(
		session["data"]["address"],
		"1600 Pennsylvania St, Denver, CO 80203, USA"
	);
	assert!(session["quote"].is_null());

	let session = post_step(&client, &server, &id, "energy", ApiFixtures::energy()).await;
	assert_eq!(session["step"], "system");
	// 11250 kWh a year at 1062.5 kWh/kW would need 10.6 kW; the roof holds 8 kW
	assert_eq!(session["quote"]["system"]["recommendedSizeKw"], 8.0);
	assert!(session["layout"].is_null());

	let session = post_step(&client, &server, &id, "system", ApiFixtures::system()).await;
	assert_eq!(session["step"], "quote");
	let system = &session["quote"]["system"];
	assert_eq!(system["systemSizeKw"], 8.0);
	assert!(system["warrantyCost"].as_f64().unwrap() > 0.0);

	let panels = session["layout"]["panels"].as_array().unwrap();
	assert!(!panels.is_empty());
	assert!(panels.len() as u64 <= system["panelCount"].as_u64().unwrap());

	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}", id)))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let fetched: Value = resp.json().await.unwrap();
	assert_eq!(fetched["step"], "quote");

	server.abort();
}

#[tokio::test]
async fn test_steps_cannot_be_skipped() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/system", id)))
		.json(&ApiFixtures::system())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "INVALID_TRANSITION");

	server.abort();
}

#[tokio::test]
async fn test_going_back_keeps_entered_data() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let (id, _) = session_at_quote(&client, &server).await;

	let session = post_step(&client, &server, &id, "back", json!({ "step": "energy" })).await;
	assert_eq!(session["step"], "energy");
	assert_eq!(session["data"]["monthlyBill"], 150.0);
	assert_eq!(session["data"]["warranty"], "extended");

	// forward again from energy
	let session = post_step(&client, &server, &id, "energy", json!({ "monthlyUsageKwh": 500.0 })).await;
	assert_eq!(session["step"], "system");
	assert_eq!(session["quote"]["system"]["annualUsageKwh"], 6000.0);

	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/back", id)))
		.json(&json!({ "step": "quote" }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);

	server.abort();
}

#[tokio::test]
async fn test_invalid_energy_input_rejected() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	post_step(&client, &server, &id, "address", json!({ "address": KNOWN_ADDRESS })).await;

	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/energy", id)))
		.json(&json!({ "roofType": "tile" }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}", id)))
		.send()
		.await
		.unwrap();
	let session: Value = resp.json().await.unwrap();
	assert_eq!(session["step"], "energy");

	server.abort();
}

#[tokio::test]
async fn test_unknown_address_keeps_session_on_first_step() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/address", id)))
		.json(&json!({ "address": "1 Nowhere Lane" }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}", id)))
		.send()
		.await
		.unwrap();
	let session: Value = resp.json().await.unwrap();
	assert_eq!(session["step"], "address");

	server.abort();
}

#[tokio::test]
async fn test_failing_solar_provider_falls_back_to_mock() {
	let server = TestServer::spawn_with_failing_solar(true)
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	let session = post_step(&client, &server, &id, "address", json!({ "address": KNOWN_ADDRESS })).await;
	assert_eq!(session["buildingSource"], "mock");
	assert_eq!(
		session["data"]["building"]["solarPotential"]["maxArrayPanelsCount"],
		20
	);

	server.abort();
}

#[tokio::test]
async fn test_failing_solar_provider_without_fallback_uses_defaults() {
	let server = TestServer::spawn_with_failing_solar(false)
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	let session = post_step(&client, &server, &id, "address", json!({ "address": KNOWN_ADDRESS })).await;
	assert_eq!(session["buildingSource"], "unavailable");
	assert!(session["data"]["building"].is_null());

	let session = post_step(&client, &server, &id, "energy", ApiFixtures::energy()).await;
	// 11250 kWh a year at the default 1400 kWh/kW
	assert_eq!(session["quote"]["system"]["recommendedSizeKw"], 8.0);

	server.abort();
}

#[tokio::test]
async fn test_map_view_and_panel_drag() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let (id, session) = session_at_quote(&client, &server).await;

	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}/map", id)))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let map: Value = resp.json().await.unwrap();
	assert_eq!(map["mapType"], "satellite");
	assert_eq!(map["zoom"], 20);
	assert_eq!(map["center"]["latitude"], 39.742);
	assert!(map["markers"].as_array().unwrap().len() > 1);

	let first = session["layout"]["panels"][0]["location"].clone();
	let resp = client
		.put(server.url(&format!("/api/v1/sessions/{}/panels/0", id)))
		.json(&first)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let moved: Value = resp.json().await.unwrap();
	assert!(moved["layout"]["panels"][0]["yearlyEnergyKwh"].is_null());

	let far = json!({
		"latitude": first["latitude"].as_f64().unwrap() + 0.01,
		"longitude": first["longitude"].as_f64().unwrap()
	});
	let resp = client
		.put(server.url(&format!("/api/v1/sessions/{}/panels/0", id)))
		.json(&far)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "LAYOUT_VIOLATION");

	let resp = client
		.put(server.url(&format!("/api/v1/sessions/{}/panels/999", id)))
		.json(&first)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

	server.abort();
}

#[tokio::test]
async fn test_map_before_address_is_conflict() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let id = start_session(&client, &server).await;
	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}/map", id)))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CONFLICT);

	server.abort();
}

#[tokio::test]
async fn test_contact_submission_creates_lead() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let (id, _) = session_at_quote(&client, &server).await;

	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/contact", id)))
		.json(&ApiFixtures::contact())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
	let ack: Value = resp.json().await.unwrap();
	assert_eq!(
		ack["message"],
		"Thank you! We'll contact you soon with your personalized solar quote."
	);

	let resp = client
		.get(server.url(&format!("/api/v1/sessions/{}", id)))
		.send()
		.await
		.unwrap();
	let session: Value = resp.json().await.unwrap();
	assert_eq!(session["leadId"], ack["leadId"]);

	server.abort();
}
