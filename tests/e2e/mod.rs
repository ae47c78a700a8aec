//! End-to-end test helpers

use reqwest::Client;
use serde_json::Value;

use crate::mocks::{api_fixtures::KNOWN_ADDRESS, ApiFixtures, TestServer};

/// Start a session and return its id
pub async fn start_session(client: &Client, server: &TestServer) -> String {
	let resp = client
		.post(server.url("/api/v1/sessions"))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
	let body: Value = resp.json().await.unwrap();
	body["sessionId"].as_str().unwrap().to_string()
}

/// Drive a new session to the quote step and return its id and state
pub async fn session_at_quote(client: &Client, server: &TestServer) -> (String, Value) {
	let id = start_session(client, server).await;
	post_step(client, server, &id, "address", serde_json::json!({ "address": KNOWN_ADDRESS })).await;
	post_step(client, server, &id, "energy", ApiFixtures::energy()).await;
	let session = post_step(client, server, &id, "system", ApiFixtures::system()).await;
	(id, session)
}

/// POST a step body and assert success
pub async fn post_step(
	client: &Client,
	server: &TestServer,
	id: &str,
	step: &str,
	body: Value,
) -> Value {
	let resp = client
		.post(server.url(&format!("/api/v1/sessions/{}/{}", id, step)))
		.json(&body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK, "step {} failed", step);
	resp.json().await.unwrap()
}
