/// E2E tests for stateless lead submission
use crate::mocks::{ApiFixtures, TestServer};
use reqwest::Client;
use serde_json::{json, Value};

async fn signed_quote(client: &Client, server: &TestServer) -> Value {
	let resp = client
		.post(server.url("/api/v1/quotes"))
		.json(&ApiFixtures::quote_data())
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	resp.json().await.unwrap()
}

#[tokio::test]
async fn test_lead_with_signed_quote() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let quote = signed_quote(&client, &server).await;
	let resp = client
		.post(server.url("/api/v1/leads"))
		.json(&json!({
			"contact": ApiFixtures::contact(),
			"interest": "both",
			"quote": quote
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
	let ack: Value = resp.json().await.unwrap();
	assert!(ack["leadId"].is_string());

	let resp = client.get(server.url("/ready")).send().await.unwrap();
	let ready: Value = resp.json().await.unwrap();
	assert_eq!(ready["total_leads"], 1);

	server.abort();
}

#[tokio::test]
async fn test_lead_with_tampered_quote_rejected() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let mut quote = signed_quote(&client, &server).await;
	quote["system"]["netPrice"] = json!(1.0);

	let resp = client
		.post(server.url("/api/v1/leads"))
		.json(&json!({ "contact": ApiFixtures::contact(), "quote": quote }))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "INTEGRITY_ERROR");

	server.abort();
}

#[tokio::test]
async fn test_lead_with_invalid_email_rejected() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let quote = signed_quote(&client, &server).await;
	let resp = client
		.post(server.url("/api/v1/leads"))
		.json(&json!({
			"contact": { "name": "Ada", "email": "not-an-email" },
			"quote": quote
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
	let body: Value = resp.json().await.unwrap();
	assert_eq!(body["error"], "VALIDATION_ERROR");

	server.abort();
}
