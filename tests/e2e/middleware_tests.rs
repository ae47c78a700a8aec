/// E2E tests for the shared middleware stack
use crate::mocks::TestServer;
use reqwest::Client;

#[tokio::test]
async fn test_security_headers_present() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/health")).send().await.unwrap();
	let headers = resp.headers();
	assert_eq!(headers["x-content-type-options"], "nosniff");
	assert_eq!(headers["x-frame-options"], "DENY");
	assert!(headers.contains_key("strict-transport-security"));
	assert!(headers.contains_key("content-security-policy"));

	server.abort();
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/health")).send().await.unwrap();
	assert!(resp.headers().contains_key("x-request-id"));

	let resp = client
		.get(server.url("/health"))
		.header("x-request-id", "req-123")
		.send()
		.await
		.unwrap();
	assert_eq!(resp.headers()["x-request-id"], "req-123");

	server.abort();
}

#[tokio::test]
async fn test_oversized_body_rejected() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let body = format!("{{\"address\": \"{}\"}}", "a".repeat(2 * 1024 * 1024));
	let resp = client
		.post(server.url("/api/v1/geocode"))
		.header("content-type", "application/json")
		.body(body)
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);

	server.abort();
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
	let server = TestServer::spawn().await.expect("Failed to start test server");
	let client = Client::new();

	let resp = client
		.request(reqwest::Method::OPTIONS, server.url("/api/v1/sessions"))
		.header("origin", "http://localhost:5173")
		.header("access-control-request-method", "POST")
		.send()
		.await
		.unwrap();
	assert!(resp.status().is_success());
	assert!(resp.headers().contains_key("access-control-allow-origin"));

	server.abort();
}
