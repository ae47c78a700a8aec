//! Shared test server and fixtures for the integration tests

pub mod api_fixtures;
pub mod test_server;

#[allow(unused_imports)]
pub use api_fixtures::ApiFixtures;
#[allow(unused_imports)]
pub use test_server::TestServer;
