//! Solar Quote Server
//!
//! Main entry point for the quote server

use solar_quote::QuoteServerBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();
	let settings = solar_quote::load_config()?;
	QuoteServerBuilder::from_config(settings).start_server().await
}
