//! Writes the solar quote API's OpenAPI document to disk without starting
//! the server.
//!
//! ```bash
//! cargo run -p solar-api --bin generate_openapi --features openapi
//! cargo run -p solar-api --bin generate_openapi --features openapi -- out/solar.json
//! ```

#[cfg(feature = "openapi")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
	use std::path::PathBuf;

	use solar_api::openapi::ApiDoc;
	use utoipa::OpenApi;

	let output: PathBuf = std::env::args()
		.nth(1)
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("docs/api/openapi.json"));

	if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
		std::fs::create_dir_all(dir)?;
	}

	let doc = ApiDoc::openapi();
	std::fs::write(&output, doc.to_pretty_json()?)?;

	println!(
		"Wrote {} paths to {}",
		doc.paths.paths.len(),
		output.display()
	);
	Ok(())
}

#[cfg(not(feature = "openapi"))]
fn main() {
	eprintln!("generate_openapi needs the `openapi` feature:");
	eprintln!("  cargo run -p solar-api --bin generate_openapi --features openapi");
	std::process::exit(1);
}
