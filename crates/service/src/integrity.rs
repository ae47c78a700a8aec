//! Quote signing with HMAC-SHA256
//!
//! Quotes leave the service with a checksum over their canonical payload so
//! that a quote submitted back with a lead can be trusted without storing it.

use hmac::{Hmac, Mac};
use solar_types::{IntegrityPayload, SecretString};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum IntegrityError {
	#[error("Failed to create HMAC: {0}")]
	HmacCreation(String),

	#[error("Invalid checksum format")]
	InvalidFormat,
}

#[cfg_attr(test, mockall::automock)]
pub trait IntegrityTrait: Send + Sync {
	/// Hex-encoded HMAC of `payload`
	fn generate_checksum_from_payload(&self, payload: &str) -> Result<String, IntegrityError>;

	fn verify_checksum_from_payload(
		&self,
		payload: &str,
		expected_checksum: &str,
	) -> Result<bool, IntegrityError>;
}

pub struct IntegrityService {
	secret_key: SecretString,
}

impl IntegrityService {
	pub fn new(secret_key: SecretString) -> Self {
		Self { secret_key }
	}

	fn mac(&self) -> Result<HmacSha256, IntegrityError> {
		HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
			.map_err(|e| IntegrityError::HmacCreation(e.to_string()))
	}

	pub fn sign<T: IntegrityPayload>(&self, data: &T) -> Result<String, IntegrityError> {
		self.generate_checksum_from_payload(&data.to_integrity_payload())
	}

	pub fn verify<T: IntegrityPayload>(&self, data: &T, checksum: &str) -> Result<bool, IntegrityError> {
		self.verify_checksum_from_payload(&data.to_integrity_payload(), checksum)
	}
}

impl IntegrityTrait for IntegrityService {
	fn generate_checksum_from_payload(&self, payload: &str) -> Result<String, IntegrityError> {
		let mut mac = self.mac()?;
		mac.update(payload.as_bytes());
		Ok(hex::encode(mac.finalize().into_bytes()))
	}

	fn verify_checksum_from_payload(
		&self,
		payload: &str,
		expected_checksum: &str,
	) -> Result<bool, IntegrityError> {
		let expected = hex::decode(expected_checksum).map_err(|_| IntegrityError::InvalidFormat)?;
		let mut mac = self.mac()?;
		mac.update(payload.as_bytes());
		// verify_slice compares in constant time
		Ok(mac.verify_slice(&expected).is_ok())
	}
}
