//! Integrity verification trait
//!
//! Quotes handed to clients are signed so that a lead submitted later can
//! prove the numbers it carries were produced by this service.

/// Types that can produce a canonical string for HMAC signing
pub trait IntegrityPayload {
	/// Canonical payload covering every field that must not be tampered with
	fn to_integrity_payload(&self) -> String;
}
