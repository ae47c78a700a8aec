//! Zeroizing string for provider API keys and signing secrets

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose contents are wiped from memory on drop and never printed.
///
/// `Debug`, `Display` and `Serialize` all redact the value; the only way to
/// read it is [`SecretString::expose_secret`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	pub fn from_str(secret: &str) -> Self {
		Self::new(secret.to_string())
	}

	/// Access the raw value. Keep the borrow short.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Last four characters prefixed with asterisks, for startup logs
	pub fn masked(&self) -> String {
		let chars: Vec<char> = self.inner.chars().collect();
		if chars.len() <= 4 {
			return "****".to_string();
		}
		let tail: String = chars[chars.len() - 4..].iter().collect();
		format!("****{}", tail)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretString")
			.field("inner", &"[REDACTED]")
			.finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::from_str(secret)
	}
}

impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secret = String::deserialize(deserializer)?;
		Ok(SecretString::new(secret))
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
