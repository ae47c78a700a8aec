//! Shared value types

pub mod geo;
pub mod secret_string;

pub use geo::{GeocodedAddress, LatLng};
pub use secret_string::SecretString;
