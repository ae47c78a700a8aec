//! Storage traits for pluggable storage implementations

pub use solar_types::storage::{
	LeadStorageTrait as LeadStorage, SessionStorageTrait as SessionStorage, StorageError,
	StorageResult, StorageStats, StorageTrait as Storage,
};
