//! Storage seams for sessions and leads

pub mod errors;
pub mod traits;

pub use errors::StorageError;
pub use traits::{LeadStorageTrait, SessionStorageTrait, StorageStats, StorageTrait};

pub type StorageResult<T> = Result<T, StorageError>;
