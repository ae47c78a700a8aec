//! Solar Quote Storage
//!
//! In-memory storage for wizard sessions and submitted leads.

pub mod memory_store;
pub mod traits;

pub use memory_store::MemoryStore;
pub use traits::Storage;
