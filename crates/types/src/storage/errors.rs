//! Storage failures for sessions and leads

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
	/// Session or lead id is unknown (or the session has expired)
	#[error("Record not found: {id}")]
	NotFound { id: String },
	/// Generated ids collided with a stored record
	#[error("Record already stored: {id}")]
	AlreadyExists { id: String },
	/// The record changed since the caller read it
	#[error("Record {id} is at version {current}, update was based on {expected}")]
	Conflict { id: String, expected: u64, current: u64 },
}
