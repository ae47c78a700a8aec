//! Storage traits for pluggable storage implementations

use async_trait::async_trait;
use serde::Serialize;

use super::StorageResult;
use crate::leads::Lead;
use crate::sessions::QuoteSession;

/// Counts reported by the readiness probe
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
	pub total_sessions: usize,
	pub active_sessions: usize,
	pub total_leads: usize,
}

#[async_trait]
pub trait SessionStorageTrait: Send + Sync {
	async fn create_session(&self, session: QuoteSession) -> StorageResult<()>;

	/// Expired sessions are reported as absent
	async fn get_session(&self, session_id: &str) -> StorageResult<Option<QuoteSession>>;

	/// Replace the stored session if its version still matches
	/// `session.version`; the stored copy is then one version ahead.
	async fn update_session(&self, session: QuoteSession) -> StorageResult<()>;

	async fn remove_session(&self, session_id: &str) -> StorageResult<bool>;

	async fn session_count(&self) -> StorageResult<usize>;

	/// Drop expired sessions, returning how many were removed
	async fn cleanup_expired_sessions(&self) -> StorageResult<usize>;
}

#[async_trait]
pub trait LeadStorageTrait: Send + Sync {
	async fn add_lead(&self, lead: Lead) -> StorageResult<()>;

	async fn get_lead(&self, lead_id: &str) -> StorageResult<Option<Lead>>;

	/// Newest first
	async fn list_leads(&self) -> StorageResult<Vec<Lead>>;

	async fn lead_count(&self) -> StorageResult<usize>;
}

/// Main storage trait that combines all storage operations
#[async_trait]
pub trait StorageTrait: SessionStorageTrait + LeadStorageTrait {
	async fn health_check(&self) -> StorageResult<bool>;

	async fn stats(&self) -> StorageResult<StorageStats>;

	async fn close(&self) -> StorageResult<()>;

	/// Start background work such as TTL cleanup. Default does nothing.
	async fn start_background_tasks(&self) -> StorageResult<()> {
		Ok(())
	}
}
