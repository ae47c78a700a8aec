//! In-memory storage implementation using DashMap with TTL support

use crate::traits::{
	LeadStorage, SessionStorage, Storage, StorageError, StorageResult, StorageStats,
};
use async_trait::async_trait;
use dashmap::DashMap;
use solar_types::{Lead, QuoteSession};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};

const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// In-memory storage for sessions and leads
#[derive(Clone)]
pub struct MemoryStore {
	sessions: Arc<DashMap<String, QuoteSession>>,
	leads: Arc<DashMap<String, Lead>>,
	cleanup_interval: Duration,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::with_cleanup_interval(Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS))
	}

	/// Create a store whose background task sweeps expired sessions at `every`
	pub fn with_cleanup_interval(every: Duration) -> Self {
		Self {
			sessions: Arc::new(DashMap::new()),
			leads: Arc::new(DashMap::new()),
			cleanup_interval: every,
		}
	}

	/// Spawn the TTL cleanup task for expired sessions
	pub fn start_ttl_cleanup(&self) -> tokio::task::JoinHandle<()> {
		let sessions = Arc::clone(&self.sessions);
		let every = self.cleanup_interval;
		tokio::spawn(async move {
			let mut ticker = interval(every);
			loop {
				ticker.tick().await;
				let removed = remove_expired(&sessions);
				if removed > 0 {
					debug!("Cleaned up {} expired sessions", removed);
				}
			}
		})
	}
}

fn remove_expired(sessions: &DashMap<String, QuoteSession>) -> usize {
	let before = sessions.len();
	sessions.retain(|_, session| !session.is_expired());
	before.saturating_sub(sessions.len())
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl SessionStorage for MemoryStore {
	async fn create_session(&self, session: QuoteSession) -> StorageResult<()> {
		if self.sessions.contains_key(&session.session_id) {
			return Err(StorageError::AlreadyExists {
				id: session.session_id,
			});
		}
		self.sessions.insert(session.session_id.clone(), session);
		Ok(())
	}

	async fn get_session(&self, session_id: &str) -> StorageResult<Option<QuoteSession>> {
		let expired = match self.sessions.get(session_id) {
			Some(entry) if !entry.is_expired() => return Ok(Some(entry.clone())),
			Some(_) => true,
			None => false,
		};
		if expired {
			self.sessions.remove(session_id);
		}
		Ok(None)
	}

	async fn update_session(&self, mut session: QuoteSession) -> StorageResult<()> {
		match self.sessions.get_mut(&session.session_id) {
			Some(mut entry) => {
				if entry.version != session.version {
					return Err(StorageError::Conflict {
						id: session.session_id,
						expected: session.version,
						current: entry.version,
					});
				}
				session.version += 1;
				*entry = session;
				Ok(())
			},
			None => Err(StorageError::NotFound {
				id: session.session_id,
			}),
		}
	}

	async fn remove_session(&self, session_id: &str) -> StorageResult<bool> {
		Ok(self.sessions.remove(session_id).is_some())
	}

	async fn session_count(&self) -> StorageResult<usize> {
		Ok(self.sessions.len())
	}

	async fn cleanup_expired_sessions(&self) -> StorageResult<usize> {
		let removed = remove_expired(&self.sessions);
		if removed > 0 {
			info!("Cleaned up {} expired sessions", removed);
		}
		Ok(removed)
	}
}

#[async_trait]
impl LeadStorage for MemoryStore {
	async fn add_lead(&self, lead: Lead) -> StorageResult<()> {
		if self.leads.contains_key(&lead.lead_id) {
			return Err(StorageError::AlreadyExists { id: lead.lead_id });
		}
		self.leads.insert(lead.lead_id.clone(), lead);
		Ok(())
	}

	async fn get_lead(&self, lead_id: &str) -> StorageResult<Option<Lead>> {
		Ok(self.leads.get(lead_id).map(|entry| entry.clone()))
	}

	async fn list_leads(&self) -> StorageResult<Vec<Lead>> {
		let mut leads: Vec<Lead> = self.leads.iter().map(|entry| entry.clone()).collect();
		leads.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
		Ok(leads)
	}

	async fn lead_count(&self) -> StorageResult<usize> {
		Ok(self.leads.len())
	}
}

#[async_trait]
impl Storage for MemoryStore {
	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}

	async fn stats(&self) -> StorageResult<StorageStats> {
		let total_sessions = self.sessions.len();
		let active_sessions = self
			.sessions
			.iter()
			.filter(|entry| !entry.value().is_expired())
			.count();
		Ok(StorageStats {
			total_sessions,
			active_sessions,
			total_leads: self.leads.len(),
		})
	}

	async fn close(&self) -> StorageResult<()> {
		self.sessions.clear();
		self.leads.clear();
		Ok(())
	}

	async fn start_background_tasks(&self) -> StorageResult<()> {
		self.start_ttl_cleanup();
		info!(
			"Session TTL cleanup running every {}s",
			self.cleanup_interval.as_secs()
		);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{Duration as ChronoDuration, Utc};
	use solar_types::{ContactInfo, Interest, LeadRequest, SolarQuote, SolarSystem};

	fn lead(email: &str) -> Lead {
		let request = LeadRequest {
			contact: ContactInfo {
				name: "Jane Doe".to_string(),
				email: email.to_string(),
				phone: None,
			},
			interest: Interest::SolarPanels,
			address: None,
			quote: SolarQuote::new(SolarSystem::default()),
		};
		Lead::new(request, None)
	}

	#[tokio::test]
	async fn test_session_crud() {
		let store = MemoryStore::new();
		let mut session = QuoteSession::new(60);
		let id = session.session_id.clone();

		store.create_session(session.clone()).await.unwrap();
		assert!(store.create_session(session.clone()).await.is_err());

		session.data.address = "1 Main St".to_string();
		store.update_session(session).await.unwrap();
		let loaded = store.get_session(&id).await.unwrap().unwrap();
		assert_eq!(loaded.data.address, "1 Main St");

		assert!(store.remove_session(&id).await.unwrap());
		assert!(store.get_session(&id).await.unwrap().is_none());
		assert!(!store.remove_session(&id).await.unwrap());
	}

	#[tokio::test]
	async fn test_stale_update_is_rejected() {
		let store = MemoryStore::new();
		let session = QuoteSession::new(60);
		let id = session.session_id.clone();
		store.create_session(session.clone()).await.unwrap();

		let mut first = session.clone();
		first.data.address = "first".to_string();
		let mut second = session;
		second.data.address = "second".to_string();

		store.update_session(first).await.unwrap();
		let result = store.update_session(second).await;
		assert!(matches!(
			result,
			Err(StorageError::Conflict {
				expected: 0,
				current: 1,
				..
			})
		));

		let stored = store.get_session(&id).await.unwrap().unwrap();
		assert_eq!(stored.data.address, "first");
		assert_eq!(stored.version, 1);
	}

	#[tokio::test]
	async fn test_update_missing_session_fails() {
		let store = MemoryStore::new();
		let result = store.update_session(QuoteSession::new(60)).await;
		assert!(matches!(result, Err(StorageError::NotFound { .. })));
	}

	#[tokio::test]
	async fn test_expired_session_is_absent() {
		let store = MemoryStore::new();
		let session = QuoteSession::new(-1);
		let id = session.session_id.clone();
		store.create_session(session).await.unwrap();

		assert!(store.get_session(&id).await.unwrap().is_none());
		assert_eq!(store.session_count().await.unwrap(), 0);
	}

	#[tokio::test]
	async fn test_cleanup_expired_sessions() {
		let store = MemoryStore::new();
		store.create_session(QuoteSession::new(60)).await.unwrap();
		store.create_session(QuoteSession::new(-5)).await.unwrap();
		store.create_session(QuoteSession::new(-5)).await.unwrap();

		let stats = store.stats().await.unwrap();
		assert_eq!(stats.total_sessions, 3);
		assert_eq!(stats.active_sessions, 1);

		assert_eq!(store.cleanup_expired_sessions().await.unwrap(), 2);
		assert_eq!(store.session_count().await.unwrap(), 1);
	}

	#[tokio::test]
	async fn test_leads_listed_newest_first() {
		let store = MemoryStore::new();
		let mut older = lead("old@example.com");
		older.submitted_at = Utc::now() - ChronoDuration::minutes(5);
		let newer = lead("new@example.com");

		store.add_lead(older.clone()).await.unwrap();
		store.add_lead(newer.clone()).await.unwrap();
		assert!(store.add_lead(newer.clone()).await.is_err());

		let leads = store.list_leads().await.unwrap();
		assert_eq!(leads.len(), 2);
		assert_eq!(leads[0].lead_id, newer.lead_id);
		assert_eq!(
			store.get_lead(&older.lead_id).await.unwrap().unwrap().contact.email,
			"old@example.com"
		);
		assert_eq!(store.stats().await.unwrap().total_leads, 2);
	}

	#[tokio::test]
	async fn test_background_cleanup_sweeps() {
		let store = MemoryStore::with_cleanup_interval(Duration::from_millis(20));
		store.create_session(QuoteSession::new(-1)).await.unwrap();
		store.start_background_tasks().await.unwrap();
		tokio::time::sleep(Duration::from_millis(100)).await;
		assert_eq!(store.session_count().await.unwrap(), 0);
	}
}
