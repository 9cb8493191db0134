use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use cardwise_core::domain::profile::UserProfile;

/// Identifier for one conversation. Clients that do not send one share the
/// default session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub const DEFAULT: &'static str = "default";

    pub fn from_request(raw: Option<String>) -> Self {
        let id = raw
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Self::DEFAULT.to_string());
        Self(id)
    }
}

#[derive(Clone, Debug)]
struct SessionEntry {
    profile: UserProfile,
    last_active_at: DateTime<Utc>,
}

/// In-memory conversation state keyed by session id. State lives for the
/// process lifetime only; an explicit reset removes the entry.
///
/// Turns work on a snapshot and commit their resolved fields back through
/// the profile's first-write-wins `set`, so no lock is held across oracle
/// calls and concurrent commits merge monotonically instead of clobbering
/// each other.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the session's profile; empty for an unknown session.
    pub async fn profile(&self, id: &SessionId) -> UserProfile {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|entry| entry.profile.clone())
            .unwrap_or_default()
    }

    /// Merges the resolved fields of `profile` into the stored session,
    /// creating it on first use.
    pub async fn commit(&self, id: &SessionId, profile: &UserProfile) {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(id.clone()).or_insert_with(|| SessionEntry {
            profile: UserProfile::new(),
            last_active_at: Utc::now(),
        });

        for value in profile.resolved_fields() {
            entry.profile.set(value);
        }
        entry.last_active_at = Utc::now();
    }

    /// Removes the session entirely; the next turn starts fresh.
    pub async fn reset(&self, id: &SessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn last_active(&self, id: &SessionId) -> Option<DateTime<Utc>> {
        self.sessions.read().await.get(id).map(|entry| entry.last_active_at)
    }
}

#[cfg(test)]
mod tests {
    use cardwise_core::domain::profile::{FieldValue, SpendingCategory, UserProfile};

    use super::{SessionId, SessionStore};

    #[test]
    fn request_session_ids_default_and_trim() {
        assert_eq!(SessionId::from_request(None).0, "default");
        assert_eq!(SessionId::from_request(Some("   ".to_string())).0, "default");
        assert_eq!(SessionId::from_request(Some(" alice ".to_string())).0, "alice");
    }

    #[tokio::test]
    async fn commit_merges_without_overwriting_resolved_fields() {
        let store = SessionStore::new();
        let id = SessionId::from_request(None);

        let mut first = UserProfile::new();
        first.set(FieldValue::Income(40_000));
        store.commit(&id, &first).await;

        // A racing turn that resolved income differently loses the merge.
        let mut second = UserProfile::new();
        second.set(FieldValue::Income(99_999));
        second.set(FieldValue::Spending(SpendingCategory::Fuel));
        store.commit(&id, &second).await;

        let stored = store.profile(&id).await;
        assert_eq!(stored.income(), Some(40_000));
        assert_eq!(stored.spending(), Some(SpendingCategory::Fuel));
        assert!(store.last_active(&id).await.is_some());
    }

    #[tokio::test]
    async fn sessions_are_isolated_by_id() {
        let store = SessionStore::new();
        let alice = SessionId("alice".to_string());
        let bob = SessionId("bob".to_string());

        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(30_000));
        store.commit(&alice, &profile).await;

        assert_eq!(store.profile(&alice).await.income(), Some(30_000));
        assert_eq!(store.profile(&bob).await.income(), None);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn reset_removes_the_session() {
        let store = SessionStore::new();
        let id = SessionId::from_request(None);

        let mut profile = UserProfile::new();
        profile.set(FieldValue::Income(30_000));
        store.commit(&id, &profile).await;

        assert!(store.reset(&id).await);
        assert!(!store.reset(&id).await);
        assert_eq!(store.profile(&id).await, UserProfile::default());
    }
}
