use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use super::domain::ProviderSession;

/// Session registry keyed by an opaque token. Entries expire after a period
/// of inactivity.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, ProviderSession>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        let sessions = Cache::builder().max_capacity(10_000).time_to_idle(idle).build();
        Self { sessions }
    }

    /// Store the session and return its token.
    pub async fn create(&self, session: ProviderSession) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), session).await;
        token
    }

    pub async fn get(&self, token: &str) -> Option<ProviderSession> {
        self.sessions.get(token).await
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).await.is_some()
    }
}
