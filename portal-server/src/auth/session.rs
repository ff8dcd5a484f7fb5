//! Issued portal sessions

use dashmap::DashMap;
use shared::models::Session;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct SessionEntry {
    session: Session,
    expires_at: i64,
}

/// Token → session map with a fixed lifetime
///
/// Tokens are random UUIDs; expired entries are dropped when looked up or
/// during [`purge_expired`](Self::purge_expired).
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<String, SessionEntry>,
    ttl_secs: i64,
}

impl SessionRegistry {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Register a session and return its token
    pub fn issue(&self, session: Session) -> String {
        self.issue_at(session, chrono::Utc::now().timestamp())
    }

    fn issue_at(&self, session: Session, now: i64) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let mut expires_at = now.saturating_add(self.ttl_secs);
        // Never outlive the provider session
        if let Some(provider_exp) = session.expires_at {
            expires_at = expires_at.min(provider_exp);
        }
        self.sessions.insert(token.clone(), SessionEntry { session, expires_at });
        token
    }

    /// Live session for a token
    pub fn get(&self, token: &str) -> Option<Session> {
        self.get_at(token, chrono::Utc::now().timestamp())
    }

    fn get_at(&self, token: &str, now: i64) -> Option<Session> {
        let entry = self.sessions.get(token)?;
        if now < entry.expires_at {
            return Some(entry.session.clone());
        }
        drop(entry);
        self.sessions.remove(token);
        None
    }

    /// Drop a session; returns it when it existed
    pub fn revoke(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, entry)| entry.session)
    }

    /// Remove every expired session, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = chrono::Utc::now().timestamp();
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| now < entry.expires_at);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
