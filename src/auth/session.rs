use chrono::{DateTime, Utc};

use crate::models::user::Identity;

/// Lifecycle identitas: belum dicek, sedang dicek, atau sudah jelas (login / anonim).
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Checking,
    Resolved(Option<Identity>),
}

pub struct SessionStore {
    state: SessionState,
    resolved_at: Option<DateTime<Utc>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: SessionState::Uninitialized,
            resolved_at: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Identitas user yang login, bila ada.
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Resolved(identity) => identity.as_ref(),
            _ => None,
        }
    }

    pub fn is_check_complete(&self) -> bool {
        matches!(self.state, SessionState::Resolved(_))
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    pub fn begin_check(&mut self) {
        self.state = SessionState::Checking;
    }

    pub fn resolve(&mut self, identity: Option<Identity>) {
        self.state = SessionState::Resolved(identity);
        self.resolved_at = Some(Utc::now());
    }

    /// Logout: tetap "sudah dicek", tapi anonim.
    pub fn clear(&mut self) {
        self.resolve(None);
    }
}
