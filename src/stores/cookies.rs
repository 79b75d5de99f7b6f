//! Cookie-consent state.
//!
//! Acceptance is written to durable storage with a 365-day expiry. A
//! rejection behaves like a session cookie: it lives only as long as this
//! store and replaces any earlier durable acceptance.

use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::storage::{StorageAdapter, keys};

const EXPIRATION_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConsentState {
    NotSet,
    Accepted,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredConsent {
    value: ConsentState,
    /// Unix seconds; `None` never expires
    expires_at: Option<i64>,
}

pub struct CookieConsent {
    storage: Arc<dyn StorageAdapter>,
    session: RwLock<Option<ConsentState>>,
}

impl CookieConsent {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            session: RwLock::new(None),
        }
    }

    pub fn state(&self) -> ConsentState {
        if let Some(state) = self.session.read().ok().and_then(|s| *s) {
            return state;
        }

        let Some(raw) = self.storage.get(keys::COOKIES_CONSENT) else {
            return ConsentState::NotSet;
        };

        match serde_json::from_str::<StoredConsent>(&raw) {
            Ok(stored) if stored.expires_at.is_some_and(|exp| exp <= Utc::now().timestamp()) => {
                self.storage.remove(keys::COOKIES_CONSENT);
                ConsentState::NotSet
            }
            Ok(stored) => stored.value,
            Err(e) => {
                tracing::warn!("Discarding unreadable consent record: {}", e);
                self.storage.remove(keys::COOKIES_CONSENT);
                ConsentState::NotSet
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.state() == ConsentState::Accepted
    }

    pub fn is_not_set(&self) -> bool {
        self.state() == ConsentState::NotSet
    }

    pub fn accept(&self) {
        let record = StoredConsent {
            value: ConsentState::Accepted,
            expires_at: Some((Utc::now() + Duration::days(EXPIRATION_DAYS)).timestamp()),
        };
        match serde_json::to_string(&record) {
            Ok(json) => self.storage.set(keys::COOKIES_CONSENT, &json),
            Err(e) => tracing::warn!("Failed to encode consent record: {}", e),
        }
        if let Ok(mut session) = self.session.write() {
            *session = None;
        }
    }

    pub fn reject(&self) {
        self.storage.remove(keys::COOKIES_CONSENT);
        if let Ok(mut session) = self.session.write() {
            *session = Some(ConsentState::Rejected);
        }
    }
}

impl std::fmt::Debug for CookieConsent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieConsent")
            .field("state", &self.state())
            .finish()
    }
}
