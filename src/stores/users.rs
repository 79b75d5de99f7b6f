//! Signed-in user, session token and the profile cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{IdentityProvider, IdpCredential, decode_claims};
use crate::error::{ClientError, Result};
use crate::models::{UpdateUser, User};
use crate::services::UserService;
use crate::storage::{StorageAdapter, keys};
use crate::util::toggle_membership;

/// Which of the user's seed lists a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedList {
    Have,
    Want,
}

pub struct UsersStore<P> {
    provider: P,
    service: UserService,
    storage: Arc<dyn StorageAdapter>,
    user: Option<User>,
    /// Profiles fetched this session. Entries stay until invalidated.
    cache: HashMap<String, User>,
}

impl<P: IdentityProvider> UsersStore<P> {
    pub fn new(provider: P, service: UserService, storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            provider,
            service,
            storage,
            user: None,
            cache: HashMap::new(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Mutable access for profile edits; persist them with [`Self::save`].
    pub fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cached(&self, id: &str) -> Option<&User> {
        self.cache.get(id)
    }

    pub async fn sign_in_with_google(&mut self, credential: &IdpCredential) -> Result<&User> {
        let signed_in = self.provider.sign_in(credential).await.inspect_err(|e| {
            tracing::error!("Error during Google sign-in: {}", e);
        })?;

        self.storage.set(keys::AUTH_TOKEN, &signed_in.id_token);
        tracing::info!(uid = %signed_in.uid, "Signed in");

        self.fetch_current_user(&signed_in.uid).await
    }

    pub async fn sign_out(&mut self) -> Result<()> {
        self.provider.sign_out().await.inspect_err(|e| {
            tracing::error!("Error during sign out: {}", e);
        })?;
        self.storage.remove(keys::AUTH_TOKEN);
        self.user = None;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Resume the session held in storage, if its token is still valid.
    ///
    /// Returns the restored user, or `None` when there was nothing to restore.
    /// Expired or unreadable tokens are removed.
    pub async fn restore_session(&mut self) -> Result<Option<&User>> {
        let Some(token) = self.storage.get(keys::AUTH_TOKEN) else {
            return Ok(None);
        };

        let uid = match decode_claims(&token) {
            Ok(claims) if !claims.is_expired() => claims.uid().map(String::from),
            Ok(_) => {
                tracing::info!("Stored session expired, discarding token");
                None
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable stored token: {}", e);
                None
            }
        };

        let Some(uid) = uid else {
            self.storage.remove(keys::AUTH_TOKEN);
            return Ok(None);
        };

        self.fetch_current_user(&uid).await.map(Some)
    }

    pub async fn fetch_current_user(&mut self, uid: &str) -> Result<&User> {
        let user = self.get_user_by_id(uid).await?;
        Ok(self.user.insert(user))
    }

    /// Cached profile if present, otherwise fetched once and cached.
    pub async fn get_user_by_id(&mut self, id: &str) -> Result<User> {
        if let Some(user) = self.cache.get(id) {
            return Ok(user.clone());
        }

        let user = self.service.get(id).await.inspect_err(|e| {
            tracing::error!(user_id = %id, "Error fetching user: {}", e);
        })?;
        self.cache.insert(id.to_string(), user.clone());
        Ok(user)
    }

    /// Drop one cached profile so the next lookup refetches it.
    pub fn invalidate_user(&mut self, id: &str) -> bool {
        self.cache.remove(id).is_some()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Persist the loaded user's profile.
    pub async fn save(&mut self) -> Result<()> {
        let Some(user) = self.user.as_ref() else {
            return Err(ClientError::NoUserLoaded);
        };

        let payload = UpdateUser::from(user);
        self.service.update(&user.id, &payload).await?;

        self.cache.insert(user.id.clone(), user.clone());
        Ok(())
    }

    pub async fn update_have(&mut self, seed_id: &str, state: bool) -> Result<()> {
        self.update_seed_list(SeedList::Have, seed_id, state).await
    }

    pub async fn update_want(&mut self, seed_id: &str, state: bool) -> Result<()> {
        self.update_seed_list(SeedList::Want, seed_id, state).await
    }

    /// Set membership of `seed_id` in one of the lists, then save the whole
    /// profile. Every call writes, even when the list did not change.
    pub async fn update_seed_list(&mut self, list: SeedList, seed_id: &str, state: bool) -> Result<()> {
        let user = self.user.as_mut().ok_or(ClientError::NoUserLoaded)?;
        let set = match list {
            SeedList::Have => &mut user.have,
            SeedList::Want => &mut user.want,
        };
        toggle_membership(set, seed_id, state);
        self.save().await
    }
}

impl<P> std::fmt::Debug for UsersStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersStore")
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .field("cached", &self.cache.len())
            .finish()
    }
}
