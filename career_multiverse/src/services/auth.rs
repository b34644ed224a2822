//! Auth Service
//!
//! Simulated login/signup against the single locally stored profile. The
//! session slot records only who is signed in; `current_user` always
//! dereferences the live profile, so the session can never serve a stale
//! copy of it.

use crate::config::ServiceConfig;
use crate::error::{MultiverseError, Result};
use crate::multiverse::store::RealityStore;
use crate::multiverse::templates::{origin_profile, DEMO_EMAIL};
use crate::multiverse::types::StudentProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEMO_CREDENTIAL: &str = "password";

/// What the session slot holds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub profile_id: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

pub struct AuthService {
    store: Arc<RealityStore>,
    config: ServiceConfig,
}

fn unavailable(err: MultiverseError) -> MultiverseError {
    match err {
        MultiverseError::Storage(e) => {
            MultiverseError::Unavailable(format!("profile store unavailable: {}", e))
        }
        other => other,
    }
}

impl AuthService {
    pub fn new(store: Arc<RealityStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Accepts the stored profile's email with its credential, when one was
    /// set at signup. The demo credential only works while the demo account
    /// is the stored profile.
    pub async fn login(&self, email: &str, credential: &str) -> Result<StudentProfile> {
        tokio::time::sleep(self.config.login_delay).await;

        let profile = self.store.read().map_err(unavailable)?;

        let owner_match = profile.email == email
            && profile
                .password_hash
                .as_deref()
                .map_or(true, |hash| hash == credential);
        let demo_match = email == DEMO_EMAIL
            && credential == DEMO_CREDENTIAL
            && profile.email == DEMO_EMAIL;

        if !(owner_match || demo_match) {
            log::warn!("[auth] Rejected login for {}", email);
            return Err(MultiverseError::Unauthorized(
                "Invalid credentials".to_string(),
            ));
        }

        self.set_session(&profile).map_err(unavailable)?;
        log::info!("[auth] {} signed in", email);
        Ok(profile)
    }

    /// Replaces the stored profile with a fresh one holding a single origin
    /// reality, and signs it in.
    pub async fn signup(&self, name: &str, email: &str, credential: &str) -> Result<StudentProfile> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(MultiverseError::Validation(
                "name and email are required".to_string(),
            ));
        }
        if credential.is_empty() {
            return Err(MultiverseError::Validation(
                "credential is required".to_string(),
            ));
        }

        tokio::time::sleep(self.config.signup_delay).await;

        let profile = origin_profile(name, email, credential);
        self.store.write(&profile).map_err(unavailable)?;
        self.set_session(&profile).map_err(unavailable)?;
        log::info!("[auth] Created profile {} for {}", profile.id, email);
        Ok(profile)
    }

    pub fn logout(&self) -> Result<()> {
        let key = &self.store.config().session_key;
        self.store.remove_slot(key)?;
        log::info!("[auth] Signed out");
        Ok(())
    }

    pub fn session(&self) -> Result<Option<Session>> {
        let key = &self.store.config().session_key;
        match self.store.load_slot(key)? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    /// The signed-in profile, or None when nobody is signed in or the stored
    /// profile has been replaced since.
    pub fn current_user(&self) -> Result<Option<StudentProfile>> {
        let Some(session) = self.session()? else {
            return Ok(None);
        };
        let profile = self.store.read()?;
        if profile.id != session.profile_id {
            log::warn!(
                "[auth] Session for {} no longer matches the stored profile",
                session.profile_id
            );
            return Ok(None);
        }
        Ok(Some(profile))
    }

    fn set_session(&self, profile: &StudentProfile) -> Result<()> {
        let session = Session {
            profile_id: profile.id.clone(),
            email: profile.email.clone(),
            signed_in_at: Utc::now(),
        };
        let data = serde_json::to_string(&session)?;
        self.store
            .save_slot(&self.store.config().session_key, &data)
    }
}
