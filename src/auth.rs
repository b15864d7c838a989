use crate::database::Database;
use crate::error::StorageError;
use chrono::{DateTime, SubsecRound, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// The signed-in account; mocked, nothing is verified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub has_premium: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Where a refused caller should be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Pricing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("faça login para jogar")]
    LoginRequired,
    #[error("ative o acesso premium para jogar")]
    PremiumRequired,
}

impl AccessDenied {
    pub fn redirect(&self) -> Redirect {
        match self {
            AccessDenied::LoginRequired => Redirect::Login,
            AccessDenied::PremiumRequired => Redirect::Pricing,
        }
    }
}

/// Identity and entitlement context, built once and handed to whoever needs it
///
/// Every change is written to the `currentUser` record before it is applied,
/// so a failed write leaves the gate as it was.
pub struct AccessGate {
    db: Arc<Database>,
    user: Option<User>,
}

impl AccessGate {
    pub fn load(db: Arc<Database>) -> Result<Self, StorageError> {
        let user = db.load_current_user()?;
        Ok(AccessGate { db, user })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn has_entitlement(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.has_premium)
    }

    pub fn require_entitlement(&self) -> Result<&User, AccessDenied> {
        match &self.user {
            None => Err(AccessDenied::LoginRequired),
            Some(user) if !user.has_premium => Err(AccessDenied::PremiumRequired),
            Some(user) => Ok(user),
        }
    }

    /// Any credentials are accepted; the display name is the email's local part
    pub fn login(&mut self, credentials: &Credentials) -> Result<&User, StorageError> {
        let name = credentials
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        self.sign_in(name, &credentials.email)
    }

    pub fn register(&mut self, name: &str, email: &str, _password: &str) -> Result<&User, StorageError> {
        self.sign_in(name.trim().to_string(), email)
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.db.save_current_user(None)?;
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.email);
        }
        Ok(())
    }

    /// Grants premium to the signed-in user; no-op when signed out
    pub fn activate_premium(&mut self) -> Result<(), StorageError> {
        let Some(current) = &self.user else {
            return Ok(());
        };
        let upgraded = User {
            has_premium: true,
            ..current.clone()
        };
        self.db.save_current_user(Some(&upgraded))?;
        info!("Premium activated for {}", upgraded.email);
        self.user = Some(upgraded);
        Ok(())
    }

    fn sign_in(&mut self, name: String, email: &str) -> Result<&User, StorageError> {
        let user = User {
            id: Uuid::new_v4(),
            name,
            email: email.to_string(),
            has_premium: false,
            created_at: self.db.get_current_time().trunc_subsecs(3),
        };
        self.db.save_current_user(Some(&user))?;
        info!("Signed in {}", user.email);
        Ok(self.user.insert(user))
    }
}
