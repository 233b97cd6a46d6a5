use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, DUPLICATE_ACCOUNT};
use crate::repos::{CredentialStore, ProfileUpdate, RepoError};
use crate::services::auth::UserProfile;
use crate::services::{internal, validation};

/// Editable profile fields. The password is not changed here.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl ProfileChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::name("first_name", &self.first_name)?;
        validation::name("last_name", &self.last_name)?;
        validation::email(&self.email)?;
        validation::username(&self.username)
    }
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn CredentialStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn CredentialStore>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, caller_id: i64) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(caller_id)
            .await
            .map_err(|e| internal(e, "failed to fetch user"))?
            .map(|row| UserProfile::from(&row))
            .ok_or_else(|| AppError::not_found("user"))
    }

    /// Tokens already issued keep the old snapshot until the next login.
    pub async fn update_profile(
        &self,
        caller_id: i64,
        changes: ProfileChanges,
    ) -> Result<UserProfile, AppError> {
        changes.validate()?;

        let update = ProfileUpdate {
            first_name: changes.first_name,
            last_name: changes.last_name,
            username: changes.username,
            email: changes.email,
        };

        let row = self
            .users
            .update_profile(caller_id, &update)
            .await
            .map_err(|e| match e {
                RepoError::Conflict => AppError::Conflict(DUPLICATE_ACCOUNT),
                other => internal(other, "failed to update user"),
            })?
            .ok_or_else(|| AppError::not_found("user"))?;

        info!(user_id = caller_id, "profile updated");
        Ok(UserProfile::from(&row))
    }
}
