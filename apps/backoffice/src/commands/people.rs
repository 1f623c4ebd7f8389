//! # Salesperson & Profile Commands

use tracing::info;

use multiluz_core::validation::{validate_profile, validate_salesperson};
use multiluz_core::{Salesperson, UserProfile};

use crate::commands::Backoffice;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::permissions::Action;

impl Backoffice {
    // =========================================================================
    // Salespeople
    // =========================================================================

    pub fn salespeople(&self) -> ApiResult<Vec<Salesperson>> {
        self.require(Action::ManageSalespeople)?;
        Ok(self.store().salespeople().list())
    }

    /// Adds a salesperson. Orders credit consultants by name, so names are
    /// unique.
    pub fn create_salesperson(&self, salesperson: Salesperson) -> ApiResult<Salesperson> {
        self.require(Action::ManageSalespeople)?;
        validate_salesperson(&salesperson)?;
        if self.store().salespeople().find_by_name(&salesperson.name).is_some() {
            return Err(ApiError::new(
                ErrorCode::Duplicate,
                format!("Salesperson '{}' already exists", salesperson.name.trim()),
            ));
        }

        let created = self.store().salespeople().create(salesperson);
        info!(salesperson_id = %created.id, name = %created.name, "Salesperson created");
        Ok(created)
    }

    pub fn update_salesperson(&self, salesperson: Salesperson) -> ApiResult<Salesperson> {
        self.require(Action::ManageSalespeople)?;
        validate_salesperson(&salesperson)?;
        if let Some(other) = self.store().salespeople().find_by_name(&salesperson.name) {
            if other.id != salesperson.id {
                return Err(ApiError::new(
                    ErrorCode::Duplicate,
                    format!("Salesperson '{}' already exists", other.name),
                ));
            }
        }

        Ok(self.store().salespeople().update(salesperson)?)
    }

    pub fn delete_salesperson(&self, salesperson_id: &str) -> ApiResult<Salesperson> {
        self.require(Action::ManageSalespeople)?;
        let removed = self.store().salespeople().delete(salesperson_id)?;
        info!(salesperson_id = %salesperson_id, "Salesperson deleted");
        Ok(removed)
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    pub fn profiles(&self) -> ApiResult<Vec<UserProfile>> {
        self.require(Action::ManageProfiles)?;
        Ok(self.store().profiles().list())
    }

    pub fn create_profile(&self, profile: UserProfile) -> ApiResult<UserProfile> {
        self.require(Action::ManageProfiles)?;
        validate_profile(&profile)?;
        self.ensure_email_free(&profile)?;

        let created = self.store().profiles().create(profile);
        info!(profile_id = %created.id, role = %created.role, "Profile created");
        Ok(created)
    }

    /// Updates a profile. Editing the acting user's own profile takes
    /// effect on the session immediately.
    pub fn update_profile(&self, profile: UserProfile) -> ApiResult<UserProfile> {
        self.require(Action::ManageProfiles)?;
        validate_profile(&profile)?;
        self.ensure_email_free(&profile)?;

        let updated = self.store().profiles().update(profile)?;
        self.session_state().with_session_mut(|s| {
            if s.is_acting_as(&updated.id) {
                s.refresh_user(&updated);
            }
        });
        Ok(updated)
    }

    /// Deletes a profile other than the acting user's own.
    pub fn delete_profile(&self, profile_id: &str) -> ApiResult<UserProfile> {
        self.require(Action::ManageProfiles)?;
        if self.session_state().with_session(|s| s.is_acting_as(profile_id)) {
            return Err(ApiError::self_delete());
        }

        let removed = self.store().profiles().delete(profile_id)?;
        info!(profile_id = %profile_id, "Profile deleted");
        Ok(removed)
    }

    fn ensure_email_free(&self, profile: &UserProfile) -> ApiResult<()> {
        match self.store().profiles().find_by_email(&profile.email) {
            Some(other) if other.id != profile.id => Err(ApiError::new(
                ErrorCode::Duplicate,
                format!("E-mail '{}' is already in use", other.email),
            )),
            _ => Ok(()),
        }
    }
}
