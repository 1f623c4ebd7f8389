//! # User Profile Repository
//!
//! Profiles carry the role that drives permissions and visibility. The
//! self-delete guard lives in the backoffice session, which knows who is
//! acting.

use tracing::debug;

use multiluz_core::UserProfile;

use crate::error::StoreResult;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    table: Table<UserProfile>,
}

impl ProfileRepository {
    pub fn new(table: Table<UserProfile>) -> Self {
        ProfileRepository { table }
    }

    pub fn list(&self) -> Vec<UserProfile> {
        self.table.list()
    }

    pub fn get(&self, id: &str) -> StoreResult<UserProfile> {
        self.table.get(id)
    }

    /// Case-insensitive e-mail lookup.
    pub fn find_by_email(&self, email: &str) -> Option<UserProfile> {
        self.table.with_rows(|rows| {
            rows.iter()
                .find(|p| p.email.eq_ignore_ascii_case(email.trim()))
                .cloned()
        })
    }

    /// The first profile, used as the acting user at startup.
    pub fn first(&self) -> Option<UserProfile> {
        self.table.with_rows(|rows| rows.first().cloned())
    }

    pub fn create(&self, profile: UserProfile) -> UserProfile {
        let created = self.table.create(profile);
        debug!(profile_id = %created.id, role = %created.role, "Profile created");
        created
    }

    pub fn update(&self, profile: UserProfile) -> StoreResult<UserProfile> {
        let updated = self.table.update(profile)?;
        debug!(profile_id = %updated.id, role = %updated.role, "Profile updated");
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> StoreResult<UserProfile> {
        let removed = self.table.delete(id)?;
        debug!(profile_id = %id, "Profile deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiluz_core::UserRole;

    fn profile(name: &str, email: &str, role: UserRole) -> UserProfile {
        UserProfile {
            id: String::new(),
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    #[test]
    fn test_first_and_email_lookup() {
        let repo = ProfileRepository::new(Table::new());
        assert!(repo.first().is_none());

        repo.create(profile("Ana Costa", "ana.costa@multiluz.com", UserRole::Admin));
        repo.create(profile("Carlos Lima", "carlos.lima@multiluz.com", UserRole::Manager));

        assert_eq!(repo.first().map(|p| p.id), Some("USR-001".to_string()));
        assert_eq!(
            repo.find_by_email(" Carlos.Lima@multiluz.com ").map(|p| p.role),
            Some(UserRole::Manager)
        );
    }
}
