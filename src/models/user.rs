//! User records and their API projection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user (used in rosters, matches, and lookups).
pub type UserId = Uuid;

/// Player-facing profile fields. Everything except the name is optional.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    pub age: Option<u32>,
    pub position: Option<String>,
    pub image_url: Option<String>,
    /// School year or grade, free-form.
    pub year: Option<String>,
    pub mobile: Option<String>,
}

/// A registered user. The birthdate doubles as the login credential and is
/// therefore never serialized; responses go through [`UserView`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: UserId,
    /// Stored lowercased; uniqueness and login lookup are case-insensitive.
    pub email: String,
    /// YYYY-MM-DD string, compared by exact string equality at login.
    pub dob: String,
    pub profile: PlayerProfile,
}

impl User {
    /// Create a new user with a fresh profile (only the name filled in).
    pub fn new(email: impl Into<String>, dob: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            dob: dob.into(),
            profile: PlayerProfile {
                name: name.into(),
                ..PlayerProfile::default()
            },
        }
    }

    /// Projection for API responses (excludes the birthdate).
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
            profile: self.profile.clone(),
        }
    }

    /// Apply a partial profile update. Absent fields are left untouched.
    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            if !name.trim().is_empty() {
                self.profile.name = name.trim().to_string();
            }
        }
        if let Some(age) = update.age {
            self.profile.age = Some(age);
        }
        if let Some(position) = &update.position {
            self.profile.position = Some(position.clone());
        }
        if let Some(image_url) = &update.image_url {
            self.profile.image_url = Some(image_url.clone());
        }
        if let Some(year) = &update.year {
            self.profile.year = Some(year.clone());
        }
        if let Some(mobile) = &update.mobile {
            self.profile.mobile = Some(mobile.clone());
        }
    }
}

/// What other users (and the owner) see of a user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub profile: PlayerProfile,
}

/// Partial profile update body: only provided fields are written.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub position: Option<String>,
    pub image_url: Option<String>,
    pub year: Option<String>,
    pub mobile: Option<String>,
}
