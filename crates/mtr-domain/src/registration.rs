//! Sign-up payloads shared by the client and the API.
//!
//! Mentees register through the onboarding wizard. Mentors and trainers
//! register with a shorter form. In both cases only the personal fields are
//! required by the server and the rest default to empty strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Role;

/// Flattened mentee onboarding payload sent to `POST /mentees/register`
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenteeRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub learning_goals: String,
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub availability: String,
}

impl MenteeRegistration {
    /// Interests are entered as a comma separated list
    pub fn interest_list(&self) -> Vec<String> {
        self.interests
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Debug for MenteeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenteeRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("experience_level", &self.experience_level)
            .finish_non_exhaustive()
    }
}

/// Sign-up payload for program authors, sent to `POST /mentors/register`
///
/// Only mentors and trainers may register themselves. Admin accounts are
/// provisioned out of band.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_author_role")]
    pub role: Role,
    /// Short public tagline shown with the mentor's programs
    #[serde(default)]
    pub headline: String,
}

const fn default_author_role() -> Role {
    Role::Mentor
}

impl Default for MentorRegistration {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            role: default_author_role(),
            headline: String::new(),
        }
    }
}

impl fmt::Debug for MentorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentorRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
