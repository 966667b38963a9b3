//! Domain library for the Mentora marketplace
//!
//! This crate holds the logic shared by the API and the client: the nested
//! curriculum editor, catalog filtering, assessment grading, reward tiers and
//! the registration payload. It performs no I/O.

pub mod assessment;
pub mod curriculum;
pub mod normalization;
pub mod program;
pub mod registration;
pub mod tiers;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use curriculum::{Curriculum, Module, ModulePatch, Topic, TopicPatch, TopicType};
pub use program::{
    NewProgram, ProgramDetail, ProgramLevel, ProgramQuery, ProgramSort, ProgramStatus,
    ProgramSummary,
};
pub use registration::{MenteeRegistration, MentorRegistration};
pub use tiers::{MentorStats, Tier, TierProgress};

/// Returned when a stored string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    /// Name of the enum being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Marketplace roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Mentee,
    Mentor,
    Trainer,
    Admin,
}

impl Role {
    /// Lowercase name stored in the database and in token claims
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mentee => "mentee",
            Self::Mentor => "mentor",
            Self::Trainer => "trainer",
            Self::Admin => "admin",
        }
    }

    /// Roles allowed to author curricula.
    pub const fn can_author(self) -> bool {
        matches!(self, Self::Mentor | Self::Trainer | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentee" => Ok(Self::Mentee),
            "mentor" => Ok(Self::Mentor),
            "trainer" => Ok(Self::Trainer),
            "admin" => Ok(Self::Admin),
            other => Err(ParseEnumError::new("role", other)),
        }
    }
}
