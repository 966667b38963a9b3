//! Program catalog types and filtering.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ParseEnumError,
    curriculum::{Curriculum, Module},
    normalization::contains_normalized,
};

/// Category value that disables category filtering
pub const ALL_CATEGORIES: &str = "all";

/// Publication state of a program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ProgramStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(ParseEnumError::new("program status", other)),
        }
    }
}

/// Target experience level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ProgramLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for ProgramLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ParseEnumError::new("program level", other)),
        }
    }
}

/// Catalog entry for a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentor_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: ProgramLevel,
    pub price_cents: i64,
    pub currency: String,
    pub status: ProgramStatus,
    pub rating: f64,
    pub enrolled_count: i64,
    pub duration_weeks: i32,
    pub created_at: DateTime<Utc>,
}

/// Currency used when a new program does not name one
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Author-supplied fields for a new program
///
/// The mentor, rating, enrollment count and timestamps are assigned by the
/// server. Programs start as drafts unless a status is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProgram {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub level: ProgramLevel,
    #[serde(default)]
    pub price_cents: i64,
    /// ISO 4217 code
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: ProgramStatus,
    #[serde(default)]
    pub duration_weeks: i32,
}

impl NewProgram {
    /// Free beginner draft in the default currency
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            level: ProgramLevel::default(),
            price_cents: 0,
            currency: default_currency(),
            status: ProgramStatus::default(),
            duration_weeks: 0,
        }
    }
}

/// Program with its full curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetail {
    #[serde(flatten)]
    pub summary: ProgramSummary,
    pub modules: Vec<Module>,
    pub total_duration_minutes: u64,
}

impl ProgramDetail {
    pub fn new(summary: ProgramSummary, curriculum: Curriculum) -> Self {
        let total_duration_minutes = curriculum.total_duration();
        Self {
            summary,
            modules: curriculum.into_modules(),
            total_duration_minutes,
        }
    }
}

/// Catalog ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramSort {
    #[default]
    Newest,
    Popular,
    Rating,
    PriceAsc,
    PriceDesc,
    Title,
}

/// Search and filter controls for the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub level: Option<ProgramLevel>,
    pub status: Option<ProgramStatus>,
    pub max_price_cents: Option<i64>,
    #[serde(default)]
    pub sort: ProgramSort,
}

impl ProgramQuery {
    /// Whether a program passes every active filter
    pub fn matches(&self, program: &ProgramSummary) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|needle| {
            contains_normalized(&program.title, needle)
                || contains_normalized(&program.description, needle)
                || contains_normalized(&program.mentor_name, needle)
        });

        let matches_category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
            .is_none_or(|c| program.category.eq_ignore_ascii_case(c));

        let matches_level = self.level.is_none_or(|level| program.level == level);
        let matches_status = self.status.is_none_or(|status| program.status == status);
        let matches_price = self
            .max_price_cents
            .is_none_or(|max| program.price_cents <= max);

        matches_search && matches_category && matches_level && matches_status && matches_price
    }

    /// Filter then sort
    pub fn apply(&self, programs: Vec<ProgramSummary>) -> Vec<ProgramSummary> {
        let mut filtered: Vec<ProgramSummary> =
            programs.into_iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| self.compare(a, b));
        filtered
    }

    fn compare(&self, a: &ProgramSummary, b: &ProgramSummary) -> Ordering {
        match self.sort {
            ProgramSort::Newest => b.created_at.cmp(&a.created_at),
            ProgramSort::Popular => b.enrolled_count.cmp(&a.enrolled_count),
            ProgramSort::Rating => b.rating.total_cmp(&a.rating),
            ProgramSort::PriceAsc => a.price_cents.cmp(&b.price_cents),
            ProgramSort::PriceDesc => b.price_cents.cmp(&a.price_cents),
            ProgramSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }
}
