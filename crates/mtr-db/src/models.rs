use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Login lookup row
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Public account details
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Onboarding answers stored alongside a new mentee account
#[derive(Debug, Clone)]
pub struct MenteeProfileInsert {
    pub user_id: Uuid,
    pub phone: String,
    pub education_level: String,
    pub occupation: String,
    pub experience_level: String,
    pub learning_goals: String,
    pub interests: Vec<String>,
    pub availability: String,
}

/// Catalog row joined with the mentor's name and enrollment count
#[derive(Debug, Clone, FromRow)]
pub struct ProgramRow {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentor_name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price_cents: i64,
    pub currency: String,
    pub status: String,
    pub rating: f64,
    pub enrolled_count: i64,
    pub duration_weeks: i32,
    pub created_at: DateTime<Utc>,
}

/// New program owned by `mentor_id`
#[derive(Debug, Clone)]
pub struct ProgramInsert {
    pub mentor_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub price_cents: i64,
    pub currency: String,
    pub status: String,
    pub duration_weeks: i32,
}

/// Minimal program info for authorization checks
#[derive(Debug, Clone, FromRow)]
pub struct ProgramOwnership {
    pub mentor_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct ModuleRow {
    pub id: Uuid,
    pub program_id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TopicRow {
    pub id: Uuid,
    pub module_id: Uuid,
    pub position: i32,
    pub title: String,
    pub topic_type: String,
    pub duration_minutes: i32,
    pub is_published: bool,
    pub description: String,
}

/// Module to insert when a curriculum is replaced
#[derive(Debug, Clone)]
pub struct ModuleInsert {
    pub id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub topics: Vec<TopicInsert>,
}

#[derive(Debug, Clone)]
pub struct TopicInsert {
    pub id: Uuid,
    pub position: i32,
    pub title: String,
    pub topic_type: String,
    pub duration_minutes: i32,
    pub is_published: bool,
    pub description: String,
}

/// Aggregated inputs for a mentor's reward tier
#[derive(Debug, Clone, FromRow)]
pub struct MentorStatsRow {
    pub sessions_completed: i32,
    pub average_rating: f64,
    pub programs_created: i64,
}
