//! Conversions between stored program rows and catalog types.

use std::collections::HashMap;

use mtr_db::models::{ModuleInsert, ModuleRow, ProgramInsert, ProgramRow, TopicInsert, TopicRow};
use mtr_domain::{Curriculum, Module, NewProgram, ProgramSummary, Topic};
use uuid::Uuid;

use crate::error::ApiError;

pub fn summary_from_row(row: ProgramRow) -> Result<ProgramSummary, ApiError> {
    Ok(ProgramSummary {
        id: row.id,
        mentor_id: row.mentor_id,
        mentor_name: row.mentor_name,
        title: row.title,
        description: row.description,
        category: row.category,
        level: row.level.parse()?,
        price_cents: row.price_cents,
        currency: row.currency,
        status: row.status.parse()?,
        rating: row.rating,
        enrolled_count: row.enrolled_count,
        duration_weeks: row.duration_weeks,
        created_at: row.created_at,
    })
}

/// Trimmed insert for a validated [`NewProgram`] owned by `mentor_id`
pub fn program_insert(mentor_id: Uuid, program: NewProgram) -> ProgramInsert {
    ProgramInsert {
        mentor_id,
        title: program.title.trim().to_string(),
        description: program.description.trim().to_string(),
        category: program.category.trim().to_string(),
        level: program.level.as_str().to_string(),
        price_cents: program.price_cents,
        currency: program.currency.trim().to_string(),
        status: program.status.as_str().to_string(),
        duration_weeks: program.duration_weeks,
    }
}

/// Rebuild a curriculum from module rows and their topic rows
///
/// Topics must arrive ordered by position; modules are ordered by
/// [`Curriculum::from_modules`].
pub fn curriculum_from_rows(
    modules: Vec<ModuleRow>,
    topics: Vec<TopicRow>,
) -> Result<Curriculum, ApiError> {
    let mut topics_by_module: HashMap<Uuid, Vec<Topic>> = HashMap::new();
    for row in topics {
        let duration_minutes = u32::try_from(row.duration_minutes).map_err(|_| {
            ApiError::Internal(format!(
                "topic {} has negative duration {}",
                row.id, row.duration_minutes
            ))
        })?;
        topics_by_module.entry(row.module_id).or_default().push(Topic {
            id: row.id,
            title: row.title,
            topic_type: row.topic_type.parse()?,
            duration_minutes,
            is_published: row.is_published,
            description: row.description,
        });
    }

    let modules = modules
        .into_iter()
        .map(|row| Module {
            topics: topics_by_module.remove(&row.id).unwrap_or_default(),
            id: row.id,
            title: row.title,
            description: row.description,
            order: u32::try_from(row.position).unwrap_or(0),
            learning_objectives: row.learning_objectives,
        })
        .collect();

    Ok(Curriculum::from_modules(modules))
}

fn position(index: usize) -> Result<i32, ApiError> {
    i32::try_from(index + 1)
        .map_err(|_| ApiError::Validation("Curriculum has too many entries".to_string()))
}

/// Flatten a curriculum into rows, numbering positions from 1 in list order
pub fn module_inserts(curriculum: &Curriculum) -> Result<Vec<ModuleInsert>, ApiError> {
    curriculum
        .modules()
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let topics = module
                .topics
                .iter()
                .enumerate()
                .map(|(topic_index, topic)| {
                    Ok(TopicInsert {
                        id: topic.id,
                        position: position(topic_index)?,
                        title: topic.title.trim().to_string(),
                        topic_type: topic.topic_type.as_str().to_string(),
                        duration_minutes: i32::try_from(topic.duration_minutes).map_err(|_| {
                            ApiError::Validation(format!(
                                "Topic '{}' has an unrealistic duration",
                                topic.title.trim()
                            ))
                        })?,
                        is_published: topic.is_published,
                        description: topic.description.clone(),
                    })
                })
                .collect::<Result<Vec<_>, ApiError>>()?;

            Ok(ModuleInsert {
                id: module.id,
                position: position(index)?,
                title: module.title.trim().to_string(),
                description: module.description.clone(),
                learning_objectives: module.learning_objectives.clone(),
                topics,
            })
        })
        .collect()
}
