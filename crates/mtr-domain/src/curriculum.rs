//! Nested curriculum editor.
//!
//! A curriculum is an ordered list of modules, each holding an ordered list of
//! topics. Every record is keyed by a generated UUID. Edits are synchronous and
//! never fail: operations on an unknown id report that nothing matched instead
//! of erroring. Consistency checks are only run on demand through
//! [`Curriculum::issues`].

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ParseEnumError;

/// Kind of content a topic delivers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicType {
    #[default]
    Video,
    Document,
    Assignment,
    Quiz,
    LiveSession,
    Discussion,
    Project,
}

impl TopicType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
            Self::Assignment => "assignment",
            Self::Quiz => "quiz",
            Self::LiveSession => "live_session",
            Self::Discussion => "discussion",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for TopicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(Self::Video),
            "document" => Ok(Self::Document),
            "assignment" => Ok(Self::Assignment),
            "quiz" => Ok(Self::Quiz),
            "live_session" => Ok(Self::LiveSession),
            "discussion" => Ok(Self::Discussion),
            "project" => Ok(Self::Project),
            other => Err(ParseEnumError::new("topic type", other)),
        }
    }
}

/// Lesson within a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub topic_type: TopicType,
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub description: String,
}

impl Topic {
    fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            topic_type: TopicType::default(),
            duration_minutes: 0,
            is_published: false,
            description: String::new(),
        }
    }
}

/// Course section grouping topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 1-based position within the curriculum
    pub order: u32,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub learning_objectives: Vec<String>,
}

impl Module {
    fn blank(order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            order,
            topics: Vec::new(),
            learning_objectives: Vec::new(),
        }
    }

    /// Sum of this module's topic durations, in minutes
    pub fn duration(&self) -> u64 {
        self.topics.iter().map(|t| u64::from(t.duration_minutes)).sum()
    }
}

/// Shallow update for a module; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub learning_objectives: Option<Vec<String>>,
}

/// Shallow update for a topic; `None` leaves the field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub topic_type: Option<TopicType>,
    pub duration_minutes: Option<u32>,
    pub is_published: Option<bool>,
    pub description: Option<String>,
}

/// Problem found by [`Curriculum::issues`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurriculumIssue {
    DuplicateModuleId(Uuid),
    DuplicateTopicId(Uuid),
    BlankModuleTitle { module: Uuid },
    BlankTopicTitle { module: Uuid, topic: Uuid },
}

impl fmt::Display for CurriculumIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateModuleId(id) => write!(f, "module id {id} is used more than once"),
            Self::DuplicateTopicId(id) => write!(f, "topic id {id} is used more than once"),
            Self::BlankModuleTitle { module } => write!(f, "module {module} has no title"),
            Self::BlankTopicTitle { module, topic } => {
                write!(f, "topic {topic} in module {module} has no title")
            }
        }
    }
}

/// Ordered modules and their topics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    modules: Vec<Module>,
}

impl Curriculum {
    /// Empty curriculum
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing modules, sorting by their stored order and renumbering
    pub fn from_modules(mut modules: Vec<Module>) -> Self {
        modules.sort_by_key(|m| m.order);
        let mut curriculum = Self { modules };
        curriculum.renumber();
        curriculum
    }

    /// Modules in display order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn into_modules(self) -> Vec<Module> {
        self.modules
    }

    /// Look up a module by id
    pub fn module(&self, id: Uuid) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Append an empty module and return its id
    pub fn add_module(&mut self) -> Uuid {
        let module = Module::blank(self.next_order());
        let id = module.id;
        self.modules.push(module);
        id
    }

    /// Apply `patch` to the matching module. Returns `false` if no module matched.
    pub fn update_module(&mut self, id: Uuid, patch: ModulePatch) -> bool {
        let Some(module) = self.module_mut(id) else {
            return false;
        };

        if let Some(title) = patch.title {
            module.title = title;
        }
        if let Some(description) = patch.description {
            module.description = description;
        }
        if let Some(objectives) = patch.learning_objectives {
            module.learning_objectives = objectives;
        }
        true
    }

    /// Remove a module together with its topics
    pub fn remove_module(&mut self, id: Uuid) -> Option<Module> {
        let index = self.modules.iter().position(|m| m.id == id)?;
        let removed = self.modules.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Move a module to `index`, clamped to the end of the list
    pub fn move_module(&mut self, id: Uuid, index: usize) -> bool {
        let Some(from) = self.modules.iter().position(|m| m.id == id) else {
            return false;
        };
        let module = self.modules.remove(from);
        let to = index.min(self.modules.len());
        self.modules.insert(to, module);
        self.renumber();
        true
    }

    /// Append an empty topic to a module and return its id
    pub fn add_topic(&mut self, module_id: Uuid) -> Option<Uuid> {
        let module = self.module_mut(module_id)?;
        let topic = Topic::blank();
        let id = topic.id;
        module.topics.push(topic);
        Some(id)
    }

    pub fn update_topic(&mut self, module_id: Uuid, topic_id: Uuid, patch: TopicPatch) -> bool {
        let Some(topic) = self
            .module_mut(module_id)
            .and_then(|m| m.topics.iter_mut().find(|t| t.id == topic_id))
        else {
            return false;
        };

        if let Some(title) = patch.title {
            topic.title = title;
        }
        if let Some(topic_type) = patch.topic_type {
            topic.topic_type = topic_type;
        }
        if let Some(duration) = patch.duration_minutes {
            topic.duration_minutes = duration;
        }
        if let Some(published) = patch.is_published {
            topic.is_published = published;
        }
        if let Some(description) = patch.description {
            topic.description = description;
        }
        true
    }

    pub fn remove_topic(&mut self, module_id: Uuid, topic_id: Uuid) -> Option<Topic> {
        let module = self.module_mut(module_id)?;
        let index = module.topics.iter().position(|t| t.id == topic_id)?;
        Some(module.topics.remove(index))
    }

    /// Sum of every topic duration across all modules, in minutes
    pub fn total_duration(&self) -> u64 {
        self.modules.iter().map(Module::duration).sum()
    }

    pub fn topic_count(&self) -> usize {
        self.modules.iter().map(|m| m.topics.len()).sum()
    }

    pub fn published_topic_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| &m.topics)
            .filter(|t| t.is_published)
            .count()
    }

    /// Consistency problems that must be fixed before the curriculum is stored
    pub fn issues(&self) -> Vec<CurriculumIssue> {
        let mut issues = Vec::new();
        let mut module_ids = HashSet::new();
        let mut topic_ids = HashSet::new();

        for module in &self.modules {
            if !module_ids.insert(module.id) {
                issues.push(CurriculumIssue::DuplicateModuleId(module.id));
            }
            if module.title.trim().is_empty() {
                issues.push(CurriculumIssue::BlankModuleTitle { module: module.id });
            }
            for topic in &module.topics {
                if !topic_ids.insert(topic.id) {
                    issues.push(CurriculumIssue::DuplicateTopicId(topic.id));
                }
                if topic.title.trim().is_empty() {
                    issues.push(CurriculumIssue::BlankTopicTitle {
                        module: module.id,
                        topic: topic.id,
                    });
                }
            }
        }

        issues
    }

    fn module_mut(&mut self, id: Uuid) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    fn next_order(&self) -> u32 {
        u32::try_from(self.modules.len()).unwrap_or(u32::MAX).saturating_add(1)
    }

    fn renumber(&mut self) {
        for (order, module) in (1u32..).zip(self.modules.iter_mut()) {
            module.order = order;
        }
    }
}
