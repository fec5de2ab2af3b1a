//! Knowledge base entries. Owned and ranked entirely by the service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeCategory {
    Python,
    Ai,
    CourseInfo,
    InstructorInfo,
    General,
}

impl KnowledgeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            KnowledgeCategory::Python => "Python Programming",
            KnowledgeCategory::Ai => "Artificial Intelligence",
            KnowledgeCategory::CourseInfo => "Course Information",
            KnowledgeCategory::InstructorInfo => "Instructor Information",
            KnowledgeCategory::General => "General",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: KnowledgeCategory,
    /// Comma-separated keywords.
    #[serde(default)]
    pub keywords: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_active: bool,
    /// Higher priority entries are preferred by the service.
    #[serde(default)]
    pub priority: i32,
}

impl KnowledgeEntry {
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Body for adding a knowledge entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKnowledgeEntry {
    pub title: String,
    pub content: String,
    pub category: KnowledgeCategory,
    pub keywords: String,
    pub priority: i32,
    pub is_active: bool,
}

impl NewKnowledgeEntry {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: KnowledgeCategory,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            keywords: String::new(),
            priority: 0,
            is_active: true,
        }
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
