use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::prelude::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "tag_category", rename_all = "lowercase")]
pub enum TagCategory {
    Role,
    Technology,
    Skill,
    Methodology,
    Tool,
}

impl TagCategory {
    pub const ALL: [TagCategory; 5] = [
        TagCategory::Role,
        TagCategory::Technology,
        TagCategory::Skill,
        TagCategory::Methodology,
        TagCategory::Tool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Role => "role",
            TagCategory::Technology => "technology",
            TagCategory::Skill => "skill",
            TagCategory::Methodology => "methodology",
            TagCategory::Tool => "tool",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagCategory {
    type Err = AppError;

    /// Exact, lowercase match against the enumeration values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TagEntry {
    pub id: i32,
    pub name: String,
    pub category: TagCategory,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
}
