use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hackerlearn_core::{ChapterId, CourseId, DomainResult, Entity, Sequenced, next_sequence};

use crate::validation::{NAME_LEN, OVERVIEW_LEN, require_len};
use crate::wire;

/// A chapter inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub overview: String,
    pub sequence: u32,
    pub course_id: CourseId,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub version: u64,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Chapter {
    type Id = ChapterId;

    fn id(&self) -> &ChapterId {
        &self.id
    }
}

impl Sequenced for Chapter {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

/// Body for creating a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChapter {
    pub name: String,
    pub overview: String,
    pub sequence: u32,
    pub course_id: CourseId,
}

impl NewChapter {
    /// Validate and trim the name and overview.
    pub fn new(
        course_id: CourseId,
        name: impl Into<String>,
        overview: impl Into<String>,
        sequence: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        let overview = overview.into();
        require_len("name", &name, NAME_LEN)?;
        require_len("overview", &overview, OVERVIEW_LEN)?;
        Ok(Self {
            name: name.trim().to_string(),
            overview: overview.trim().to_string(),
            sequence,
            course_id,
        })
    }

    /// A chapter placed after every chapter in `existing`.
    pub fn appended_to(
        course_id: CourseId,
        name: impl Into<String>,
        overview: impl Into<String>,
        existing: &[Chapter],
    ) -> DomainResult<Self> {
        Self::new(course_id, name, overview, next_sequence(existing))
    }
}
