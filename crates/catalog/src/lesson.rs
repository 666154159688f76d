use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hackerlearn_core::{ChapterId, DomainResult, Entity, LessonId, Sequenced, next_sequence};

use crate::validation::{NAME_LEN, OVERVIEW_LEN, require_len};
use crate::wire;

/// A lesson inside a chapter. Same shape as a chapter, scoped by `chapter_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub overview: String,
    pub sequence: u32,
    pub chapter_id: ChapterId,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub version: u64,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Lesson {
    type Id = LessonId;

    fn id(&self) -> &LessonId {
        &self.id
    }
}

impl Sequenced for Lesson {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLesson {
    pub name: String,
    pub overview: String,
    pub sequence: u32,
    pub chapter_id: ChapterId,
}

impl NewLesson {
    pub fn new(
        chapter_id: ChapterId,
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
            chapter_id,
        })
    }

    pub fn appended_to(
        chapter_id: ChapterId,
        name: impl Into<String>,
        overview: impl Into<String>,
        existing: &[Lesson],
    ) -> DomainResult<Self> {
        Self::new(chapter_id, name, overview, next_sequence(existing))
    }
}
