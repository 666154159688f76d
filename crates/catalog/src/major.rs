use serde::{Deserialize, Serialize};

use hackerlearn_core::{DomainResult, Entity, MajorId};

use crate::validation::require_non_blank;
use crate::wire;

/// A field of study grouping courses, as served by the major service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    pub id: MajorId,
    pub name: String,
    #[serde(rename = "image7x4Url", default, deserialize_with = "wire::null_default")]
    pub image_7x4_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entity for Major {
    type Id = MajorId;

    fn id(&self) -> &MajorId {
        &self.id
    }
}

/// Body for creating or renaming a major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMajor {
    pub name: String,
    #[serde(rename = "image7x4Url")]
    pub image_7x4_url: String,
}

impl NewMajor {
    pub fn new(name: impl Into<String>, image_7x4_url: impl Into<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        require_non_blank("name", &name)?;
        Ok(Self {
            name,
            image_7x4_url: image_7x4_url.into(),
        })
    }
}

/// Body for `PUT /major/update/description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorDescription {
    pub id: MajorId,
    pub description: String,
}

impl MajorDescription {
    /// Line endings are normalized to `\n`; the text is otherwise kept as written.
    pub fn new(id: MajorId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into().replace("\r\n", "\n"),
        }
    }
}
