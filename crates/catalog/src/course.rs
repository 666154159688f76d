use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hackerlearn_core::{CourseId, DomainError, DomainResult, Entity};

use crate::validation::{require_non_blank, strip_blank};
use crate::wire;

/// Course row as listed and searched through the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub level: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub duration: u32,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub enrolled_students: u32,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub status: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub requirements_course_id: Option<String>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Course {
    type Id = CourseId;

    fn id(&self) -> &CourseId {
        &self.id
    }
}

/// Body for `POST /course`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub name: String,
    pub overview: String,
    pub level: String,
    pub duration: u32,
    pub price: f64,
    pub status: String,
    pub image_url: String,
    pub requirements_course_id: String,
}

impl Default for NewCourse {
    fn default() -> Self {
        Self {
            name: String::new(),
            overview: String::new(),
            level: "Beginner".to_string(),
            duration: 30,
            price: 100.0,
            status: "active".to_string(),
            image_url: String::new(),
            requirements_course_id: String::new(),
        }
    }
}

impl NewCourse {
    /// A course with the default level, duration, price and status.
    pub fn new(name: impl Into<String>, overview: impl Into<String>) -> DomainResult<Self> {
        let course = Self {
            name: name.into(),
            overview: overview.into(),
            ..Self::default()
        };
        course.validate()?;
        Ok(course)
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("overview", &self.overview)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("price", "must be a non-negative number"));
        }
        Ok(())
    }
}

/// Body for the gateway's `/course/update?id=` single-field edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseFieldUpdate {
    pub key: String,
    pub value: Value,
}

impl CourseFieldUpdate {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> DomainResult<Self> {
        let key = key.into();
        require_non_blank("key", &key)?;
        Ok(Self {
            key,
            value: value.into(),
        })
    }
}

/// Course detail as served by the major service (camelCase, richer than [`Course`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: CourseId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub objectives: Vec<String>,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub duration: u32,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub price: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub language: Vec<String>,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub status: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub level: String,
    #[serde(rename = "image7x4Url", default)]
    pub image_7x4_url: Option<String>,
    #[serde(rename = "image1x1Url", default)]
    pub image_1x1_url: Option<String>,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub version: u64,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for CourseDetail {
    type Id = CourseId;

    fn id(&self) -> &CourseId {
        &self.id
    }
}

/// Course card from the major service's `/course/all` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(alias = "id")]
    pub course_id: CourseId,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub level: String,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub price: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "wire::null_default")]
    pub enrolled_students: u32,
    #[serde(rename = "image1x1Url", default)]
    pub image_1x1_url: Option<String>,
}

impl Entity for CourseSummary {
    type Id = CourseId;

    fn id(&self) -> &CourseId {
        &self.course_id
    }
}

/// Body for the major service's `POST /course/create`.
///
/// A blank `requirements_course_id` is sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseDetail {
    pub name: String,
    pub overview: String,
    pub objectives: Vec<String>,
    #[serde(
        serialize_with = "wire::blank_as_null",
        deserialize_with = "wire::null_default",
        default
    )]
    pub requirements_course_id: String,
    pub level: String,
    pub duration: u32,
    pub price: f64,
    pub start_date: String,
    pub end_date: String,
    pub language: Vec<String>,
    pub status: String,
    #[serde(rename = "image7x4Url")]
    pub image_7x4_url: String,
    #[serde(rename = "image1x1Url")]
    pub image_1x1_url: String,
}

impl Default for NewCourseDetail {
    fn default() -> Self {
        Self {
            name: String::new(),
            overview: String::new(),
            objectives: Vec::new(),
            requirements_course_id: String::new(),
            level: String::new(),
            duration: 0,
            price: 0.0,
            start_date: String::new(),
            end_date: String::new(),
            language: Vec::new(),
            status: "DRAFT".to_string(),
            image_7x4_url: String::new(),
            image_1x1_url: String::new(),
        }
    }
}

impl NewCourseDetail {
    /// A draft course; everything but name and overview starts empty.
    pub fn new(name: impl Into<String>, overview: impl Into<String>) -> DomainResult<Self> {
        let course = Self {
            name: name.into(),
            overview: overview.into(),
            ..Self::default()
        };
        course.validate()?;
        Ok(course)
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("name", &self.name)?;
        require_non_blank("overview", &self.overview)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation("price", "must be a non-negative number"));
        }
        Ok(())
    }

    /// Validated copy with blank objective and language entries dropped.
    pub fn normalized(mut self) -> DomainResult<Self> {
        self.validate()?;
        self.objectives = strip_blank(self.objectives);
        self.language = strip_blank(self.language);
        Ok(self)
    }
}

/// Edit of one course-detail field: `PUT /course/update/{field}` with
/// `{ courseId, <field>: value }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetailUpdate {
    course_id: CourseId,
    field: String,
    value: Value,
}

impl CourseDetailUpdate {
    /// `field` becomes a path segment, so it must be a plain identifier.
    pub fn new(course_id: CourseId, field: impl Into<String>, value: impl Into<Value>) -> DomainResult<Self> {
        let field = field.into();
        require_non_blank("field", &field)?;
        if !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::validation(
                "field",
                format!("'{field}' is not a plain field name"),
            ));
        }
        if field == "courseId" {
            return Err(DomainError::validation("field", "courseId cannot be updated"));
        }
        Ok(Self {
            course_id,
            field,
            value: value.into(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn path(&self) -> String {
        format!("/course/update/{}", self.field)
    }

    pub fn body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("courseId".into(), Value::String(self.course_id.to_string()));
        body.insert(self.field.clone(), self.value.clone());
        body
    }
}
