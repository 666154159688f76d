//! `hackerlearn-core`: shared building blocks for the admin client.
//!
//! This crate contains **pure** primitives (no IO, no HTTP): identifiers,
//! the domain error model and the entity/sequence traits used by the catalog.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, Sequenced, next_sequence};
pub use error::{DomainError, DomainResult};
pub use id::{ChapterId, ContentId, CourseId, FlashcardId, FlashcardSequenceId, LessonId, MajorId};
