//! Catalog domain model for the learning-platform admin client.
//!
//! Typed read models for what the backends return (majors, courses, chapters,
//! lessons, flashcards, flashcard content) and validated write models for what
//! the admin side sends. Pure data and rules: no IO, no HTTP.

pub mod chapter;
pub mod content;
pub mod course;
pub mod flashcard;
pub mod lesson;
pub mod major;
mod validation;
mod wire;

pub use chapter::{Chapter, NewChapter};
pub use content::{Content, ContentType, TerminalKind};
pub use course::{
    Course, CourseDetail, CourseDetailUpdate, CourseFieldUpdate, CourseSummary, NewCourse,
    NewCourseDetail,
};
pub use flashcard::{
    Flashcard, FlashcardSlot, FlashcardSwitch, NewFlashcard, NewSequenceSlot, sort_by_sequence,
};
pub use lesson::{Lesson, NewLesson};
pub use major::{Major, MajorDescription, NewMajor};
pub use validation::{NAME_LEN, OVERVIEW_LEN};
