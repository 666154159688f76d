//! Typed catalog operations for the admin side of the learning platform.
//!
//! [`CatalogClient`] has one method per backend endpoint the admin dashboard
//! uses. Course, chapter, lesson and flashcard calls go through the gateway
//! envelope; major and course-detail calls go straight to the major service.
//! Every method returns an [`ApiResponse`](hackerlearn_gateway::ApiResponse);
//! input that fails validation comes back as a failed response without any
//! network call.

mod client;
mod courses;
mod flashcards;
mod majors;
mod query;

pub use client::CatalogClient;
pub use courses::CoursePage;
