use serde::Serialize;
use serde_json::Value;

use hackerlearn_catalog::{Chapter, Course, CourseFieldUpdate, Lesson, NewChapter, NewCourse, NewLesson};
use hackerlearn_core::{ChapterId, CourseId, LessonId};
use hackerlearn_gateway::ApiResponse;

use crate::client::{CatalogClient, json_request, list_from, rejected, sorted};
use crate::query::{with_query, with_segment};

/// One page of the course table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoursePage {
    pub page: u32,
    pub courses: Vec<Course>,
    /// Whether the following page has any course.
    pub has_next_page: bool,
}

impl CatalogClient {
    pub async fn list_courses(&self, page: u32) -> ApiResponse<Vec<Course>> {
        list_from(self.gateway.get_public(format!("/course/all?page={page}")).await)
    }

    /// A page of courses plus a look-ahead request for the next page.
    pub async fn course_page(&self, page: u32) -> ApiResponse<CoursePage> {
        let current = self.list_courses(page).await;
        let status = current.status();
        let courses = match current.into_result() {
            Ok(courses) => courses,
            Err(e) => return ApiResponse::failure(e),
        };

        let next = self.list_courses(page.saturating_add(1)).await;
        let has_next_page = next.data().is_some_and(|c| !c.is_empty());

        ApiResponse::success(
            CoursePage {
                page,
                courses,
                has_next_page,
            },
            status,
        )
    }

    pub async fn search_courses(&self, name: &str) -> ApiResponse<Vec<Course>> {
        list_from(
            self.gateway
                .get_public(with_query("/course/search", "name", name))
                .await,
        )
    }

    pub async fn create_course(&self, course: &NewCourse) -> ApiResponse<Value> {
        if let Err(e) = course.validate() {
            return rejected(e);
        }
        match json_request("/course", course) {
            Ok(req) => self.gateway.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn update_course_field(&self, id: &CourseId, update: &CourseFieldUpdate) -> ApiResponse<Value> {
        match json_request(with_query("/course/update", "id", id.as_str()), update) {
            Ok(req) => self.gateway.put_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn list_chapters(&self, course: &CourseId) -> ApiResponse<Vec<Chapter>> {
        sorted(list_from(
            self.gateway
                .get_public(with_query("/chapter", "courseId", course.as_str()))
                .await,
        ))
    }

    pub async fn create_chapter(&self, chapter: &NewChapter) -> ApiResponse<Value> {
        match json_request("/chapter", chapter) {
            Ok(req) => self.gateway.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    /// Create a chapter positioned after the course's current last chapter.
    pub async fn append_chapter(&self, course: &CourseId, name: &str, overview: &str) -> ApiResponse<Value> {
        let existing = match self.list_chapters(course).await.into_result() {
            Ok(chapters) => chapters,
            Err(e) => return ApiResponse::failure(e),
        };
        match NewChapter::appended_to(course.clone(), name, overview, &existing) {
            Ok(chapter) => self.create_chapter(&chapter).await,
            Err(e) => rejected(e),
        }
    }

    /// Requires an access token.
    pub async fn delete_chapter(&self, id: &ChapterId) -> ApiResponse<Value> {
        self.gateway.delete(with_segment("/chapter", id.as_str())).await
    }

    pub async fn list_lessons(&self, chapter: &ChapterId) -> ApiResponse<Vec<Lesson>> {
        sorted(list_from(
            self.gateway
                .get_public(with_query("/lesson/chapter", "chapterId", chapter.as_str()))
                .await,
        ))
    }

    pub async fn create_lesson(&self, lesson: &NewLesson) -> ApiResponse<Value> {
        match json_request("/lesson", lesson) {
            Ok(req) => self.gateway.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn append_lesson(&self, chapter: &ChapterId, name: &str, overview: &str) -> ApiResponse<Value> {
        let existing = match self.list_lessons(chapter).await.into_result() {
            Ok(lessons) => lessons,
            Err(e) => return ApiResponse::failure(e),
        };
        match NewLesson::appended_to(chapter.clone(), name, overview, &existing) {
            Ok(lesson) => self.create_lesson(&lesson).await,
            Err(e) => rejected(e),
        }
    }

    /// Requires an access token.
    pub async fn delete_lesson(&self, id: &LessonId) -> ApiResponse<Value> {
        self.gateway.delete(with_segment("/lesson", id.as_str())).await
    }
}
