use serde_json::Value;

use hackerlearn_catalog::{
    CourseDetail, CourseDetailUpdate, CourseSummary, Major, MajorDescription, NewCourseDetail, NewMajor,
};
use hackerlearn_core::{CourseId, MajorId};
use hackerlearn_gateway::{ApiResponse, GatewayRequest};

use crate::client::{CatalogClient, json_request, list_from, rejected};
use crate::query::{with_query, with_segment};

impl CatalogClient {
    pub async fn list_majors(&self) -> ApiResponse<Vec<Major>> {
        list_from(self.majors.get_public("/major/all").await)
    }

    pub async fn get_major(&self, id: &MajorId) -> ApiResponse<Major> {
        self.majors.get_public(with_query("/major", "id", id.as_str())).await
    }

    pub async fn create_major(&self, major: &NewMajor) -> ApiResponse<Value> {
        match json_request("/major", major) {
            Ok(req) => self.majors.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn update_major(&self, id: &MajorId, major: &NewMajor) -> ApiResponse<Value> {
        match json_request(with_segment("/major", id.as_str()), major) {
            Ok(req) => self.majors.put_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn update_major_description(&self, description: &MajorDescription) -> ApiResponse<Value> {
        match json_request("/major/update/description", description) {
            Ok(req) => self.majors.put_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn delete_major(&self, id: &MajorId) -> ApiResponse<Value> {
        self.majors.delete_public(with_segment("/major", id.as_str())).await
    }

    pub async fn list_course_details(&self) -> ApiResponse<Vec<CourseSummary>> {
        list_from(self.majors.get_public("/course/all").await)
    }

    /// Full course create with objectives, languages, dates and images.
    pub async fn create_course_detail(&self, course: &NewCourseDetail) -> ApiResponse<Value> {
        let course = match course.clone().normalized() {
            Ok(course) => course,
            Err(e) => return rejected(e),
        };
        match json_request("/course/create", &course) {
            Ok(req) => self.majors.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn course_detail(&self, id: &CourseId) -> ApiResponse<CourseDetail> {
        self.majors
            .get_public(with_query("/course", "courseId", id.as_str()))
            .await
    }

    /// Sent with the bearer token when one is stored.
    pub async fn update_course_detail(&self, update: &CourseDetailUpdate) -> ApiResponse<Value> {
        self.majors
            .put(GatewayRequest::new(update.path()).with_body(update.body()))
            .await
    }
}
