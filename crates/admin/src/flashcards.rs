use serde_json::Value;

use hackerlearn_catalog::{
    Content, ContentType, Flashcard, FlashcardSlot, FlashcardSwitch, NewFlashcard, NewSequenceSlot,
};
use hackerlearn_core::{ContentId, FlashcardId, FlashcardSequenceId, LessonId};
use hackerlearn_gateway::{ApiResponse, GatewayRequest};

use crate::client::{CatalogClient, json_request, list_from, rejected, sorted};
use crate::query::with_query;

impl CatalogClient {
    /// Flashcards of a lesson, ordered by sequence.
    pub async fn list_flashcards(&self, lesson: &LessonId) -> ApiResponse<Vec<Flashcard>> {
        sorted(list_from(
            self.gateway
                .get_public(with_query("/flashcard/all", "lessonId", lesson.as_str()))
                .await,
        ))
    }

    /// Content slots of a flashcard, ordered by sequence.
    pub async fn flashcard_contents(&self, flashcard: &FlashcardId) -> ApiResponse<Vec<FlashcardSlot>> {
        sorted(list_from(
            self.gateway
                .get_public(with_query("/flashcard/flashcard", "flashcardId", flashcard.as_str()))
                .await,
        ))
    }

    pub async fn create_flashcard(&self, flashcard: &NewFlashcard) -> ApiResponse<Value> {
        match json_request("/flashcard", flashcard) {
            Ok(req) => self.gateway.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn append_flashcard(&self, lesson: &LessonId) -> ApiResponse<Value> {
        match self.list_flashcards(lesson).await.into_result() {
            Ok(existing) => {
                self.create_flashcard(&NewFlashcard::appended_to(lesson.clone(), &existing))
                    .await
            }
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn switch_flashcards(&self, switch: &FlashcardSwitch) -> ApiResponse<Value> {
        match json_request("/flashcard/switch", switch) {
            Ok(req) => self.gateway.put_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn delete_flashcard(&self, id: &FlashcardId) -> ApiResponse<Value> {
        self.gateway
            .delete_public(with_query("/flashcard/delete", "flashcardId", id.as_str()))
            .await
    }

    pub async fn add_sequence_slot(&self, slot: &NewSequenceSlot) -> ApiResponse<Value> {
        match json_request("/flashcard-sequence", slot) {
            Ok(req) => self.gateway.post_public(req).await,
            Err(e) => ApiResponse::failure(e),
        }
    }

    /// Add an empty slot of `kind` after the flashcard's last slot.
    pub async fn append_sequence_slot(&self, flashcard: &FlashcardId, kind: ContentType) -> ApiResponse<Value> {
        match self.flashcard_contents(flashcard).await.into_result() {
            Ok(existing) => {
                let slot = NewSequenceSlot::appended_to(flashcard.clone(), kind, &existing);
                self.add_sequence_slot(&slot).await
            }
            Err(e) => ApiResponse::failure(e),
        }
    }

    pub async fn delete_sequence_slot(&self, id: &FlashcardSequenceId) -> ApiResponse<Value> {
        self.gateway
            .delete_public(with_query(
                "/flashcard-sequence/delete",
                "flashcardSequenceId",
                id.as_str(),
            ))
            .await
    }

    /// Fill slot `slot` with `content`.
    pub async fn create_content(&self, slot: &FlashcardSequenceId, content: Content) -> ApiResponse<Value> {
        let path = content.content_type().create_path();
        match content.create_body(slot) {
            Ok(body) => {
                self.gateway
                    .post_public(GatewayRequest::new(path).with_body(body))
                    .await
            }
            Err(e) => rejected(e),
        }
    }

    /// Replace content `id` held in slot `slot`.
    pub async fn update_content(
        &self,
        id: &ContentId,
        slot: &FlashcardSequenceId,
        content: Content,
    ) -> ApiResponse<Value> {
        let path = content.content_type().update_path();
        match content.update_body(id, slot) {
            Ok(body) => {
                self.gateway
                    .put_public(GatewayRequest::new(path).with_body(body))
                    .await
            }
            Err(e) => rejected(e),
        }
    }
}
