use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hackerlearn_core::{
    ContentId, DomainError, DomainResult, Entity, FlashcardId, FlashcardSequenceId, LessonId,
    Sequenced, next_sequence,
};

use crate::content::{Content, ContentType};

/// A flashcard inside a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: FlashcardId,
    pub sequence: u32,
    pub lesson_id: LessonId,
}

impl Entity for Flashcard {
    type Id = FlashcardId;

    fn id(&self) -> &FlashcardId {
        &self.id
    }
}

impl Sequenced for Flashcard {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlashcard {
    pub lesson_id: LessonId,
    pub sequence: u32,
}

impl NewFlashcard {
    pub fn appended_to(lesson_id: LessonId, existing: &[Flashcard]) -> Self {
        Self {
            lesson_id,
            sequence: next_sequence(existing),
        }
    }
}

/// Swap the positions of two flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSwitch {
    pub first_sequence_id: FlashcardId,
    pub second_sequence_id: FlashcardId,
}

impl FlashcardSwitch {
    pub fn new(first: FlashcardId, second: FlashcardId) -> DomainResult<Self> {
        if first == second {
            return Err(DomainError::validation(
                "secondSequenceId",
                "cannot swap a flashcard with itself",
            ));
        }
        Ok(Self {
            first_sequence_id: first,
            second_sequence_id: second,
        })
    }
}

/// Add a typed, still-empty slot to a flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSequenceSlot {
    pub flashcard_id: FlashcardId,
    pub sequence: u32,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

impl NewSequenceSlot {
    pub fn appended_to(
        flashcard_id: FlashcardId,
        content_type: ContentType,
        existing: &[FlashcardSlot],
    ) -> Self {
        Self {
            flashcard_id,
            sequence: next_sequence(existing),
            content_type,
        }
    }
}

/// One entry of a flashcard's content list.
///
/// Unfilled slots only carry the slot id, type and position. Filled slots
/// also carry the content record's own id and fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub sequence: u32,
    pub flashcard_sequence_id: FlashcardSequenceId,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub is_content: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Sequenced for FlashcardSlot {
    fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl FlashcardSlot {
    /// The typed content, or `None` for a slot that has not been filled.
    pub fn content(&self) -> DomainResult<Option<Content>> {
        if !self.is_content {
            return Ok(None);
        }
        let mut record = self.fields.clone();
        record.insert(
            "type".into(),
            Value::String(self.content_type.as_str().to_string()),
        );
        serde_json::from_value(Value::Object(record))
            .map(Some)
            .map_err(|e| DomainError::validation("content", e.to_string()))
    }
}

/// Order flashcards (or slots) by position, as they are presented.
pub fn sort_by_sequence<T: Sequenced>(items: &mut [T]) {
    items.sort_by_key(Sequenced::sequence);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn card(id: &str, sequence: u32) -> Flashcard {
        Flashcard {
            id: FlashcardId::new(id).unwrap(),
            sequence,
            lesson_id: LessonId::new("l1").unwrap(),
        }
    }

    #[test]
    fn appended_flashcard_skips_past_gaps() {
        let lesson = LessonId::new("l1").unwrap();
        let existing = [card("a", 1), card("b", 3)];
        assert_eq!(NewFlashcard::appended_to(lesson.clone(), &existing).sequence, 4);
        assert_eq!(NewFlashcard::appended_to(lesson, &[]).sequence, 1);
    }

    #[test]
    fn new_flashcard_body() {
        let new = NewFlashcard::appended_to(LessonId::new("l1").unwrap(), &[card("a", 1), card("b", 2)]);
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            json!({ "lessonId": "l1", "sequence": 3 })
        );
    }

    #[test]
    fn switch_rejects_same_card() {
        let a = FlashcardId::new("a").unwrap();
        assert!(FlashcardSwitch::new(a.clone(), a.clone()).is_err());
        let switch = FlashcardSwitch::new(a, FlashcardId::new("b").unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&switch).unwrap(),
            json!({ "firstSequenceId": "a", "secondSequenceId": "b" })
        );
    }

    #[test]
    fn empty_slot_has_no_content() {
        let slot: FlashcardSlot = serde_json::from_value(json!({
            "sequence": 1,
            "flashcardSequenceId": "fs-1",
            "type": "VIDEO",
            "isContent": false
        }))
        .unwrap();
        assert_eq!(slot.content().unwrap(), None);

        let next = NewSequenceSlot::appended_to(FlashcardId::new("f1").unwrap(), ContentType::Code, &[slot]);
        assert_eq!(
            serde_json::to_value(&next).unwrap(),
            json!({ "flashcardId": "f1", "sequence": 2, "type": "CODE" })
        );
    }

    #[test]
    fn filled_slot_yields_typed_content() {
        let slot: FlashcardSlot = serde_json::from_value(json!({
            "id": "img-1",
            "sequence": 2,
            "flashcardSequenceId": "fs-2",
            "type": "IMAGE",
            "isContent": true,
            "text": "Topology",
            "imageUrls": ["https://cdn/net.png"]
        }))
        .unwrap();

        assert_eq!(slot.id.as_ref().map(|id| id.as_str()), Some("img-1"));
        assert_eq!(
            slot.content().unwrap(),
            Some(Content::Image {
                text: "Topology".into(),
                image_urls: vec!["https://cdn/net.png".into()],
            })
        );
    }

    #[test]
    fn filled_slot_with_bad_fields_is_an_error() {
        let slot: FlashcardSlot = serde_json::from_value(json!({
            "sequence": 1,
            "flashcardSequenceId": "fs-1",
            "type": "TRUE_FALSE",
            "isContent": true,
            "question": "q"
        }))
        .unwrap();
        assert_eq!(slot.content().unwrap_err().field(), Some("content"));
    }

    proptest! {
        #[test]
        fn sorting_orders_by_sequence(seqs in proptest::collection::vec(0u32..1000, 0..40)) {
            let mut cards: Vec<Flashcard> = seqs
                .iter()
                .enumerate()
                .map(|(i, s)| card(&format!("c{i}"), *s))
                .collect();
            sort_by_sequence(&mut cards);
            prop_assert!(cards.windows(2).all(|w| w[0].sequence <= w[1].sequence));
        }
    }
}
