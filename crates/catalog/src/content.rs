//! Flashcard content units.
//!
//! A flashcard holds an ordered list of slots; each slot is typed up front
//! (see [`ContentType`]) and later filled with exactly one [`Content`] of that
//! type. Content is created with `POST /{slug}-content` and edited with
//! `PUT /{slug}-content/update`, except short answers which are edited at
//! `PUT /short-answer-content`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hackerlearn_core::{ContentId, DomainError, DomainResult, FlashcardSequenceId};

use crate::validation::{require_entries, require_non_blank};

/// Kind of a flashcard slot. Serialized as the backend's uppercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Text,
    Table,
    Image,
    Video,
    Code,
    Terminal,
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl ContentType {
    pub const ALL: [ContentType; 9] = [
        ContentType::Text,
        ContentType::Table,
        ContentType::Image,
        ContentType::Video,
        ContentType::Code,
        ContentType::Terminal,
        ContentType::MultipleChoice,
        ContentType::TrueFalse,
        ContentType::ShortAnswer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Text => "TEXT",
            ContentType::Table => "TABLE",
            ContentType::Image => "IMAGE",
            ContentType::Video => "VIDEO",
            ContentType::Code => "CODE",
            ContentType::Terminal => "TERMINAL",
            ContentType::MultipleChoice => "MULTIPLE_CHOICE",
            ContentType::TrueFalse => "TRUE_FALSE",
            ContentType::ShortAnswer => "SHORT_ANSWER",
        }
    }

    /// Path prefix used by the content endpoints, e.g. `multiple-choice`.
    pub fn slug(self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Table => "table",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Code => "code",
            ContentType::Terminal => "terminal",
            ContentType::MultipleChoice => "multiple-choice",
            ContentType::TrueFalse => "true-false",
            ContentType::ShortAnswer => "short-answer",
        }
    }

    pub fn create_path(self) -> String {
        format!("/{}-content", self.slug())
    }

    pub fn update_path(self) -> String {
        match self {
            ContentType::ShortAnswer => self.create_path(),
            _ => format!("/{}-content/update", self.slug()),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the tag (`MULTIPLE_CHOICE`) or the slug (`multiple-choice`), any case.
impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DomainError::validation("type", format!("unknown content type '{s}'")))
    }
}

/// Shell flavour of a terminal snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalKind {
    LinuxTerminal,
    WindowsCmd,
    Powershell,
    GitBash,
    MacosTerminal,
}

impl TerminalKind {
    /// Prompt shown in front of each command.
    pub fn prompt(self) -> &'static str {
        match self {
            TerminalKind::LinuxTerminal => "$ ",
            TerminalKind::WindowsCmd => "C:\\> ",
            TerminalKind::Powershell => "PS C:\\> ",
            TerminalKind::GitBash => "user@git-bash $ ",
            TerminalKind::MacosTerminal => "% ",
        }
    }
}

/// Filled content of one flashcard slot.
///
/// Deserializes from the records the backend returns for a flashcard (which
/// carry the `type` tag inline). Multiple-choice records are read with either
/// `correctOption` or `correctAnswer`; short-answer suggestions are sent as
/// one `", "`-joined string and read back from either form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Content {
    Text {
        texts: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Table {
        total_rows: u32,
        total_columns: u32,
        header_row: Vec<String>,
        body_rows: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        text: String,
        image_urls: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Video {
        text: String,
        video_urls: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Code {
        language: String,
        codes: Vec<String>,
        #[serde(default)]
        can_run: bool,
    },
    Terminal {
        language: TerminalKind,
        commands: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    MultipleChoice {
        question: String,
        options: Vec<String>,
        #[serde(alias = "correctAnswer")]
        correct_option: String,
    },
    #[serde(rename_all = "camelCase")]
    TrueFalse {
        question: String,
        correct_answer: bool,
    },
    #[serde(rename_all = "camelCase")]
    ShortAnswer {
        question: String,
        #[serde(with = "joined")]
        suggested_answers: Vec<String>,
        correct_answer: String,
    },
}

pub const MULTIPLE_CHOICE_OPTIONS: core::ops::RangeInclusive<usize> = 2..=6;
pub const TABLE_COLUMNS: core::ops::RangeInclusive<u32> = 2..=6;
pub const TABLE_ROWS: core::ops::RangeInclusive<u32> = 2..=10;

impl Content {
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Text { .. } => ContentType::Text,
            Content::Table { .. } => ContentType::Table,
            Content::Image { .. } => ContentType::Image,
            Content::Video { .. } => ContentType::Video,
            Content::Code { .. } => ContentType::Code,
            Content::Terminal { .. } => ContentType::Terminal,
            Content::MultipleChoice { .. } => ContentType::MultipleChoice,
            Content::TrueFalse { .. } => ContentType::TrueFalse,
            Content::ShortAnswer { .. } => ContentType::ShortAnswer,
        }
    }

    /// Strip blank list entries and check the per-type rules.
    pub fn normalized(self) -> DomainResult<Self> {
        Ok(match self {
            Content::Text { texts } => Content::Text {
                texts: require_entries("texts", texts, 1)?,
            },
            Content::Table {
                total_rows,
                total_columns,
                header_row,
                body_rows,
            } => {
                check_table(total_rows, total_columns, &header_row, &body_rows)?;
                Content::Table {
                    total_rows,
                    total_columns,
                    header_row,
                    body_rows,
                }
            }
            Content::Image { text, image_urls } => {
                require_non_blank("text", &text)?;
                Content::Image {
                    text,
                    image_urls: require_entries("imageUrls", image_urls, 1)?,
                }
            }
            Content::Video { text, video_urls } => {
                require_non_blank("text", &text)?;
                Content::Video {
                    text,
                    video_urls: require_entries("videoUrls", video_urls, 1)?,
                }
            }
            Content::Code {
                language,
                codes,
                can_run,
            } => {
                require_non_blank("language", &language)?;
                Content::Code {
                    language,
                    codes: require_entries("codes", codes, 1)?,
                    can_run,
                }
            }
            Content::Terminal { language, commands } => Content::Terminal {
                language,
                commands: require_entries("commands", commands, 1)?,
            },
            Content::MultipleChoice {
                question,
                options,
                correct_option,
            } => {
                require_non_blank("question", &question)?;
                let options = require_entries("options", options, *MULTIPLE_CHOICE_OPTIONS.start())?;
                if options.len() > *MULTIPLE_CHOICE_OPTIONS.end() {
                    return Err(DomainError::validation(
                        "options",
                        format!("at most {} options allowed", MULTIPLE_CHOICE_OPTIONS.end()),
                    ));
                }
                require_non_blank("correctOption", &correct_option)?;
                if !options.contains(&correct_option) {
                    return Err(DomainError::validation(
                        "correctOption",
                        "must be one of the options",
                    ));
                }
                Content::MultipleChoice {
                    question,
                    options,
                    correct_option,
                }
            }
            Content::TrueFalse {
                question,
                correct_answer,
            } => {
                require_non_blank("question", &question)?;
                Content::TrueFalse {
                    question,
                    correct_answer,
                }
            }
            Content::ShortAnswer {
                question,
                suggested_answers,
                correct_answer,
            } => {
                require_non_blank("question", &question)?;
                require_non_blank("correctAnswer", &correct_answer)?;
                Content::ShortAnswer {
                    question,
                    suggested_answers: require_entries("suggestedAnswers", suggested_answers, 1)?,
                    correct_answer,
                }
            }
        })
    }

    /// Request body that fills the slot `slot` with this content.
    pub fn create_body(self, slot: &FlashcardSequenceId) -> DomainResult<Map<String, Value>> {
        let mut body = self.normalized()?.into_fields()?;
        body.insert(
            "flashcardSequenceId".into(),
            Value::String(slot.to_string()),
        );
        Ok(body)
    }

    /// Request body that replaces content `id` in slot `slot`.
    ///
    /// The short-answer update endpoint takes no slot id.
    pub fn update_body(
        self,
        id: &ContentId,
        slot: &FlashcardSequenceId,
    ) -> DomainResult<Map<String, Value>> {
        let kind = self.content_type();
        let mut body = self.normalized()?.into_fields()?;
        body.insert("id".into(), Value::String(id.to_string()));
        if kind != ContentType::ShortAnswer {
            body.insert(
                "flashcardSequenceId".into(),
                Value::String(slot.to_string()),
            );
        }
        Ok(body)
    }

    fn into_fields(self) -> DomainResult<Map<String, Value>> {
        match serde_json::to_value(&self) {
            Ok(Value::Object(mut map)) => {
                map.remove("type");
                Ok(map)
            }
            Ok(_) => Err(DomainError::validation("content", "did not serialize to an object")),
            Err(e) => Err(DomainError::validation("content", e.to_string())),
        }
    }
}

fn check_table(rows: u32, columns: u32, header: &[String], body: &[String]) -> DomainResult<()> {
    if !TABLE_COLUMNS.contains(&columns) {
        return Err(DomainError::validation(
            "totalColumns",
            format!("must be between {} and {}", TABLE_COLUMNS.start(), TABLE_COLUMNS.end()),
        ));
    }
    if !TABLE_ROWS.contains(&rows) {
        return Err(DomainError::validation(
            "totalRows",
            format!("must be between {} and {}", TABLE_ROWS.start(), TABLE_ROWS.end()),
        ));
    }
    if header.len() != columns as usize {
        return Err(DomainError::validation(
            "headerRow",
            format!("expected {columns} cells, got {}", header.len()),
        ));
    }
    if header.iter().any(|h| h.trim().is_empty()) {
        return Err(DomainError::validation("headerRow", "all header cells must be filled"));
    }
    let cells = (rows * columns) as usize;
    if body.len() != cells {
        return Err(DomainError::validation(
            "bodyRows",
            format!("expected {cells} cells, got {}", body.len()),
        ));
    }
    Ok(())
}

mod joined {
    use serde::{Deserialize, Deserializer, Serializer};

    const SEP: &str = ", ";

    pub fn serialize<S: Serializer>(items: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&items.join(SEP))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Either {
        Joined(String),
        List(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Either::deserialize(deserializer)? {
            Either::Joined(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Either::List(items) => items,
        })
    }
}
