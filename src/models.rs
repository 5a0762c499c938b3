use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic tag as returned by the server. The identifier is opaque; only the
/// display form is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Identifier with its first character capitalized. Leading whitespace is
    /// skipped when looking for that character but kept in the output.
    pub fn display_name(&self) -> String {
        crate::utils::capitalize_first(&self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim identifiers and drop empties and duplicates, keeping first-seen order.
pub fn normalize_tags<I, S>(raw: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<Tag> = Vec::new();
    for id in raw {
        let id = id.as_ref().trim();
        if id.is_empty() || tags.iter().any(|t| t.id() == id) {
            continue;
        }
        tags.push(Tag::new(id));
    }
    tags
}

/// What the user asked to be quizzed on. Text and tag are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryContext {
    Text(String),
    Tag(Tag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Text,
    Tag,
}

impl QueryContext {
    pub fn mode(&self) -> QueryMode {
        match self {
            QueryContext::Text(_) => QueryMode::Text,
            QueryContext::Tag(_) => QueryMode::Tag,
        }
    }

    /// The string sent to the server as `query`.
    pub fn value(&self) -> &str {
        match self {
            QueryContext::Text(text) => text,
            QueryContext::Tag(tag) => tag.id(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            QueryContext::Text(text) => format!("\"{}\"", text),
            QueryContext::Tag(tag) => format!("#{}", tag.display_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: String,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn is_well_formed(&self) -> bool {
        !self.options.is_empty() && self.options.contains(&self.correct_option)
    }

    /// Exact string comparison. A malformed question never matches.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.is_well_formed() && answer == self.correct_option
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsRequest<'a> {
    pub query: &'a str,
    pub questions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptureRequest<'a> {
    pub content: &'a str,
    pub source: &'a str,
}

/// Acknowledgement for a captured snippet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureReceipt {
    #[serde(default)]
    pub message: String,
}

/// `questionsBySearchQuery` replies with either a bare list or a wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum QuestionsPayload {
    List(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

impl QuestionsPayload {
    pub(crate) fn into_questions(self) -> Vec<Question> {
        match self {
            QuestionsPayload::List(questions) => questions,
            QuestionsPayload::Wrapped { questions } => questions,
        }
    }
}

/// `tags` replies with a bare list of identifiers or a `{ "tags": [...] }` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TagsPayload {
    List(Vec<String>),
    Wrapped { tags: Vec<String> },
}

impl TagsPayload {
    pub(crate) fn into_tags(self) -> Vec<Tag> {
        match self {
            TagsPayload::List(tags) => normalize_tags(tags),
            TagsPayload::Wrapped { tags } => normalize_tags(tags),
        }
    }
}

#[derive(Debug)]
pub enum ApiRequest {
    LoadTags {
        generation: u64,
    },
    LoadQuestions {
        generation: u64,
        context: QueryContext,
    },
}

#[derive(Debug)]
pub enum ApiResponse {
    Tags {
        generation: u64,
        result: Result<Vec<Tag>, ApiError>,
    },
    Questions {
        generation: u64,
        result: Result<Vec<Question>, ApiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Selection,
    Quiz,
    QuizQuitConfirm,
}
