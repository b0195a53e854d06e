use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::ValidationError;

/// A book on the shelf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned on creation
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    /// Always `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record from validated input, stamping both timestamps with `now`.
    pub fn new(id: String, draft: BookDraft, now: OffsetDateTime) -> Self {
        let finished = draft.is_finished();
        Self {
            id,
            name: draft.name,
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.page_count,
            read_page: draft.read_page,
            finished,
            reading: draft.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `inserted_at` are kept and
    /// `updated_at` never moves backwards.
    pub fn apply(&mut self, draft: BookDraft, now: OffsetDateTime) {
        self.finished = draft.is_finished();
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = now.max(self.updated_at);
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

/// Request body for creating or updating a book.
///
/// Unknown fields such as `id` or `finished` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<u32>,
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

/// Validated book input. Missing page numbers count as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDraft {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

impl TryFrom<BookPayload> for BookDraft {
    type Error = ValidationError;

    /// The name is checked before the page numbers.
    fn try_from(payload: BookPayload) -> Result<Self, Self::Error> {
        let name = match payload.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ValidationError::MissingName),
        };

        let page_count = payload.page_count.unwrap_or(0);
        let read_page = payload.read_page.unwrap_or(0);
        if read_page > page_count {
            return Err(ValidationError::ReadPageExceedsPageCount);
        }

        Ok(Self {
            name,
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            page_count,
            read_page,
            reading: payload.reading.unwrap_or(false),
        })
    }
}

/// Query string accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Tri-state boolean query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagFilter {
    /// Parameter absent: no constraint
    #[default]
    Any,
    /// Parameter present: `"1"` means true, anything else false
    Is(bool),
}

impl FlagFilter {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None => FlagFilter::Any,
            Some(raw) => FlagFilter::Is(raw == "1"),
        }
    }

    pub fn matches(self, value: bool) -> bool {
        match self {
            FlagFilter::Any => true,
            FlagFilter::Is(expected) => expected == value,
        }
    }
}

/// Conjunction of the list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Lowercased substring to look for in the book name
    name: Option<String>,
    reading: FlagFilter,
    finished: FlagFilter,
}

impl BookFilter {
    pub fn from_query(query: &BookQuery) -> Self {
        Self {
            name: query
                .name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(str::to_lowercase),
            reading: FlagFilter::from_query(query.reading.as_deref()),
            finished: FlagFilter::from_query(query.finished.as_deref()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let name_matches = match &self.name {
            Some(needle) => book.name.to_lowercase().contains(needle.as_str()),
            None => true,
        };
        name_matches && self.reading.matches(book.reading) && self.finished.matches(book.finished)
    }
}
