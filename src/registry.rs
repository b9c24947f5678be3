use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{DocumentRecord, DocumentStatus, DocumentType, NewDocument};

/// Registry search parameters. `None` filters mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentQuery {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    pub status: Option<DocumentStatus>,
}

impl DocumentQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn doc_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    pub fn status(mut self, status: DocumentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &DocumentRecord) -> bool {
        self.matches_text(record)
            && self.doc_type.map_or(true, |doc_type| record.doc_type == doc_type)
            && self.status.map_or(true, |status| record.status == status)
    }

    fn matches_text(&self, record: &DocumentRecord) -> bool {
        let needle = self.text.to_lowercase();
        needle.is_empty()
            || record.full_name.to_lowercase().contains(&needle)
            || record.number.to_lowercase().contains(&needle)
    }
}

pub fn parse_type_filter(value: &str) -> AppResult<Option<DocumentType>> {
    if is_wildcard(value) {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

pub fn parse_status_filter(value: &str) -> AppResult<Option<DocumentStatus>> {
    if is_wildcard(value) {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn is_wildcard(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub total: usize,
    by_status: HashMap<DocumentStatus, usize>,
    by_type: HashMap<DocumentType, usize>,
}

impl RegistryStats {
    pub fn with_status(&self, status: DocumentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn with_type(&self, doc_type: DocumentType) -> usize {
        self.by_type.get(&doc_type).copied().unwrap_or(0)
    }
}

/// In-memory document registry, newest first.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    documents: Vec<DocumentRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let documents = seed_documents()
            .into_iter()
            .map(NewDocument::into_record)
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&DocumentRecord> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn contains_number(&self, number: &str) -> bool {
        self.documents.iter().any(|doc| doc.number == number)
    }

    pub fn insert(&mut self, record: DocumentRecord) -> &DocumentRecord {
        info!(
            document_id = %record.id,
            number = %record.number,
            doc_type = %record.doc_type,
            "document added to registry"
        );
        self.documents.insert(0, record);
        &self.documents[0]
    }

    pub fn remove(&mut self, id: Uuid) -> Option<DocumentRecord> {
        let index = self.documents.iter().position(|doc| doc.id == id)?;
        let removed = self.documents.remove(index);
        info!(document_id = %id, number = %removed.number, "document removed from registry");
        Some(removed)
    }

    /// Overwrites the status; any transition is allowed.
    pub fn set_status(&mut self, id: Uuid, status: DocumentStatus) -> Option<&DocumentRecord> {
        let doc = self.documents.iter_mut().find(|doc| doc.id == id)?;
        let previous = doc.status;
        doc.status = status;
        info!(
            document_id = %id,
            from = %previous,
            to = %status,
            "document status changed"
        );
        Some(&*doc)
    }

    pub fn list(&self, query: &DocumentQuery) -> Vec<&DocumentRecord> {
        let results: Vec<&DocumentRecord> = self
            .documents
            .iter()
            .filter(|doc| query.matches(doc))
            .collect();
        debug!(
            text = %query.text,
            doc_type = ?query.doc_type,
            status = ?query.status,
            hits = results.len(),
            "registry query"
        );
        results
    }

    pub fn archive(&self) -> Vec<&DocumentRecord> {
        self.list(&DocumentQuery::all().status(DocumentStatus::Archived))
    }

    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total: self.documents.len(),
            ..RegistryStats::default()
        };
        for doc in &self.documents {
            *stats.by_status.entry(doc.status).or_default() += 1;
            *stats.by_type.entry(doc.doc_type).or_default() += 1;
        }
        stats
    }
}

fn seed_documents() -> Vec<NewDocument> {
    vec![
        seed(
            DocumentType::Birth,
            "I-МЮ №234567",
            (2023, 5, 25),
            "Иванов Иван Иванович",
            DocumentStatus::Processing,
        ),
        seed(
            DocumentType::Marriage,
            "II-МЮ №123456",
            (2023, 4, 15),
            "Петрова Анна Сергеевна",
            DocumentStatus::Ready,
        ),
        seed(
            DocumentType::Death,
            "III-МЮ №345678",
            (2023, 3, 10),
            "Сидоров Петр Николаевич",
            DocumentStatus::Issued,
        ),
        seed(
            DocumentType::NameChange,
            "IV-МЮ №456789",
            (2023, 2, 28),
            "Козлова Мария Александровна",
            DocumentStatus::Draft,
        ),
    ]
}

fn seed(
    doc_type: DocumentType,
    number: &str,
    (year, month, day): (i32, u32, u32),
    full_name: &str,
    status: DocumentStatus,
) -> NewDocument {
    NewDocument {
        doc_type,
        number: number.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        full_name: full_name.to_string(),
        status,
    }
}
