use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Birth,
    Death,
    Marriage,
    NameChange,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Birth,
        DocumentType::Death,
        DocumentType::Marriage,
        DocumentType::NameChange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Birth => "birth",
            DocumentType::Death => "death",
            DocumentType::Marriage => "marriage",
            DocumentType::NameChange => "name_change",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Birth => "Рождение",
            DocumentType::Death => "Смерть",
            DocumentType::Marriage => "Брак",
            DocumentType::NameChange => "Смена имени",
        }
    }

    pub fn certificate_kind(self) -> &'static str {
        match self {
            DocumentType::Birth => "Свидетельство о рождении",
            DocumentType::Death => "Свидетельство о смерти",
            DocumentType::Marriage => "Свидетельство о браке",
            DocumentType::NameChange => "Свидетельство о смене имени",
        }
    }

    /// Second heading line of the printed certificate.
    pub fn certificate_heading(self) -> &'static str {
        match self {
            DocumentType::Birth => "О РОЖДЕНИИ",
            DocumentType::Death => "О СМЕРТИ",
            DocumentType::Marriage => "О ЗАКЛЮЧЕНИИ БРАКА",
            DocumentType::NameChange => "О ПЕРЕМЕНЕ ИМЕНИ",
        }
    }

    /// Series prefix used in record numbers.
    pub fn series(self) -> &'static str {
        match self {
            DocumentType::Birth => "I",
            DocumentType::Marriage => "II",
            DocumentType::Death => "III",
            DocumentType::NameChange => "IV",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        DocumentType::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == normalized)
            .ok_or_else(|| AppError::InvalidDocumentType(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    Processing,
    Ready,
    Issued,
    Archived,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Draft,
        DocumentStatus::Processing,
        DocumentStatus::Ready,
        DocumentStatus::Issued,
        DocumentStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Ready => "ready",
            DocumentStatus::Issued => "issued",
            DocumentStatus::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Черновик",
            DocumentStatus::Processing => "В обработке",
            DocumentStatus::Ready => "Готов",
            DocumentStatus::Issued => "Выдан",
            DocumentStatus::Archived => "Архив",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| AppError::InvalidStatus(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub number: String,
    pub date: NaiveDate,
    pub full_name: String,
    pub status: DocumentStatus,
}

impl DocumentRecord {
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub doc_type: DocumentType,
    pub number: String,
    pub date: NaiveDate,
    pub full_name: String,
    pub status: DocumentStatus,
}

impl NewDocument {
    pub fn into_record(self) -> DocumentRecord {
        DocumentRecord {
            id: Uuid::new_v4(),
            doc_type: self.doc_type,
            number: self.number,
            date: self.date,
            full_name: self.full_name,
            status: self.status,
        }
    }
}
