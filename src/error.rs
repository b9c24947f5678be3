use std::fmt;

use thiserror::Error;

use crate::models::DocumentType;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub key: &'static str,
    pub label: &'static str,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.key)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("required fields are missing: {}", join_missing(.0))]
    MissingFields(Vec<MissingField>),

    #[error("unknown field `{key}` for {doc_type} certificate")]
    UnknownField { doc_type: DocumentType, key: String },

    #[error("unknown document type `{0}`")]
    InvalidDocumentType(String),

    #[error("unknown document status `{0}`")]
    InvalidStatus(String),

    #[error("expected {expected} certificate data, got {found}")]
    DocumentTypeMismatch {
        expected: DocumentType,
        found: DocumentType,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn unknown_field(doc_type: DocumentType, key: impl Into<String>) -> Self {
        Self::UnknownField {
            doc_type,
            key: key.into(),
        }
    }

    /// Keys of the missing fields, empty for every other error.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        match self {
            AppError::MissingFields(fields) => fields.iter().map(|field| field.key).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_missing(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
