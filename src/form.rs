use tracing::debug;

use crate::certificate::CertificateData;
use crate::error::{AppError, AppResult};
use crate::models::DocumentType;
use crate::validation::{self, ValidatedCertificate};

#[derive(Debug, Clone)]
pub struct FormState {
    data: CertificateData,
}

impl FormState {
    pub fn new(doc_type: DocumentType) -> Self {
        Self {
            data: CertificateData::empty(doc_type),
        }
    }

    pub fn doc_type(&self) -> DocumentType {
        self.data.doc_type()
    }

    pub fn data(&self) -> &CertificateData {
        &self.data
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.data.get(key)
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> AppResult<()> {
        self.data.set(key, value)?;
        debug!(doc_type = %self.doc_type(), field = key, "form field updated");
        Ok(())
    }

    /// Replaces the form contents, e.g. when editing a saved document.
    pub fn load(&mut self, data: CertificateData) -> AppResult<()> {
        if data.doc_type() != self.doc_type() {
            return Err(AppError::DocumentTypeMismatch {
                expected: self.doc_type(),
                found: data.doc_type(),
            });
        }
        self.data = data;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.data = CertificateData::empty(self.doc_type());
    }

    pub fn validate(&self) -> AppResult<ValidatedCertificate> {
        validation::validate(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct FormSet {
    birth: FormState,
    death: FormState,
    marriage: FormState,
    name_change: FormState,
}

impl FormSet {
    pub fn new() -> Self {
        Self {
            birth: FormState::new(DocumentType::Birth),
            death: FormState::new(DocumentType::Death),
            marriage: FormState::new(DocumentType::Marriage),
            name_change: FormState::new(DocumentType::NameChange),
        }
    }

    pub fn get(&self, doc_type: DocumentType) -> &FormState {
        match doc_type {
            DocumentType::Birth => &self.birth,
            DocumentType::Death => &self.death,
            DocumentType::Marriage => &self.marriage,
            DocumentType::NameChange => &self.name_change,
        }
    }

    pub fn get_mut(&mut self, doc_type: DocumentType) -> &mut FormState {
        match doc_type {
            DocumentType::Birth => &mut self.birth,
            DocumentType::Death => &mut self.death,
            DocumentType::Marriage => &mut self.marriage,
            DocumentType::NameChange => &mut self.name_change,
        }
    }
}

impl Default for FormSet {
    fn default() -> Self {
        Self::new()
    }
}
