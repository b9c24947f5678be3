use crate::certificate::CertificateData;
use crate::error::{AppError, AppResult, MissingField};
use crate::models::DocumentType;
use crate::schema::required_fields;

/// Certificate data that passed required-field validation.
///
/// The snapshot is owned and immutable; later edits to the form it came
/// from do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCertificate {
    data: CertificateData,
}

impl ValidatedCertificate {
    pub fn data(&self) -> &CertificateData {
        &self.data
    }

    pub fn doc_type(&self) -> DocumentType {
        self.data.doc_type()
    }

    pub fn into_inner(self) -> CertificateData {
        self.data
    }
}

/// Required fields of the data's type that are empty or whitespace-only, in
/// schema order.
pub fn missing_fields(data: &CertificateData) -> Vec<MissingField> {
    required_fields(data.doc_type())
        .filter(|spec| data.get(spec.key).map_or(true, |value| value.trim().is_empty()))
        .map(|spec| MissingField {
            key: spec.key,
            label: spec.label,
        })
        .collect()
}

pub fn validate(data: &CertificateData) -> AppResult<ValidatedCertificate> {
    let missing = missing_fields(data);
    if missing.is_empty() {
        Ok(ValidatedCertificate { data: data.clone() })
    } else {
        Err(AppError::MissingFields(missing))
    }
}
