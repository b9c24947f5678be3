//! Field schemas for the four certificate types.
//!
//! Every certificate record is a flat struct of string fields. The schema
//! describes each field once (key, label, kind, required flag) and is shared
//! by the form holders, the validator and the renderer.

use crate::certificate::{BirthRecord, DeathRecord, MarriageRecord, NameChangeRecord};
use crate::models::DocumentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// ISO `YYYY-MM-DD` as produced by a date input.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Generates a certificate record struct together with its field schema and
/// string-keyed accessors.
macro_rules! certificate_record {
    (@required required) => { true };
    (@required) => { false };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident : $key:tt, $label:literal, $kind:ident $(, $req:ident)? ; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(rename = $key)]
                pub $field: String,
            )*
        }

        impl $name {
            pub const FIELDS: &'static [$crate::schema::FieldSpec] = &[
                $(
                    $crate::schema::FieldSpec {
                        key: $key,
                        label: $label,
                        kind: $crate::schema::FieldKind::$kind,
                        required: $crate::schema::certificate_record!(@required $($req)?),
                    },
                )*
            ];

            pub fn get(&self, key: &str) -> Option<&str> {
                match key {
                    $( $key => Some(self.$field.as_str()), )*
                    _ => None,
                }
            }

            pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
                match key {
                    $( $key => Some(&mut self.$field), )*
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use certificate_record;

pub fn fields_for(doc_type: DocumentType) -> &'static [FieldSpec] {
    match doc_type {
        DocumentType::Birth => BirthRecord::FIELDS,
        DocumentType::Death => DeathRecord::FIELDS,
        DocumentType::Marriage => MarriageRecord::FIELDS,
        DocumentType::NameChange => NameChangeRecord::FIELDS,
    }
}

pub fn required_fields(doc_type: DocumentType) -> impl Iterator<Item = &'static FieldSpec> {
    fields_for(doc_type).iter().filter(|spec| spec.required)
}

pub fn field_spec(doc_type: DocumentType, key: &str) -> Option<&'static FieldSpec> {
    fields_for(doc_type).iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn required_keys(doc_type: DocumentType) -> Vec<&'static str> {
        required_fields(doc_type).map(|spec| spec.key).collect()
    }

    #[test]
    fn required_sets_per_type() {
        assert_eq!(
            required_keys(DocumentType::Birth),
            ["childLastName", "childFirstName", "birthDate"]
        );
        assert_eq!(
            required_keys(DocumentType::Death),
            ["deceasedLastName", "deceasedFirstName", "deathDate"]
        );
        assert_eq!(
            required_keys(DocumentType::Marriage),
            ["groomFirstName", "brideFirstName", "marriageDate"]
        );
        assert_eq!(
            required_keys(DocumentType::NameChange),
            ["oldLastName", "oldFirstName", "newLastName", "newFirstName"]
        );
    }

    #[test]
    fn keys_are_unique_within_each_schema() {
        for doc_type in DocumentType::ALL {
            let fields = fields_for(doc_type);
            let unique: HashSet<_> = fields.iter().map(|spec| spec.key).collect();
            assert_eq!(unique.len(), fields.len(), "duplicate key in {doc_type}");
        }
    }

    #[test]
    fn date_fields_are_typed_as_dates() {
        let spec = field_spec(DocumentType::Death, "deathDate").unwrap();
        assert_eq!(spec.kind, FieldKind::Date);
        let spec = field_spec(DocumentType::Marriage, "groomBirthDate").unwrap();
        assert_eq!(spec.kind, FieldKind::Date);
        let spec = field_spec(DocumentType::Birth, "birthPlace").unwrap();
        assert_eq!(spec.kind, FieldKind::Text);
        assert!(field_spec(DocumentType::Birth, "deathDate").is_none());
    }
}
