//! Certificate rendering.
//!
//! Rendering is a pure function of the certificate data, the record number
//! and the render settings. It never fails: blank fields become a
//! placeholder, blank dates become empty text.

use serde::Serialize;
use tracing::debug;

use crate::certificate::CertificateData;
use crate::models::DocumentType;

pub mod dates;
mod output;
pub mod templates;

pub use dates::format_long_date;

use templates::{template_for, Entry, Format, SectionTemplate, Source, SIGNATURE, STAMP};

pub const PLACEHOLDER: &str = "_________________";
pub const DEFAULT_COUNTRY: &str = "Российская Федерация";

const COUNTRY_LINE: &str = "РОССИЙСКАЯ ФЕДЕРАЦИЯ";
const TITLE: &str = "СВИДЕТЕЛЬСТВО";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDocument {
    pub doc_type: DocumentType,
    pub number: String,
    pub country: &'static str,
    pub title: &'static str,
    pub heading: &'static str,
    pub sections: Vec<Section>,
    pub stamp: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: Option<&'static str>,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub label: &'static str,
    pub value: String,
}

impl FormattedDocument {
    /// Value of the first line with the given label, searching sections in
    /// order.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.sections.iter().flat_map(|section| section.lines.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub default_country: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CertificateRenderer {
    settings: RenderSettings,
}

impl CertificateRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn render(&self, data: &CertificateData, number: &str) -> FormattedDocument {
        let doc_type = data.doc_type();
        let sections = template_for(doc_type)
            .iter()
            .chain([&SIGNATURE])
            .map(|section| self.render_section(section, data, number))
            .collect();

        debug!(doc_type = %doc_type, %number, "rendered certificate");

        FormattedDocument {
            doc_type,
            number: number.to_string(),
            country: COUNTRY_LINE,
            title: TITLE,
            heading: doc_type.certificate_heading(),
            sections,
            stamp: STAMP,
        }
    }

    fn render_section(
        &self,
        section: &SectionTemplate,
        data: &CertificateData,
        number: &str,
    ) -> Section {
        Section {
            title: section.title,
            lines: section
                .entries
                .iter()
                .map(|entry| Line {
                    label: entry.label,
                    value: self.render_entry(entry, data, number),
                })
                .collect(),
        }
    }

    fn render_entry(&self, entry: &Entry, data: &CertificateData, number: &str) -> String {
        let raw = match entry.source {
            Source::Field(key) => value_of(data, key),
            Source::Fallback(keys) => keys
                .iter()
                .map(|key| value_of(data, key))
                .find(|value| !value.is_empty())
                .unwrap_or_default(),
            Source::Country(key) => or_default(value_of(data, key), &self.settings.default_country),
            Source::Defaulted(key, default) => or_default(value_of(data, key), default),
            Source::Number => number,
            Source::Signature => "",
        };

        match entry.format {
            Format::Date => format_long_date(raw),
            Format::Text if raw.is_empty() => PLACEHOLDER.to_string(),
            Format::Text => raw.to_string(),
        }
    }
}

/// Renders with the default settings.
pub fn render(data: &CertificateData, number: &str) -> FormattedDocument {
    CertificateRenderer::default().render(data, number)
}

fn value_of<'a>(data: &'a CertificateData, key: &str) -> &'a str {
    data.get(key).map(str::trim).unwrap_or_default()
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
