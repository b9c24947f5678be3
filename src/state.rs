use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    certificate::CertificateData,
    config::AppConfig,
    error::{AppError, AppResult},
    form::{FormSet, FormState},
    models::{DocumentRecord, DocumentStatus, DocumentType, NewDocument},
    numbering::NumberGenerator,
    print::{PrintSink, PrintSpooler},
    registry::{DocumentQuery, Registry, RegistryStats},
    render::{CertificateRenderer, FormattedDocument, RenderSettings},
    validation::ValidatedCertificate,
};

pub const NEW_DOCUMENT_NAME: &str = "Новый документ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

pub struct AppState {
    pub config: Arc<AppConfig>,
    registry: Registry,
    forms: FormSet,
    certificates: HashMap<Uuid, ValidatedCertificate>,
    numbers: NumberGenerator,
    renderer: CertificateRenderer,
    spooler: PrintSpooler,
    notices: Vec<Notice>,
    clock: fn() -> NaiveDate,
}

impl AppState {
    pub fn new(config: AppConfig, sink: Arc<dyn PrintSink>) -> Self {
        let registry = if config.seed_examples {
            Registry::seeded()
        } else {
            Registry::new()
        };
        let renderer = CertificateRenderer::new(RenderSettings {
            default_country: config.default_country.clone(),
        });
        let spooler = PrintSpooler::new(sink, config.print_format);

        Self {
            config: Arc::new(config),
            registry,
            forms: FormSet::new(),
            certificates: HashMap::new(),
            numbers: NumberGenerator::new(),
            renderer,
            spooler,
            notices: Vec::new(),
            clock: local_today,
        }
    }

    pub fn with_numbers(mut self, numbers: NumberGenerator) -> Self {
        self.numbers = numbers;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn spooler(&self) -> &PrintSpooler {
        &self.spooler
    }

    pub fn spooler_mut(&mut self) -> &mut PrintSpooler {
        &mut self.spooler
    }

    pub fn form(&self, doc_type: DocumentType) -> &FormState {
        self.forms.get(doc_type)
    }

    pub fn certificate(&self, id: Uuid) -> Option<&ValidatedCertificate> {
        self.certificates.get(&id)
    }

    pub fn list(&self, query: &DocumentQuery) -> Vec<&DocumentRecord> {
        self.registry.list(query)
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    pub fn take_notifications(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn set_field(
        &mut self,
        doc_type: DocumentType,
        key: &str,
        value: impl Into<String>,
    ) -> AppResult<()> {
        self.forms.get_mut(doc_type).set_field(key, value)
    }

    pub fn load_form(&mut self, data: CertificateData) -> AppResult<()> {
        self.forms.get_mut(data.doc_type()).load(data)
    }

    /// Registry "create" action: an empty draft with a fresh number.
    pub fn create_document(&mut self, doc_type: DocumentType) -> DocumentRecord {
        let number = self.next_number(doc_type);
        let record = NewDocument {
            doc_type,
            number,
            date: (self.clock)(),
            full_name: NEW_DOCUMENT_NAME.to_string(),
            status: DocumentStatus::Draft,
        }
        .into_record();

        self.notify(
            NoticeLevel::Success,
            "Документ создан",
            Some(format!("Номер: {}", record.number)),
        );
        self.registry.insert(record).clone()
    }

    /// Validates the form, registers a document for it and clears the form.
    pub fn save_form(&mut self, doc_type: DocumentType) -> AppResult<DocumentRecord> {
        let snapshot = match self.forms.get(doc_type).validate() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.reject(doc_type, "Заполните обязательные поля", &err);
                return Err(err);
            }
        };

        let number = self.next_number(doc_type);
        let full_name = match snapshot.data().display_name() {
            name if name.is_empty() => NEW_DOCUMENT_NAME.to_string(),
            name => name,
        };
        let record = NewDocument {
            doc_type,
            number,
            date: (self.clock)(),
            full_name,
            status: DocumentStatus::Draft,
        }
        .into_record();

        self.certificates.insert(record.id, snapshot);
        self.forms.get_mut(doc_type).reset();
        self.notify(
            NoticeLevel::Success,
            format!("{} сохранено", doc_type.certificate_kind()),
            None,
        );
        Ok(self.registry.insert(record).clone())
    }

    pub fn preview_form(&mut self, doc_type: DocumentType) -> AppResult<FormattedDocument> {
        let snapshot = match self.forms.get(doc_type).validate() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.reject(doc_type, "Заполните обязательные поля для предпросмотра", &err);
                return Err(err);
            }
        };
        let number = self.numbers.generate(doc_type);
        Ok(self.renderer.render(snapshot.data(), &number))
    }

    pub fn print_form(&mut self, doc_type: DocumentType) -> Uuid {
        let number = self.numbers.generate(doc_type);
        let document = self.renderer.render(self.forms.get(doc_type).data(), &number);
        let job_id = self.spooler.enqueue(&document);
        self.notify(NoticeLevel::Info, "Документ отправлен на печать", None);
        job_id
    }

    /// Renders a registered document from its saved data, or with
    /// placeholders when it was created without any.
    pub fn view_document(&self, id: Uuid) -> Option<FormattedDocument> {
        let record = self.registry.get(id)?;
        let document = match self.certificates.get(&id) {
            Some(snapshot) => self.renderer.render(snapshot.data(), &record.number),
            None => self
                .renderer
                .render(&CertificateData::empty(record.doc_type), &record.number),
        };
        Some(document)
    }

    pub fn print_document(&mut self, id: Uuid) -> Option<Uuid> {
        let document = self.view_document(id)?;
        let job_id = self.spooler.enqueue(&document);
        self.notify(
            NoticeLevel::Info,
            "Экспорт документа",
            Some(format!("{} отправлен на печать", document.number)),
        );
        Some(job_id)
    }

    pub fn edit_document(&mut self, id: Uuid) -> AppResult<Option<DocumentType>> {
        let Some(record) = self.registry.get(id) else {
            return Ok(None);
        };
        let doc_type = record.doc_type;
        let number = record.number.clone();

        let data = self
            .certificates
            .get(&id)
            .map(|snapshot| snapshot.data().clone())
            .unwrap_or_else(|| CertificateData::empty(doc_type));
        self.forms.get_mut(doc_type).load(data)?;

        info!(document_id = %id, doc_type = %doc_type, "document loaded for editing");
        self.notify(NoticeLevel::Info, "Редактирование документа", Some(number));
        Ok(Some(doc_type))
    }

    pub fn delete_document(&mut self, id: Uuid) -> Option<DocumentRecord> {
        let removed = self.registry.remove(id)?;
        self.certificates.remove(&id);
        self.notify(NoticeLevel::Success, "Документ удалён", None);
        Some(removed)
    }

    pub fn change_status(&mut self, id: Uuid, status: DocumentStatus) -> Option<DocumentRecord> {
        let updated = self.registry.set_status(id, status)?.clone();
        self.notify(
            NoticeLevel::Success,
            "Статус изменён",
            Some(status.label().to_string()),
        );
        Some(updated)
    }

    fn next_number(&mut self, doc_type: DocumentType) -> String {
        if self.config.unique_numbers {
            let registry = &self.registry;
            self.numbers
                .generate_unique(doc_type, |candidate| registry.contains_number(candidate))
        } else {
            self.numbers.generate(doc_type)
        }
    }

    fn reject(&mut self, doc_type: DocumentType, title: &str, err: &AppError) {
        let missing = err.missing_keys();
        warn!(doc_type = %doc_type, missing = ?missing, "form rejected");
        let description = match err {
            AppError::MissingFields(fields) => Some(
                fields
                    .iter()
                    .map(|field| field.label)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            _ => None,
        };
        self.notify(NoticeLevel::Error, title, description);
    }

    fn notify(&mut self, level: NoticeLevel, title: impl Into<String>, description: Option<String>) {
        self.notices.push(Notice {
            level,
            title: title.into(),
            description,
        });
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
