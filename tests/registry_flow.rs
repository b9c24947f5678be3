mod common;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use zags::config::AppConfig;
use zags::models::{DocumentRecord, DocumentStatus, DocumentType};
use zags::registry::DocumentQuery;
use zags::state::{NoticeLevel, NEW_DOCUMENT_NAME};

use common::TestApp;

fn numbers(records: &[&DocumentRecord]) -> Vec<String> {
    records.iter().map(|doc| doc.number.clone()).collect()
}

#[test]
fn seeded_registry_search_flow() -> Result<()> {
    let mut app = TestApp::new();

    let all = app.state.list(&DocumentQuery::all());
    assert_eq!(all.len(), 4);

    let by_name = app.state.list(&DocumentQuery::all().text("иванов"));
    assert_eq!(numbers(&by_name), ["I-МЮ №234567"]);
    assert_eq!(by_name[0].doc_type, DocumentType::Birth);

    let by_number = app.state.list(&DocumentQuery::all().text("345678"));
    assert_eq!(numbers(&by_number), ["III-МЮ №345678"]);

    let padded = app.state.list(&DocumentQuery::all().text("Иванович "));
    assert!(padded.is_empty());

    let marriages = app
        .state
        .list(&DocumentQuery::all().doc_type(DocumentType::Marriage));
    assert_eq!(numbers(&marriages), ["II-МЮ №123456"]);

    let death_id = app
        .state
        .list(&DocumentQuery::all().doc_type(DocumentType::Death))
        .first()
        .map(|doc| doc.id)
        .context("seeded death record missing")?;
    app.state
        .change_status(death_id, DocumentStatus::Archived)
        .context("status change failed")?;

    let archived = app.state.registry().archive();
    assert_eq!(numbers(&archived), ["III-МЮ №345678"]);
    assert!(app
        .state
        .list(&DocumentQuery::all().status(DocumentStatus::Issued))
        .is_empty());

    Ok(())
}

#[test]
fn filtering_is_idempotent_and_order_preserving() -> Result<()> {
    let app = TestApp::new();
    let query = DocumentQuery::all().text("мю");

    let first: Vec<DocumentRecord> = app.state.list(&query).into_iter().cloned().collect();
    let registry: Vec<DocumentRecord> = app.state.registry().iter().cloned().collect();
    assert_eq!(first, registry);

    let narrowed = DocumentQuery::all()
        .text("мю")
        .status(DocumentStatus::Draft);
    let once = numbers(&app.state.list(&narrowed));
    let twice = numbers(&app.state.list(&narrowed));
    assert_eq!(once, twice);
    assert_eq!(once, ["IV-МЮ №456789"]);

    Ok(())
}

#[test]
fn created_document_is_found_by_its_number() -> Result<()> {
    let mut app = TestApp::with_config(AppConfig {
        unique_numbers: true,
        ..AppConfig::default()
    });

    let created = app.state.create_document(DocumentType::Death);
    assert!(created.number.starts_with("III-МЮ №"));
    assert_eq!(created.full_name, NEW_DOCUMENT_NAME);
    assert_eq!(created.status, DocumentStatus::Draft);
    assert_eq!(created.date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());

    let newest = app
        .state
        .registry()
        .iter()
        .next()
        .context("registry is empty")?;
    assert_eq!(newest.id, created.id);

    let found = app.state.list(&DocumentQuery::all().text(created.number.clone()));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    let notices = app.state.take_notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].title, "Документ создан");
    assert_eq!(
        notices[0].description.as_deref(),
        Some(format!("Номер: {}", created.number).as_str())
    );
    assert!(app.state.take_notifications().is_empty());

    Ok(())
}

#[test]
fn status_change_only_touches_status() -> Result<()> {
    let mut app = TestApp::new();
    let before = app
        .state
        .registry()
        .iter()
        .next()
        .cloned()
        .context("registry is empty")?;

    let after = app
        .state
        .change_status(before.id, DocumentStatus::Issued)
        .context("status change failed")?;
    assert_eq!(after.status, DocumentStatus::Issued);
    assert_eq!(
        DocumentRecord {
            status: before.status,
            ..after.clone()
        },
        before
    );

    let notices = app.state.take_notifications();
    assert_eq!(notices[0].title, "Статус изменён");
    assert_eq!(notices[0].description.as_deref(), Some("Выдан"));

    Ok(())
}

#[test]
fn delete_removes_record_and_unknown_ids_do_nothing() -> Result<()> {
    let mut app = TestApp::new();
    let id = app
        .state
        .list(&DocumentQuery::all().text("Козлова"))
        .first()
        .map(|doc| doc.id)
        .context("seeded name change record missing")?;

    let removed = app.state.delete_document(id).context("delete failed")?;
    assert_eq!(removed.number, "IV-МЮ №456789");
    assert_eq!(app.state.stats().total, 3);
    assert!(app.state.registry().get(id).is_none());

    assert!(app.state.delete_document(id).is_none());
    assert!(app
        .state
        .change_status(id, DocumentStatus::Ready)
        .is_none());
    assert_eq!(app.state.stats().total, 3);

    let titles: Vec<String> = app
        .state
        .take_notifications()
        .into_iter()
        .map(|notice| notice.title)
        .collect();
    assert_eq!(titles, ["Документ удалён"]);

    Ok(())
}

#[test]
fn empty_registry_when_seeding_is_disabled() {
    let app = TestApp::with_config(AppConfig {
        seed_examples: false,
        ..AppConfig::default()
    });
    assert!(app.state.registry().is_empty());
    assert_eq!(app.state.stats().with_type(DocumentType::Birth), 0);
}
