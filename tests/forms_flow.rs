mod common;

use anyhow::{Context, Result};
use zags::error::AppError;
use zags::models::{DocumentStatus, DocumentType};
use zags::registry::DocumentQuery;
use zags::render::PLACEHOLDER;
use zags::state::NoticeLevel;

use common::TestApp;

const BIRTH: &[(&str, &str)] = &[
    ("childLastName", "Петров"),
    ("childFirstName", "Пётр"),
    ("childMiddleName", "Петрович"),
    ("birthDate", "2023-05-25"),
    ("birthPlace", "г. Москва"),
    ("registrationDate", "2023-06-01"),
];

#[test]
fn save_rejects_missing_required_fields() -> Result<()> {
    let mut app = TestApp::new();
    app.fill(DocumentType::Birth, &[("childLastName", "Петров")])?;

    let err = app
        .state
        .save_form(DocumentType::Birth)
        .expect_err("save should be rejected");
    assert!(matches!(err, AppError::MissingFields(_)));
    assert_eq!(err.missing_keys(), ["childFirstName", "birthDate"]);

    assert_eq!(app.state.stats().total, 4);
    assert_eq!(
        app.state.form(DocumentType::Birth).field("childLastName"),
        Some("Петров")
    );

    let notices = app.state.take_notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].title, "Заполните обязательные поля");
    assert_eq!(
        notices[0].description.as_deref(),
        Some("Имя ребёнка, Дата рождения")
    );

    Ok(())
}

#[test]
fn saved_form_becomes_a_draft_with_snapshot() -> Result<()> {
    let mut app = TestApp::new();
    app.fill(DocumentType::Birth, BIRTH)?;

    let record = app.state.save_form(DocumentType::Birth)?;
    assert_eq!(record.full_name, "Петров Пётр Петрович");
    assert_eq!(record.status, DocumentStatus::Draft);
    assert_eq!(record.display_date(), "01.06.2023");
    assert!(record.number.starts_with("I-МЮ №"));

    let snapshot = app
        .state
        .certificate(record.id)
        .context("snapshot was not stored")?;
    assert_eq!(snapshot.data().get("birthPlace"), Some("г. Москва"));

    assert_eq!(
        app.state.form(DocumentType::Birth).field("childLastName"),
        Some("")
    );
    let found = app.state.list(&DocumentQuery::all().text("петрович"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, record.id);
    assert_eq!(
        app.state.list(&DocumentQuery::all().text("петров")).len(),
        2
    );

    let notices = app.state.take_notifications();
    assert_eq!(notices[0].title, "Свидетельство о рождении сохранено");

    let document = app
        .state
        .view_document(record.id)
        .context("saved document does not render")?;
    assert_eq!(document.number, record.number);
    assert_eq!(document.value("Дата рождения"), Some("25 мая 2023 г."));
    assert_eq!(document.value("Отчество"), Some("Петрович"));

    Ok(())
}

#[test]
fn marriage_display_name_joins_both_spouses() -> Result<()> {
    let mut app = TestApp::new();
    app.fill(
        DocumentType::Marriage,
        &[
            ("groomLastName", "Смирнов"),
            ("groomFirstName", "Алексей"),
            ("brideLastName", "Орлова"),
            ("brideFirstName", "Анна"),
            ("marriageDate", "2023-04-15"),
        ],
    )?;

    let record = app.state.save_form(DocumentType::Marriage)?;
    assert_eq!(record.full_name, "Смирнов Алексей и Орлова Анна");
    assert!(record.number.starts_with("II-МЮ №"));

    Ok(())
}

#[test]
fn preview_is_gated_by_validation() -> Result<()> {
    let mut app = TestApp::new();

    assert!(app.state.preview_form(DocumentType::Marriage).is_err());
    let notices = app.state.take_notifications();
    assert_eq!(
        notices[0].title,
        "Заполните обязательные поля для предпросмотра"
    );

    app.fill(
        DocumentType::Marriage,
        &[
            ("groomFirstName", "Алексей"),
            ("brideFirstName", "Анна"),
            ("brideLastName", "Орлова"),
            ("marriageDate", "2023-04-15"),
        ],
    )?;
    let preview = app.state.preview_form(DocumentType::Marriage)?;
    assert!(preview.number.starts_with("II-МЮ №"));
    assert_eq!(preview.value("Дата заключения брака"), Some("15 апреля 2023 г."));
    assert_eq!(preview.value("Жене"), Some("Орлова"));
    assert_eq!(preview.value("Мужу"), Some(PLACEHOLDER));
    assert_eq!(preview.value("Гражданство"), Some("Российская Федерация"));

    assert_eq!(app.state.stats().total, 4);
    assert!(app.state.take_notifications().is_empty());

    Ok(())
}

#[test]
fn editing_loads_saved_data_back_into_the_form() -> Result<()> {
    let mut app = TestApp::new();
    app.fill(
        DocumentType::NameChange,
        &[
            ("oldLastName", "Козлова"),
            ("oldFirstName", "Мария"),
            ("newLastName", "Белова"),
            ("newFirstName", "Мария"),
            ("changeReason", "по желанию"),
        ],
    )?;
    let record = app.state.save_form(DocumentType::NameChange)?;
    assert_eq!(record.full_name, "Белова Мария");
    app.state.take_notifications();

    let doc_type = app.state.edit_document(record.id)?;
    assert_eq!(doc_type, Some(DocumentType::NameChange));
    let form = app.state.form(DocumentType::NameChange);
    assert_eq!(form.field("oldLastName"), Some("Козлова"));
    assert_eq!(form.field("changeReason"), Some("по желанию"));

    let notices = app.state.take_notifications();
    assert_eq!(notices[0].title, "Редактирование документа");
    assert_eq!(notices[0].description.as_deref(), Some(record.number.as_str()));

    Ok(())
}

#[test]
fn editing_a_seeded_record_clears_the_form() -> Result<()> {
    let mut app = TestApp::new();
    app.fill(DocumentType::Death, &[("deathPlace", "г. Тверь")])?;
    let id = app
        .state
        .list(&DocumentQuery::all().doc_type(DocumentType::Death))
        .first()
        .map(|doc| doc.id)
        .context("seeded death record missing")?;

    app.state.edit_document(id)?;
    assert_eq!(app.state.form(DocumentType::Death).field("deathPlace"), Some(""));

    let document = app.state.view_document(id).context("seeded record does not render")?;
    assert_eq!(document.number, "III-МЮ №345678");
    assert_eq!(document.value("Фамилия"), Some(PLACEHOLDER));
    assert_eq!(document.value("Дата смерти"), Some(""));

    Ok(())
}

#[test]
fn unknown_fields_are_rejected() {
    let mut app = TestApp::new();
    let err = app
        .state
        .set_field(DocumentType::Birth, "groomFirstName", "Алексей")
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownField { .. }));
}
