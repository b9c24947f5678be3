//! Per-type certificate layouts.
//!
//! A template is an ordered list of sections, each an ordered list of
//! entries naming where the value comes from and how it is formatted. The
//! renderer walks these tables; there is no per-type rendering code.

use crate::models::DocumentType;

#[derive(Debug, Clone, Copy)]
pub enum Source {
    Field(&'static str),
    /// First non-blank value among the keys.
    Fallback(&'static [&'static str]),
    /// Field that defaults to the configured country when blank.
    Country(&'static str),
    /// Field with a fixed default when blank.
    Defaulted(&'static str, &'static str),
    /// The record number handed to the renderer.
    Number,
    /// A line left for a handwritten signature.
    Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Date,
}

#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub label: &'static str,
    pub source: Source,
    pub format: Format,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionTemplate {
    pub title: Option<&'static str>,
    pub entries: &'static [Entry],
}

const fn text(label: &'static str, key: &'static str) -> Entry {
    Entry {
        label,
        source: Source::Field(key),
        format: Format::Text,
    }
}

const fn date(label: &'static str, key: &'static str) -> Entry {
    Entry {
        label,
        source: Source::Field(key),
        format: Format::Date,
    }
}

const fn country(label: &'static str, key: &'static str) -> Entry {
    Entry {
        label,
        source: Source::Country(key),
        format: Format::Text,
    }
}

const RECORD_NUMBER: Entry = Entry {
    label: "Номер записи акта",
    source: Source::Number,
    format: Format::Text,
};

const REGISTRATION_PLACE: Entry = text("Место государственной регистрации", "registrationPlace");
const REGISTRATION_DATE: Entry = date("Дата составления записи акта", "registrationDate");

const REGISTRATION: SectionTemplate = SectionTemplate {
    title: None,
    entries: &[REGISTRATION_PLACE, REGISTRATION_DATE, RECORD_NUMBER],
};

/// Closing block shared by every certificate.
pub const SIGNATURE: SectionTemplate = SectionTemplate {
    title: None,
    entries: &[
        date("Дата выдачи", "registrationDate"),
        Entry {
            label: "Руководитель органа ЗАГС",
            source: Source::Signature,
            format: Format::Text,
        },
    ],
};

pub const STAMP: &str = "М.П.";

const BIRTH: &[SectionTemplate] = &[
    SectionTemplate {
        title: None,
        entries: &[
            text("Фамилия", "childLastName"),
            text("Имя", "childFirstName"),
            text("Отчество", "childMiddleName"),
            Entry {
                label: "Пол",
                source: Source::Defaulted("childGender", "мужской"),
                format: Format::Text,
            },
            date("Дата рождения", "birthDate"),
            text("Место рождения", "birthPlace"),
        ],
    },
    SectionTemplate {
        title: Some("СВЕДЕНИЯ О РОДИТЕЛЯХ. МАТЬ"),
        entries: &[
            text("Фамилия", "motherLastName"),
            text("Имя", "motherFirstName"),
            text("Отчество", "motherMiddleName"),
            country("Гражданство", "motherCitizenship"),
            text("Национальность", "motherNationality"),
        ],
    },
    SectionTemplate {
        title: Some("СВЕДЕНИЯ О РОДИТЕЛЯХ. ОТЕЦ"),
        entries: &[
            text("Фамилия", "fatherLastName"),
            text("Имя", "fatherFirstName"),
            text("Отчество", "fatherMiddleName"),
            country("Гражданство", "fatherCitizenship"),
            text("Национальность", "fatherNationality"),
        ],
    },
    REGISTRATION,
];

const DEATH: &[SectionTemplate] = &[
    SectionTemplate {
        title: None,
        entries: &[
            text("Фамилия", "deceasedLastName"),
            text("Имя", "deceasedFirstName"),
            text("Отчество", "deceasedMiddleName"),
            date("Дата рождения", "birthDate"),
            date("Дата смерти", "deathDate"),
            text("Место смерти", "deathPlace"),
            text("Причина смерти", "deathCause"),
            country("Гражданство", "citizenship"),
            text("Национальность", "nationality"),
            text("Семейное положение", "maritalStatus"),
        ],
    },
    REGISTRATION,
];

const MARRIAGE: &[SectionTemplate] = &[
    SectionTemplate {
        title: Some("ЖЕНИХ"),
        entries: &[
            text("Фамилия до заключения брака", "groomLastName"),
            text("Имя", "groomFirstName"),
            text("Отчество", "groomMiddleName"),
            date("Дата рождения", "groomBirthDate"),
            country("Гражданство", "groomCitizenship"),
            text("Национальность", "groomNationality"),
        ],
    },
    SectionTemplate {
        title: Some("НЕВЕСТА"),
        entries: &[
            text("Фамилия до заключения брака", "brideLastName"),
            text("Имя", "brideFirstName"),
            text("Отчество", "brideMiddleName"),
            date("Дата рождения", "brideBirthDate"),
            country("Гражданство", "brideCitizenship"),
            text("Национальность", "brideNationality"),
        ],
    },
    SectionTemplate {
        title: None,
        entries: &[
            date("Дата заключения брака", "marriageDate"),
            text("Место государственной регистрации", "marriagePlace"),
        ],
    },
    SectionTemplate {
        title: Some("Присвоенные фамилии после заключения брака"),
        entries: &[
            Entry {
                label: "Мужу",
                source: Source::Fallback(&["groomNewLastName", "groomLastName"]),
                format: Format::Text,
            },
            Entry {
                label: "Жене",
                source: Source::Fallback(&["brideNewLastName", "brideLastName"]),
                format: Format::Text,
            },
        ],
    },
    SectionTemplate {
        title: None,
        entries: &[REGISTRATION_DATE, RECORD_NUMBER],
    },
];

const NAME_CHANGE: &[SectionTemplate] = &[
    SectionTemplate {
        title: Some("ПРЕЖНИЕ ДАННЫЕ"),
        entries: &[
            text("Фамилия", "oldLastName"),
            text("Имя", "oldFirstName"),
            text("Отчество", "oldMiddleName"),
        ],
    },
    SectionTemplate {
        title: Some("НОВЫЕ ДАННЫЕ"),
        entries: &[
            text("Фамилия", "newLastName"),
            text("Имя", "newFirstName"),
            text("Отчество", "newMiddleName"),
        ],
    },
    SectionTemplate {
        title: None,
        entries: &[
            date("Дата рождения", "birthDate"),
            text("Место рождения", "birthPlace"),
            country("Гражданство", "citizenship"),
            text("Национальность", "nationality"),
            text("Причина перемены имени", "changeReason"),
        ],
    },
    REGISTRATION,
];

pub fn template_for(doc_type: DocumentType) -> &'static [SectionTemplate] {
    match doc_type {
        DocumentType::Birth => BIRTH,
        DocumentType::Death => DEATH,
        DocumentType::Marriage => MARRIAGE,
        DocumentType::NameChange => NAME_CHANGE,
    }
}
