use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::DocumentType;
use crate::schema::{certificate_record, FieldSpec};

certificate_record! {
    pub struct BirthRecord {
        child_last_name: "childLastName", "Фамилия ребёнка", Text, required;
        child_first_name: "childFirstName", "Имя ребёнка", Text, required;
        child_middle_name: "childMiddleName", "Отчество ребёнка", Text;
        child_gender: "childGender", "Пол", Text;
        birth_date: "birthDate", "Дата рождения", Date, required;
        birth_place: "birthPlace", "Место рождения", Text;
        mother_last_name: "motherLastName", "Фамилия матери", Text;
        mother_first_name: "motherFirstName", "Имя матери", Text;
        mother_middle_name: "motherMiddleName", "Отчество матери", Text;
        mother_birth_date: "motherBirthDate", "Дата рождения матери", Date;
        mother_citizenship: "motherCitizenship", "Гражданство матери", Text;
        mother_nationality: "motherNationality", "Национальность матери", Text;
        father_last_name: "fatherLastName", "Фамилия отца", Text;
        father_first_name: "fatherFirstName", "Имя отца", Text;
        father_middle_name: "fatherMiddleName", "Отчество отца", Text;
        father_birth_date: "fatherBirthDate", "Дата рождения отца", Date;
        father_citizenship: "fatherCitizenship", "Гражданство отца", Text;
        father_nationality: "fatherNationality", "Национальность отца", Text;
        registration_date: "registrationDate", "Дата составления записи акта", Date;
        registration_place: "registrationPlace", "Место государственной регистрации", Text;
    }
}

certificate_record! {
    pub struct DeathRecord {
        deceased_last_name: "deceasedLastName", "Фамилия", Text, required;
        deceased_first_name: "deceasedFirstName", "Имя", Text, required;
        deceased_middle_name: "deceasedMiddleName", "Отчество", Text;
        birth_date: "birthDate", "Дата рождения", Date;
        death_date: "deathDate", "Дата смерти", Date, required;
        death_place: "deathPlace", "Место смерти", Text;
        death_cause: "deathCause", "Причина смерти", Text;
        citizenship: "citizenship", "Гражданство", Text;
        nationality: "nationality", "Национальность", Text;
        marital_status: "maritalStatus", "Семейное положение", Text;
        last_address: "lastAddress", "Последнее место жительства", Text;
        applicant_name: "applicantName", "ФИО заявителя", Text;
        applicant_relation: "applicantRelation", "Степень родства заявителя", Text;
        registration_date: "registrationDate", "Дата составления записи акта", Date;
        registration_place: "registrationPlace", "Место государственной регистрации", Text;
    }
}

certificate_record! {
    pub struct MarriageRecord {
        groom_last_name: "groomLastName", "Фамилия жениха до заключения брака", Text;
        groom_first_name: "groomFirstName", "Имя жениха", Text, required;
        groom_middle_name: "groomMiddleName", "Отчество жениха", Text;
        groom_birth_date: "groomBirthDate", "Дата рождения жениха", Date;
        groom_citizenship: "groomCitizenship", "Гражданство жениха", Text;
        groom_nationality: "groomNationality", "Национальность жениха", Text;
        groom_new_last_name: "groomNewLastName", "Фамилия мужа после заключения брака", Text;
        bride_last_name: "brideLastName", "Фамилия невесты до заключения брака", Text;
        bride_first_name: "brideFirstName", "Имя невесты", Text, required;
        bride_middle_name: "brideMiddleName", "Отчество невесты", Text;
        bride_birth_date: "brideBirthDate", "Дата рождения невесты", Date;
        bride_citizenship: "brideCitizenship", "Гражданство невесты", Text;
        bride_nationality: "brideNationality", "Национальность невесты", Text;
        bride_new_last_name: "brideNewLastName", "Фамилия жены после заключения брака", Text;
        marriage_date: "marriageDate", "Дата заключения брака", Date, required;
        marriage_place: "marriagePlace", "Место регистрации брака", Text;
        registration_date: "registrationDate", "Дата составления записи акта", Date;
        registration_place: "registrationPlace", "Место государственной регистрации", Text;
    }
}

certificate_record! {
    pub struct NameChangeRecord {
        old_last_name: "oldLastName", "Прежняя фамилия", Text, required;
        old_first_name: "oldFirstName", "Прежнее имя", Text, required;
        old_middle_name: "oldMiddleName", "Прежнее отчество", Text;
        new_last_name: "newLastName", "Новая фамилия", Text, required;
        new_first_name: "newFirstName", "Новое имя", Text, required;
        new_middle_name: "newMiddleName", "Новое отчество", Text;
        birth_date: "birthDate", "Дата рождения", Date;
        birth_place: "birthPlace", "Место рождения", Text;
        citizenship: "citizenship", "Гражданство", Text;
        nationality: "nationality", "Национальность", Text;
        passport_series: "passportSeries", "Серия паспорта", Text;
        passport_number: "passportNumber", "Номер паспорта", Text;
        change_reason: "changeReason", "Причина перемены имени", Text;
        registration_date: "registrationDate", "Дата составления записи акта", Date;
        registration_place: "registrationPlace", "Место государственной регистрации", Text;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "fields", rename_all = "snake_case")]
pub enum CertificateData {
    Birth(BirthRecord),
    Death(DeathRecord),
    Marriage(MarriageRecord),
    NameChange(NameChangeRecord),
}

impl CertificateData {
    pub fn empty(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Birth => CertificateData::Birth(BirthRecord::default()),
            DocumentType::Death => CertificateData::Death(DeathRecord::default()),
            DocumentType::Marriage => CertificateData::Marriage(MarriageRecord::default()),
            DocumentType::NameChange => CertificateData::NameChange(NameChangeRecord::default()),
        }
    }

    /// Parses the flat camelCase field object of a single certificate type.
    pub fn from_json(doc_type: DocumentType, raw: &str) -> AppResult<Self> {
        let data = match doc_type {
            DocumentType::Birth => CertificateData::Birth(serde_json::from_str(raw)?),
            DocumentType::Death => CertificateData::Death(serde_json::from_str(raw)?),
            DocumentType::Marriage => CertificateData::Marriage(serde_json::from_str(raw)?),
            DocumentType::NameChange => CertificateData::NameChange(serde_json::from_str(raw)?),
        };
        Ok(data)
    }

    pub fn doc_type(&self) -> DocumentType {
        match self {
            CertificateData::Birth(_) => DocumentType::Birth,
            CertificateData::Death(_) => DocumentType::Death,
            CertificateData::Marriage(_) => DocumentType::Marriage,
            CertificateData::NameChange(_) => DocumentType::NameChange,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        crate::schema::fields_for(self.doc_type())
    }

    /// Raw stored value, `None` when the key is not part of this type's schema.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            CertificateData::Birth(record) => record.get(key),
            CertificateData::Death(record) => record.get(key),
            CertificateData::Marriage(record) => record.get(key),
            CertificateData::NameChange(record) => record.get(key),
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> AppResult<()> {
        let doc_type = self.doc_type();
        let slot = match self {
            CertificateData::Birth(record) => record.get_mut(key),
            CertificateData::Death(record) => record.get_mut(key),
            CertificateData::Marriage(record) => record.get_mut(key),
            CertificateData::NameChange(record) => record.get_mut(key),
        };
        match slot {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(AppError::unknown_field(doc_type, key)),
        }
    }

    /// Name shown in the registry for a document created from this data.
    pub fn display_name(&self) -> String {
        match self {
            CertificateData::Birth(r) => {
                join_name(&[&r.child_last_name, &r.child_first_name, &r.child_middle_name])
            }
            CertificateData::Death(r) => join_name(&[
                &r.deceased_last_name,
                &r.deceased_first_name,
                &r.deceased_middle_name,
            ]),
            CertificateData::Marriage(r) => {
                let groom =
                    join_name(&[&r.groom_last_name, &r.groom_first_name, &r.groom_middle_name]);
                let bride =
                    join_name(&[&r.bride_last_name, &r.bride_first_name, &r.bride_middle_name]);
                match (groom.is_empty(), bride.is_empty()) {
                    (false, false) => format!("{groom} и {bride}"),
                    (false, true) => groom,
                    _ => bride,
                }
            }
            CertificateData::NameChange(r) => {
                join_name(&[&r.new_last_name, &r.new_first_name, &r.new_middle_name])
            }
        }
    }
}

fn join_name(parts: &[&String]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_by_schema_key() {
        let mut data = CertificateData::empty(DocumentType::Death);
        data.set("deceasedLastName", "Сидоров").unwrap();
        assert_eq!(data.get("deceasedLastName"), Some("Сидоров"));
        assert_eq!(data.get("deathDate"), Some(""));
        assert_eq!(data.get("childLastName"), None);

        let err = data.set("childLastName", "x").unwrap_err();
        assert!(matches!(
            err,
            AppError::UnknownField { doc_type: DocumentType::Death, ref key } if key == "childLastName"
        ));
    }

    #[test]
    fn every_schema_key_is_addressable() {
        for doc_type in DocumentType::ALL {
            let mut data = CertificateData::empty(doc_type);
            for spec in data.fields() {
                data.set(spec.key, spec.label).unwrap();
                assert_eq!(data.get(spec.key), Some(spec.label));
            }
        }
    }

    #[test]
    fn parses_partial_json_for_a_type() {
        let data = CertificateData::from_json(
            DocumentType::Marriage,
            r#"{"groomFirstName": "Алексей", "brideFirstName": "Анна", "marriageDate": "2023-04-15"}"#,
        )
        .unwrap();
        assert_eq!(data.doc_type(), DocumentType::Marriage);
        assert_eq!(data.get("brideFirstName"), Some("Анна"));
        assert_eq!(data.get("brideLastName"), Some(""));

        let err = CertificateData::from_json(DocumentType::Birth, r#"{"deathDate": "x"}"#);
        assert!(matches!(err, Err(AppError::Json(_))));
    }

    #[test]
    fn tagged_json_round_trip_keeps_type() {
        let mut data = CertificateData::empty(DocumentType::NameChange);
        data.set("newLastName", "Козлова").unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["type"], "name_change");
        assert_eq!(value["fields"]["newLastName"], "Козлова");
    }

    #[test]
    fn display_names_per_type() {
        let mut birth = CertificateData::empty(DocumentType::Birth);
        birth.set("childLastName", "Иванов").unwrap();
        birth.set("childFirstName", " Иван ").unwrap();
        assert_eq!(birth.display_name(), "Иванов Иван");

        let mut marriage = CertificateData::empty(DocumentType::Marriage);
        marriage.set("groomFirstName", "Алексей").unwrap();
        marriage.set("groomLastName", "Петров").unwrap();
        marriage.set("brideFirstName", "Анна").unwrap();
        assert_eq!(marriage.display_name(), "Петров Алексей и Анна");

        let mut change = CertificateData::empty(DocumentType::NameChange);
        change.set("oldLastName", "Смирнова").unwrap();
        change.set("newLastName", "Козлова").unwrap();
        change.set("newFirstName", "Мария").unwrap();
        assert_eq!(change.display_name(), "Козлова Мария");
    }
}
