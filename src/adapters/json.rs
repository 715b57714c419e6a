//! JSON document adapter: maps the wire document onto a [`PatientRiskRecord`].
//!
//! Every key is optional and absent keys keep the record's defaults. Keys are
//! dispatched through [`DocumentField`], so an unknown key is rejected before
//! any setter runs.

use std::io::Read;

use serde_json::{Map, Value};

use crate::domain::{
    categorical, BmiCategory, Categorical, Disease, IrsadDecile, MedicationGroup, PathologyCategory,
    PathologyTest, PatientRiskRecord, RecordError,
};

categorical! {
    /// Top-level keys of the patient document.
    pub enum DocumentField in "document" {
        Age => "Age",
        IsFemale => "IsFemale",
        Ethnicity => "Ethnicity",
        BmiCategory => "BMICategory",
        SmokingStatus => "SmokingStatus",
        AlcoholStatus => "AlcoholStatus",
        IrsadDecile => "IRSADDecile",
        MedicationGroups => "MedicationGroups",
        Diseases => "Diseases",
        Pathology => "Pathology",
    }
}

impl DocumentField {
    /// Resolve a document key.
    ///
    /// # Errors
    /// Returns `RecordError::UnknownField` for keys the model does not use.
    pub fn from_key(key: &str) -> Result<Self, RecordError> {
        key.parse()
            .map_err(|_| RecordError::UnknownField(key.to_string()))
    }
}

/// Parse a JSON document into a record.
///
/// # Errors
/// Returns `PrmError::Json` for malformed JSON and `PrmError::Record` when
/// the document does not describe a valid record.
pub fn record_from_str(text: &str) -> crate::Result<PatientRiskRecord> {
    let value: Value = serde_json::from_str(text)?;
    Ok(record_from_value(&value)?)
}

/// Read and parse a JSON document.
///
/// # Errors
/// As [`record_from_str`]; I/O failures surface as `PrmError::Json`.
pub fn record_from_reader<R: Read>(reader: R) -> crate::Result<PatientRiskRecord> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(record_from_value(&value)?)
}

/// Build a record from an already parsed document.
///
/// # Errors
/// Returns the first `RecordError` encountered; the document must be a JSON
/// object.
pub fn record_from_value(value: &Value) -> Result<PatientRiskRecord, RecordError> {
    let fields = value.as_object().ok_or(RecordError::WrongType {
        field: DocumentField::FIELD,
        expected: "an object",
    })?;

    let mut record = PatientRiskRecord::new();
    for (key, value) in fields {
        apply(&mut record, DocumentField::from_key(key)?, value)?;
    }
    Ok(record)
}

fn apply(
    record: &mut PatientRiskRecord,
    field: DocumentField,
    value: &Value,
) -> Result<(), RecordError> {
    match field {
        DocumentField::Age => {
            record.set_age(age(value)?)?;
        }
        DocumentField::IsFemale => {
            record.set_is_female(flag(field, value)?);
        }
        DocumentField::Ethnicity => {
            record.set_ethnicity(variant(value)?);
        }
        DocumentField::BmiCategory => {
            record.set_bmi_category(variant_or_number(value, BmiCategory::from_bmi)?);
        }
        DocumentField::SmokingStatus => {
            record.set_smoking_status(variant(value)?);
        }
        DocumentField::AlcoholStatus => {
            record.set_alcohol_status(variant(value)?);
        }
        DocumentField::IrsadDecile => {
            let decile = variant_or_number(value, |rank| {
                if rank.fract() == 0.0 {
                    IrsadDecile::from_rank(rank as i64)
                } else {
                    Err(wrong_type(field, "a decile name or an integer 1-10"))
                }
            })?;
            record.set_irsad_decile(decile);
        }
        DocumentField::MedicationGroups => {
            record.set_medication_groups(variants::<MedicationGroup>(value)?);
        }
        DocumentField::Diseases => {
            record.set_diseases(variants::<Disease>(value)?);
        }
        DocumentField::Pathology => {
            let results = value
                .as_object()
                .ok_or_else(|| wrong_type(field, "an object of test results"))?;
            pathology(record, results)?;
        }
    }
    Ok(())
}

fn wrong_type(field: DocumentField, expected: &'static str) -> RecordError {
    RecordError::WrongType {
        field: field.as_str(),
        expected,
    }
}

/// A JSON number or a numeric string.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn age(value: &Value) -> Result<f64, RecordError> {
    number(value).ok_or_else(|| wrong_type(DocumentField::Age, "a number of years"))
}

fn flag(field: DocumentField, value: &Value) -> Result<bool, RecordError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        _ => Err(wrong_type(field, "a boolean")),
    }
}

/// A single variant name.
fn variant<T>(value: &Value) -> Result<T, RecordError>
where
    T: Categorical,
{
    match value {
        Value::String(s) => s.parse(),
        _ => Err(RecordError::WrongType {
            field: T::FIELD,
            expected: "a variant name",
        }),
    }
}

/// A variant name, falling back to `from_number` for numbers and numeric
/// strings.
fn variant_or_number<T, F>(value: &Value, from_number: F) -> Result<T, RecordError>
where
    T: Categorical,
    F: FnOnce(f64) -> Result<T, RecordError>,
{
    match variant(value) {
        Ok(named) => Ok(named),
        Err(err) => number(value).map_or(Err(err), from_number),
    }
}

/// An array of variant names.
fn variants<T>(value: &Value) -> Result<Vec<T>, RecordError>
where
    T: Categorical,
{
    let items = value.as_array().ok_or(RecordError::WrongType {
        field: T::FIELD,
        expected: "an array of names",
    })?;
    items.iter().map(variant).collect()
}

fn pathology(
    record: &mut PatientRiskRecord,
    results: &Map<String, Value>,
) -> Result<(), RecordError> {
    for (key, value) in results {
        let test: PathologyTest = key.parse()?;
        let category: PathologyCategory = variant(value)?;
        record.set_pathology(test, category);
    }
    Ok(())
}
