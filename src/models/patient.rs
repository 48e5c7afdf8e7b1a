use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Gender;

pub type PatientId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u16,
    pub gender: Option<Gender>,
    pub phone: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub emergency_contact: String,
    pub medical_conditions: Vec<String>,
    pub active_medications: u32,
    pub last_visit: NaiveDate,
}

/// Registration form input, exactly as typed. Every field is raw text;
/// `roster::validate_draft` turns it into a typed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: String,
    pub address: String,
    pub emergency_contact: String,
    /// Comma-separated labels, e.g. `"Hypertension, Diabetes Type 2"`.
    pub medical_conditions: String,
}
