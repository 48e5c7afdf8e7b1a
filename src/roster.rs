//! Patient roster: search filter and registration.
//!
//! The roster is the only collection that changes at runtime: patients are
//! appended through the registration form and may be removed. Identifiers
//! come from a monotonic counter, so a removed patient's id is never handed
//! out again.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::TrackerError;
use crate::models::{ContactValidation, Gender, MedicationLog, Patient, PatientDraft, PatientId};

/// Upper bound accepted for a patient's age.
pub const MAX_PATIENT_AGE: u16 = 150;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9()\-.\s]+$").unwrap());

// ═══════════════════════════════════════════
// Filtering
// ═══════════════════════════════════════════

/// Patients whose name or email contains `query`, ignoring case.
///
/// Order is preserved. An empty query returns every patient; whitespace is
/// part of the query and must appear in the name or email.
pub fn filter_patients(patients: &[Patient], query: &str) -> Vec<Patient> {
    if query.is_empty() {
        return patients.to_vec();
    }
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Medication logs recorded against this patient, matched by name.
pub fn logs_for_patient(logs: &[MedicationLog], patient: &Patient) -> Vec<MedicationLog> {
    logs.iter()
        .filter(|log| log.patient.trim().eq_ignore_ascii_case(patient.name.trim()))
        .cloned()
        .collect()
}

// ═══════════════════════════════════════════
// Draft validation
// ═══════════════════════════════════════════

/// Split the comma-separated conditions field into trimmed labels.
/// Blank entries are dropped, so `""` yields an empty list.
pub fn split_conditions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect()
}

/// Typed fields extracted from a [`PatientDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDraft {
    pub name: String,
    pub age: u16,
    pub gender: Option<Gender>,
    pub phone: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
    pub emergency_contact: String,
    pub medical_conditions: Vec<String>,
}

pub fn validate_draft(
    draft: &PatientDraft,
    contact_policy: ContactValidation,
    today: NaiveDate,
) -> Result<ValidatedDraft, TrackerError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(TrackerError::validation("name", "is required"));
    }

    let age = parse_age(&draft.age)?;

    let gender = match draft.gender.trim() {
        "" => None,
        raw => Some(Gender::parse_loose(raw).ok_or_else(|| {
            TrackerError::validation("gender", format!("{raw:?} is not one of male, female, other"))
        })?),
    };

    let date_of_birth = match draft.date_of_birth.trim() {
        "" => None,
        raw => {
            let dob = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                TrackerError::validation("date_of_birth", "expected YYYY-MM-DD")
            })?;
            if dob > today {
                return Err(TrackerError::validation(
                    "date_of_birth",
                    "cannot be in the future",
                ));
            }
            Some(dob)
        }
    };

    let phone = draft.phone.trim().to_string();
    let email = draft.email.trim().to_string();
    if contact_policy == ContactValidation::Strict {
        check_email(&email)?;
        check_phone(&phone)?;
    }

    Ok(ValidatedDraft {
        name: name.to_string(),
        age,
        gender,
        phone,
        email,
        date_of_birth,
        address: draft.address.trim().to_string(),
        emergency_contact: draft.emergency_contact.trim().to_string(),
        medical_conditions: split_conditions(&draft.medical_conditions),
    })
}

fn parse_age(raw: &str) -> Result<u16, TrackerError> {
    let raw = raw.trim();
    match raw.parse::<u16>() {
        Ok(age) if age <= MAX_PATIENT_AGE => Ok(age),
        Ok(_) => Err(TrackerError::validation(
            "age",
            format!("must be at most {MAX_PATIENT_AGE}"),
        )),
        Err(_) if raw.parse::<i64>().is_ok_and(|n| n < 0) => {
            Err(TrackerError::validation("age", "must not be negative"))
        }
        Err(_) => Err(TrackerError::validation(
            "age",
            format!("{raw:?} is not a whole number"),
        )),
    }
}

fn check_email(email: &str) -> Result<(), TrackerError> {
    if email.is_empty() || EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(TrackerError::validation("email", "expected name@domain.tld"))
    }
}

fn check_phone(phone: &str) -> Result<(), TrackerError> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if PHONE_PATTERN.is_match(phone) && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(TrackerError::validation(
            "phone",
            "expected 7 to 15 digits with optional ( ) - . + separators",
        ))
    }
}

// ═══════════════════════════════════════════
// Roster
// ═══════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Roster {
    patients: Vec<Patient>,
    next_id: PatientId,
}

impl Roster {
    /// Seed from an initial collection. The counter starts past the
    /// largest existing identifier.
    pub fn new(patients: Vec<Patient>) -> Self {
        let next_id = patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { patients, next_id }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<Patient> {
        filter_patients(&self.patients, query)
    }

    pub fn get(&self, id: PatientId) -> Result<&Patient, TrackerError> {
        self.patients
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| TrackerError::not_found("patient", id))
    }

    /// Validate and append a new patient. The roster is untouched on error.
    pub fn register(
        &mut self,
        draft: &PatientDraft,
        contact_policy: ContactValidation,
        today: NaiveDate,
    ) -> Result<Patient, TrackerError> {
        let valid = validate_draft(draft, contact_policy, today)?;

        let patient = Patient {
            id: self.next_id,
            name: valid.name,
            age: valid.age,
            gender: valid.gender,
            phone: valid.phone,
            email: valid.email,
            date_of_birth: valid.date_of_birth,
            address: valid.address,
            emergency_contact: valid.emergency_contact,
            medical_conditions: valid.medical_conditions,
            active_medications: 0,
            last_visit: today,
        };

        self.next_id += 1;
        self.patients.push(patient.clone());
        Ok(patient)
    }

    pub fn remove(&mut self, id: PatientId) -> Result<Patient, TrackerError> {
        let index = self
            .patients
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| TrackerError::not_found("patient", id))?;
        Ok(self.patients.remove(index))
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
