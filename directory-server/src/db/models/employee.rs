//! Employee Model
//!
//! Owns field normalization, the validation rules and the deterministic
//! email-candidate construction. Everything here is pure: the collision
//! probing loop (which needs storage) lives in the repository.

use super::serde_helpers;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::FieldError;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Names: first name and each surname
pub const MAX_NAME_LEN: usize = 20;
/// Optional middle names
pub const MAX_OTHER_NAMES_LEN: usize = 50;
/// Identification number
pub const MAX_ID_NUMBER_LEN: usize = 20;

/// Hiring window: hire_date may not be older than this many days
pub const HIRE_DATE_WINDOW_DAYS: i64 = 31;

/// Numbered email candidates probed before giving up
pub const MAX_EMAIL_PROBES: usize = 100_000;

/// Status assigned to every new record
pub const DEFAULT_STATUS: &str = "Active";

/// Employment country enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmploymentCountry {
    Co,
    Us,
}

impl EmploymentCountry {
    /// Corporate email domain for this country
    pub fn email_domain(self) -> &'static str {
        match self {
            EmploymentCountry::Co => "cidenet.com.co",
            EmploymentCountry::Us => "cidenet.com.us",
        }
    }
}

/// Identification document type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdType {
    Cc,
    Ce,
    Pa,
    Pe,
}

/// Department enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Adm,
    Fin,
    Com,
    Inf,
    Ope,
    Th,
    Sv,
}

/// Employee record
///
/// The full-record response shape: system-owned fields (email, status,
/// timestamps) are always present here and never accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    #[serde(default)]
    pub other_names: String,
    pub first_surname: String,
    pub second_surname: String,
    pub employment_country: EmploymentCountry,
    pub id_type: IdType,
    pub id_number: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub department: Department,
    pub status: String,
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Create employee payload
///
/// Write-request shape: excludes the system-owned fields; unknown keys
/// (including `email`, `status`, `created_at`, `updated_at`) are rejected
/// at deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeCreate {
    pub first_name: String,
    #[serde(default)]
    pub other_names: Option<String>,
    pub first_surname: String,
    pub second_surname: String,
    pub employment_country: EmploymentCountry,
    pub id_type: IdType,
    pub id_number: String,
    pub hire_date: NaiveDate,
    pub department: Department,
}

/// Update employee payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_country: Option<EmploymentCountry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<IdType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

/// Trim surrounding whitespace and uppercase a name field (idempotent)
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn is_upper_alpha(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_uppercase())
}

fn is_upper_alpha_space(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_whitespace())
}

/// Build one email candidate from the probing sequence
///
/// Candidate 0 is the bare local part; candidate N appends `.N`.
pub fn email_candidate(local_part: &str, domain: &str, attempt: usize) -> String {
    if attempt == 0 {
        format!("{local_part}@{domain}")
    } else {
        format!("{local_part}.{attempt}@{domain}")
    }
}

impl Employee {
    /// Build a draft record from a create payload
    ///
    /// The email is assigned later by the repository's generation loop.
    pub fn from_create(data: EmployeeCreate, created_at: i64) -> Self {
        Self {
            id: None,
            first_name: data.first_name,
            other_names: data.other_names.unwrap_or_default(),
            first_surname: data.first_surname,
            second_surname: data.second_surname,
            employment_country: data.employment_country,
            id_type: data.id_type,
            id_number: data.id_number,
            email: String::new(),
            hire_date: data.hire_date,
            department: data.department,
            status: DEFAULT_STATUS.to_string(),
            created_at,
            updated_at: None,
        }
    }

    /// Merge a partial update into this record
    ///
    /// Email, status and created_at are not part of the payload shape and
    /// therefore cannot change here.
    pub fn apply_update(&mut self, data: EmployeeUpdate, updated_at: i64) {
        if let Some(v) = data.first_name {
            self.first_name = v;
        }
        if let Some(v) = data.other_names {
            self.other_names = v;
        }
        if let Some(v) = data.first_surname {
            self.first_surname = v;
        }
        if let Some(v) = data.second_surname {
            self.second_surname = v;
        }
        if let Some(v) = data.employment_country {
            self.employment_country = v;
        }
        if let Some(v) = data.id_type {
            self.id_type = v;
        }
        if let Some(v) = data.id_number {
            self.id_number = v;
        }
        if let Some(v) = data.hire_date {
            self.hire_date = v;
        }
        if let Some(v) = data.department {
            self.department = v;
        }
        self.updated_at = Some(updated_at);
    }

    /// Normalize the name fields in place (runs before validation on every save)
    pub fn normalize(&mut self) {
        self.first_name = normalize_name(&self.first_name);
        self.other_names = normalize_name(&self.other_names);
        self.first_surname = normalize_name(&self.first_surname);
        self.second_surname = normalize_name(&self.second_surname);
    }

    /// Validate the normalized record against `today`
    ///
    /// Reports every violated rule, each tagged with the offending field.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("first_name", &self.first_name),
            ("first_surname", &self.first_surname),
            ("second_surname", &self.second_surname),
            ("id_number", &self.id_number),
        ] {
            if value.is_empty() {
                errors.push(FieldError::required(field));
            }
        }

        if !self.first_name.is_empty() && !is_upper_alpha(&self.first_name) {
            errors.push(FieldError::new(
                "first_name",
                "only uppercase letters A-Z are allowed, without spaces",
            ));
        }
        for (field, value) in [
            ("other_names", &self.other_names),
            ("first_surname", &self.first_surname),
            ("second_surname", &self.second_surname),
        ] {
            if !value.is_empty() && !is_upper_alpha_space(value) {
                errors.push(FieldError::new(
                    field,
                    "only uppercase letters A-Z and spaces are allowed",
                ));
            }
        }

        for (field, value, max_len) in [
            ("first_name", &self.first_name, MAX_NAME_LEN),
            ("other_names", &self.other_names, MAX_OTHER_NAMES_LEN),
            ("first_surname", &self.first_surname, MAX_NAME_LEN),
            ("second_surname", &self.second_surname, MAX_NAME_LEN),
            ("id_number", &self.id_number, MAX_ID_NUMBER_LEN),
        ] {
            if value.chars().count() > max_len {
                errors.push(FieldError::new(
                    field,
                    format!("must be at most {max_len} characters"),
                ));
            }
        }

        if self.hire_date > today {
            errors.push(FieldError::new(
                "hire_date",
                "hire date cannot be in the future",
            ));
        } else if self.hire_date < today - Duration::days(HIRE_DATE_WINDOW_DAYS) {
            errors.push(FieldError::new(
                "hire_date",
                format!("hire date cannot be older than {HIRE_DATE_WINDOW_DAYS} days"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Local part base for the generated email
    ///
    /// Lowercased first name, a dot, and the lowercased first surname with
    /// internal whitespace removed (composite surnames collapse to one token).
    pub fn email_local_part(&self) -> String {
        let surname: String = self.first_surname.to_lowercase().split_whitespace().collect();
        format!("{}.{}", self.first_name.to_lowercase(), surname)
    }
}
