//! Boundary validation of loosely-typed payloads.
//!
//! Everything that reaches the pipeline goes through here first: JSON request
//! bodies, CLI input and imported records become either a typed record or a
//! [`ValidationError`] naming the offending field.
//!
//! Date and time fields are checked for shape only (`YYYY-MM-DD`, `HH:mm`).
//! A well-shaped but impossible value such as `2025-02-30` is accepted and
//! later counts as a zero-length entry.

use crate::libs::client::{ClientKind, ClientRecord};
use crate::libs::entry::{Location, WorkEntry};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

const DATE_SHAPE: &str = "dddd-dd-dd";
const TIME_SHAPE: &str = "dd:dd";
const NAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must be formatted as {expected}, got '{value}'")]
    Format {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("malformed payload: {0}")]
    Payload(String),
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Missing { field } | ValidationError::Format { field, .. } | ValidationError::Invalid { field, .. } => Some(*field),
            ValidationError::Payload(_) => None,
        }
    }
}

/// Work entry payload as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub has_break: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_start_hour: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_start_min: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_end_hour: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_end_min: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hourly_rate: Option<f64>,
    #[serde(default, alias = "employerId")]
    pub client_id: Option<String>,
    #[serde(default, alias = "projectName", alias = "employerName")]
    pub client_name: Option<String>,
    #[serde(default)]
    pub activity_id: Option<String>,
    #[serde(default)]
    pub activity_name: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewWorkEntry {
    /// Validates the payload into a [`WorkEntry`], keeping a supplied id or
    /// generating a fresh one.
    pub fn validate(self) -> Result<WorkEntry, ValidationError> {
        let user_id = required("userId", self.user_id)?;
        let start_date = shaped("startDate", required("startDate", self.start_date)?, DATE_SHAPE, "YYYY-MM-DD")?;
        let start_time = shaped("startTime", required("startTime", self.start_time)?, TIME_SHAPE, "HH:mm")?;
        let end_date = shaped("endDate", required("endDate", self.end_date)?, DATE_SHAPE, "YYYY-MM-DD")?;
        let end_time = shaped("endTime", required("endTime", self.end_time)?, TIME_SHAPE, "HH:mm")?;

        Ok(WorkEntry {
            id: trimmed(self.id).unwrap_or_else(WorkEntry::generate_id),
            user_id,
            start_date,
            start_time,
            end_date,
            end_time,
            has_break: self.has_break.unwrap_or(false),
            break_start_hour: clock_part("breakStartHour", self.break_start_hour)?,
            break_start_min: clock_part("breakStartMin", self.break_start_min)?,
            break_end_hour: clock_part("breakEndHour", self.break_end_hour)?,
            break_end_min: clock_part("breakEndMin", self.break_end_min)?,
            category: trimmed(self.category),
            hourly_rate: rate("hourlyRate", self.hourly_rate)?,
            client_id: trimmed(self.client_id),
            client_name: trimmed(self.client_name),
            activity_id: trimmed(self.activity_id),
            activity_name: trimmed(self.activity_name),
            location: self.location,
            comment: trimmed(self.comment),
            created_at: None,
            updated_at: None,
        })
    }
}

/// Partial update of a work entry. Absent fields are left untouched; an
/// explicit `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub has_break: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_start_hour: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_start_min: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_end_hour: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub break_end_min: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_number")]
    pub hourly_rate: Option<Option<f64>>,
    #[serde(default, alias = "employerId", deserialize_with = "nullable")]
    pub client_id: Option<Option<String>>,
    #[serde(default, alias = "projectName", alias = "employerName", deserialize_with = "nullable")]
    pub client_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub activity_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub activity_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<Location>>,
    #[serde(default, deserialize_with = "nullable")]
    pub comment: Option<Option<String>>,
}

impl EntryPatch {
    /// Applies the patch to `entry`. On error `entry` is left unchanged.
    pub fn apply(self, entry: &mut WorkEntry) -> Result<(), ValidationError> {
        let mut updated = entry.clone();

        if let Some(v) = self.start_date {
            updated.start_date = shaped("startDate", v, DATE_SHAPE, "YYYY-MM-DD")?;
        }
        if let Some(v) = self.start_time {
            updated.start_time = shaped("startTime", v, TIME_SHAPE, "HH:mm")?;
        }
        if let Some(v) = self.end_date {
            updated.end_date = shaped("endDate", v, DATE_SHAPE, "YYYY-MM-DD")?;
        }
        if let Some(v) = self.end_time {
            updated.end_time = shaped("endTime", v, TIME_SHAPE, "HH:mm")?;
        }
        if let Some(v) = self.has_break {
            updated.has_break = v;
        }
        if self.break_start_hour.is_some() {
            updated.break_start_hour = clock_part("breakStartHour", self.break_start_hour)?;
        }
        if self.break_start_min.is_some() {
            updated.break_start_min = clock_part("breakStartMin", self.break_start_min)?;
        }
        if self.break_end_hour.is_some() {
            updated.break_end_hour = clock_part("breakEndHour", self.break_end_hour)?;
        }
        if self.break_end_min.is_some() {
            updated.break_end_min = clock_part("breakEndMin", self.break_end_min)?;
        }
        if let Some(v) = self.hourly_rate {
            updated.hourly_rate = rate("hourlyRate", v)?;
        }
        if let Some(v) = self.location {
            updated.location = v;
        }
        for (target, value) in [
            (&mut updated.category, self.category),
            (&mut updated.client_id, self.client_id),
            (&mut updated.client_name, self.client_name),
            (&mut updated.activity_id, self.activity_id),
            (&mut updated.activity_name, self.activity_name),
            (&mut updated.comment, self.comment),
        ] {
            if let Some(v) = value {
                *target = trimmed(v);
            }
        }

        *entry = updated;
        Ok(())
    }
}

/// Outcome of validating a batch of raw records.
#[derive(Debug, Default)]
pub struct Ingested {
    pub entries: Vec<WorkEntry>,
    pub skipped: Vec<(usize, ValidationError)>,
}

/// Validates raw JSON records, keeping the valid ones. Rejected records are
/// reported by index and logged.
pub fn ingest(values: Vec<Value>) -> Ingested {
    let mut ingested = Ingested::default();
    for (index, value) in values.into_iter().enumerate() {
        let result = serde_json::from_value::<NewWorkEntry>(value)
            .map_err(|e| ValidationError::Payload(e.to_string()))
            .and_then(NewWorkEntry::validate);
        match result {
            Ok(entry) => ingested.entries.push(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping invalid work entry");
                ingested.skipped.push((index, e));
            }
        }
    }
    ingested
}

/// Sign-up payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Sign-up payload after validation. The email is trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSignup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

impl SignupRequest {
    pub fn validate(self) -> Result<ValidSignup, ValidationError> {
        let first_name = person_name("firstName", required("firstName", self.first_name)?)?;
        let last_name = person_name("lastName", required("lastName", self.last_name)?)?;
        let email = email(required("email", self.email)?)?;
        let password = self.password.ok_or(ValidationError::Missing { field: "password" })?;
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ValidationError::Invalid {
                field: "password",
                reason: format!("must be at least {} characters", PASSWORD_MIN_LEN),
            });
        }
        Ok(ValidSignup {
            first_name,
            last_name,
            email,
            password,
            phone: trimmed(self.phone),
        })
    }
}

/// Profile update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl UserPatch {
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: self.first_name.map(|v| person_name("firstName", v)).transpose()?,
            last_name: self.last_name.map(|v| person_name("lastName", v)).transpose()?,
            email: self.email.map(email).transpose()?,
            phone: self.phone.map(|v| v.trim().to_string()),
            avatar_url: self.avatar_url.map(|v| v.trim().to_string()),
        })
    }
}

/// Client or activity payload, used both for creation and partial updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ClientKind>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub default_rate: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub siret: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ClientPayload {
    pub fn into_record(self, user_id: &str) -> Result<ClientRecord, ValidationError> {
        let name = required("name", self.name)?;
        let mut record = ClientRecord::new(user_id, &name, self.kind.unwrap_or_default(), rate("defaultRate", self.default_rate)?);
        record.color = trimmed(self.color);
        record.address = trimmed(self.address);
        record.city = trimmed(self.city);
        record.postal_code = trimmed(self.postal_code);
        record.siret = trimmed(self.siret);
        record.description = trimmed(self.description);
        Ok(record)
    }

    pub fn apply(self, record: &mut ClientRecord) -> Result<(), ValidationError> {
        let mut updated = record.clone();
        if let Some(name) = self.name {
            updated.name = required("name", Some(name))?;
        }
        if let Some(kind) = self.kind {
            updated.kind = kind;
        }
        if self.default_rate.is_some() {
            updated.default_rate = rate("defaultRate", self.default_rate)?;
        }
        for (target, value) in [
            (&mut updated.color, self.color),
            (&mut updated.address, self.address),
            (&mut updated.city, self.city),
            (&mut updated.postal_code, self.postal_code),
            (&mut updated.siret, self.siret),
            (&mut updated.description, self.description),
        ] {
            if value.is_some() {
                *target = trimmed(value);
            }
        }
        *record = updated;
        Ok(())
    }
}

/// Optional period bound such as `from` or `to`. Blank reads as absent.
pub fn period_bound(field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    trimmed(value).map(|v| shaped(field, v, DATE_SHAPE, "YYYY-MM-DD")).transpose()
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    trimmed(value).ok_or(ValidationError::Missing { field })
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Checks `value` against a shape where `d` stands for an ASCII digit and
/// every other character must match literally.
fn shaped(field: &'static str, value: String, shape: &str, expected: &'static str) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    let matches = value.len() == shape.len()
        && value.chars().zip(shape.chars()).all(|(c, s)| match s {
            'd' => c.is_ascii_digit(),
            literal => c == literal,
        });
    if matches {
        Ok(value)
    } else {
        Err(ValidationError::Format { field, expected, value })
    }
}

fn clock_part(field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    match trimmed(value) {
        None => Ok(None),
        Some(v) if (1..=2).contains(&v.len()) && v.chars().all(|c| c.is_ascii_digit()) => Ok(Some(v)),
        Some(v) => Err(ValidationError::Format {
            field,
            expected: "1-2 digits",
            value: v,
        }),
    }
}

fn rate(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(ValidationError::Invalid {
            field,
            reason: "must be a non-negative number".to_string(),
        }),
        other => Ok(other),
    }
}

fn person_name(field: &'static str, value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    let len = value.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("must be between 1 and {} characters", NAME_MAX_LEN),
        });
    }
    Ok(value)
}

fn email(value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_lowercase();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(value)
    } else {
        Err(ValidationError::Format {
            field: "email",
            expected: "an email address",
            value,
        })
    }
}

/// Accepts strings and numbers, so `"12"` and `12` both read as `"12"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("expected string or number, got {}", other))),
    }
}

/// Accepts numbers and numeric strings. Blank strings read as absent.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{}'", s))),
        Some(other) => Err(serde::de::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Tells an explicit `null` (`Some(None)`) from an absent field (`None`,
/// through `#[serde(default)]`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn nullable_number<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_number(deserializer).map(Some)
}
