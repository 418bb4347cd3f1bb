//! Job application aggregate.
//!
//! A [`JobApplication`] is created from validated [`ApplicationDetails`],
//! mutated only by merging an [`ApplicationPatch`], and persisted by a
//! repository adapter. Raw caller input arrives as [`ApplicationInput`] and is
//! validated here so every adapter shares the same rules:
//!
//! - `company`, `role` and `status` are non-empty for every record.
//! - Optional free-form text is kept as written but never stored blank.
//! - `link`, when present, parses as an absolute URL.
//! - Timestamps carry millisecond precision and `created_at <= updated_at`.

mod status;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

pub use status::ApplicationStatus;

/// Message returned when a create request lacks a required field.
pub const REQUIRED_FIELDS_MESSAGE: &str = "company, role and status are required";

/// Validation failures for application input and stored records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    /// One or more required fields are missing or empty on create.
    #[error("company, role and status are required")]
    MissingRequired { fields: Vec<&'static str> },
    /// A required field was supplied as an empty value on update.
    #[error("{field} must not be empty")]
    EmptyRequired { field: &'static str },
    /// The status is not one of the known values.
    #[error("status must be one of wishlist, applied, interview, offer, rejected")]
    InvalidStatus { value: String },
    /// The link is not a well-formed URL.
    #[error("link must be a valid URL")]
    InvalidLink { value: String },
    /// The identifier is blank.
    #[error("application id must not be empty")]
    EmptyId,
    /// A stored record has `created_at` after `updated_at`.
    #[error("createdAt must not be later than updatedAt")]
    TimestampOrder,
}

/// Opaque, immutable record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Validate a caller-supplied identifier.
    ///
    /// # Examples
    /// ```
    /// use jobtrack::domain::ApplicationId;
    ///
    /// let id = ApplicationId::new("abc").expect("non-empty id");
    /// assert_eq!(id.as_ref(), "abc");
    /// assert!(ApplicationId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ApplicationValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ApplicationValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Mint a fresh identifier for a new record.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = ApplicationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ApplicationId> for String {
    fn from(value: ApplicationId) -> Self {
        value.0
    }
}

/// Raw, unvalidated field values supplied by a caller.
///
/// Used for both create (all required fields expected) and update (any
/// subset). `None` means "not supplied"; unsupplied fields are not
/// serialised so a partial update never sends keys it does not mean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn trimmed_non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Free-form text is stored as written; blank text counts as absent.
fn verbatim_non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn checked_link(link: Option<String>) -> Result<Option<String>, ApplicationValidationError> {
    match trimmed_non_empty(link) {
        Some(link) => match Url::parse(&link) {
            Ok(_) => Ok(Some(link)),
            Err(_) => Err(ApplicationValidationError::InvalidLink { value: link }),
        },
        None => Ok(None),
    }
}

/// Validated mutable fields of a job application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDetails {
    company: String,
    role: String,
    status: ApplicationStatus,
    location: Option<String>,
    link: Option<String>,
    source: Option<String>,
    salary: Option<String>,
    notes: Option<String>,
}

impl ApplicationDetails {
    /// Validate create input.
    ///
    /// Missing or empty required fields are reported together so the caller
    /// can correct them in one pass.
    ///
    /// # Examples
    /// ```
    /// use jobtrack::domain::{ApplicationDetails, ApplicationInput, ApplicationStatus};
    ///
    /// let details = ApplicationDetails::try_from_input(ApplicationInput {
    ///     company: Some("Acme".to_owned()),
    ///     role: Some("Engineer".to_owned()),
    ///     status: Some("applied".to_owned()),
    ///     notes: Some(String::new()),
    ///     ..ApplicationInput::default()
    /// })
    /// .expect("valid input");
    /// assert_eq!(details.status(), ApplicationStatus::Applied);
    /// assert_eq!(details.notes(), None);
    /// ```
    pub fn try_from_input(input: ApplicationInput) -> Result<Self, ApplicationValidationError> {
        let ApplicationInput {
            company,
            role,
            status,
            location,
            link,
            source,
            salary,
            notes,
        } = input;

        let (company, role, status) = match (
            trimmed_non_empty(company),
            trimmed_non_empty(role),
            trimmed_non_empty(status),
        ) {
            (Some(company), Some(role), Some(status)) => (company, role, status),
            (company, role, status) => {
                let fields = [
                    ("company", company.is_none()),
                    ("role", role.is_none()),
                    ("status", status.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                return Err(ApplicationValidationError::MissingRequired { fields });
            }
        };

        Ok(Self {
            company,
            role,
            status: status.parse()?,
            location: verbatim_non_blank(location),
            link: checked_link(link)?,
            source: verbatim_non_blank(source),
            salary: verbatim_non_blank(salary),
            notes: verbatim_non_blank(notes),
        })
    }

    /// Company name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Role title.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Pipeline status.
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Location, when recorded.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Posting URL, when recorded.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Where the posting was found.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Free-form salary text.
    pub fn salary(&self) -> Option<&str> {
        self.salary.as_deref()
    }

    /// Free-form notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Validated partial update.
///
/// Outer `None` leaves a field untouched. For optional fields the inner
/// `None` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
    company: Option<String>,
    role: Option<String>,
    status: Option<ApplicationStatus>,
    location: Option<Option<String>>,
    link: Option<Option<String>>,
    source: Option<Option<String>>,
    salary: Option<Option<String>>,
    notes: Option<Option<String>>,
}

fn required_change(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ApplicationValidationError> {
    match value {
        None => Ok(None),
        Some(raw) => trimmed_non_empty(Some(raw))
            .map(Some)
            .ok_or(ApplicationValidationError::EmptyRequired { field }),
    }
}

fn optional_change(value: Option<String>) -> Option<Option<String>> {
    value.map(|raw| verbatim_non_blank(Some(raw)))
}

impl ApplicationPatch {
    /// Validate update input.
    ///
    /// # Examples
    /// ```
    /// use jobtrack::domain::{ApplicationInput, ApplicationPatch};
    ///
    /// let patch = ApplicationPatch::try_from_input(ApplicationInput {
    ///     status: Some("interview".to_owned()),
    ///     ..ApplicationInput::default()
    /// })
    /// .expect("valid patch");
    /// assert!(!patch.is_empty());
    /// ```
    pub fn try_from_input(input: ApplicationInput) -> Result<Self, ApplicationValidationError> {
        let status = match required_change(input.status, "status")? {
            Some(raw) => Some(raw.parse::<ApplicationStatus>()?),
            None => None,
        };
        let link = match input.link {
            Some(raw) => Some(checked_link(Some(raw))?),
            None => None,
        };

        Ok(Self {
            company: required_change(input.company, "company")?,
            role: required_change(input.role, "role")?,
            status,
            location: optional_change(input.location),
            link,
            source: optional_change(input.source),
            salary: optional_change(input.salary),
            notes: optional_change(input.notes),
        })
    }

    /// Whether the patch changes no field.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(&self, details: &mut ApplicationDetails) {
        fn replace<T: Clone>(target: &mut T, change: Option<&T>) {
            if let Some(value) = change {
                *target = value.clone();
            }
        }

        replace(&mut details.company, self.company.as_ref());
        replace(&mut details.role, self.role.as_ref());
        replace(&mut details.status, self.status.as_ref());
        replace(&mut details.location, self.location.as_ref());
        replace(&mut details.link, self.link.as_ref());
        replace(&mut details.source, self.source.as_ref());
        replace(&mut details.salary, self.salary.as_ref());
        replace(&mut details.notes, self.notes.as_ref());
    }
}

/// Serialised shape of a job application, shared by the JSON file store and
/// the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationRecord {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JobApplicationRecord", into = "JobApplicationRecord")]
pub struct JobApplication {
    id: ApplicationId,
    details: ApplicationDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(3)
}

impl JobApplication {
    /// Build a new record; both timestamps are set to `now`.
    pub fn create(id: ApplicationId, details: ApplicationDetails, now: DateTime<Utc>) -> Self {
        let now = to_millis(now);
        Self {
            id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `patch` into a copy of this record and refresh `updated_at`.
    ///
    /// `updated_at` strictly increases even if the clock has not advanced
    /// past the previous value.
    #[must_use]
    pub fn with_changes(&self, patch: &ApplicationPatch, now: DateTime<Utc>) -> Self {
        let mut details = self.details.clone();
        patch.apply_to(&mut details);

        let now = to_millis(now);
        let updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };

        Self {
            id: self.id.clone(),
            details,
            created_at: self.created_at,
            updated_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    /// Validated field values.
    pub fn details(&self) -> &ApplicationDetails {
        &self.details
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl TryFrom<JobApplicationRecord> for JobApplication {
    type Error = ApplicationValidationError;

    fn try_from(record: JobApplicationRecord) -> Result<Self, Self::Error> {
        let JobApplicationRecord {
            id,
            company,
            role,
            status,
            location,
            link,
            source,
            salary,
            notes,
            created_at,
            updated_at,
        } = record;

        if created_at > updated_at {
            return Err(ApplicationValidationError::TimestampOrder);
        }

        let details = ApplicationDetails::try_from_input(ApplicationInput {
            company: Some(company),
            role: Some(role),
            status: Some(status),
            location,
            link: None,
            source,
            salary,
            notes,
        })?;

        Ok(Self {
            id: ApplicationId::new(id)?,
            details: ApplicationDetails {
                // Stored links are kept verbatim; they were checked on write.
                link: trimmed_non_empty(link),
                ..details
            },
            created_at,
            updated_at,
        })
    }
}

impl From<JobApplication> for JobApplicationRecord {
    fn from(value: JobApplication) -> Self {
        let JobApplication {
            id,
            details,
            created_at,
            updated_at,
        } = value;
        Self {
            id: id.into(),
            company: details.company,
            role: details.role,
            status: details.status.as_str().to_owned(),
            location: details.location,
            link: details.link,
            source: details.source,
            salary: details.salary,
            notes: details.notes,
            created_at,
            updated_at,
        }
    }
}

/// Order records newest first.
///
/// `records` must be in insertion order; records sharing a creation
/// timestamp are returned later-insertion first.
pub fn newest_first(records: impl IntoIterator<Item = JobApplication>) -> Vec<JobApplication> {
    let mut ordered: Vec<JobApplication> = records.into_iter().collect();
    ordered.reverse();
    ordered.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    ordered
}
