//! Course catalog model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for course fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    EmptyCode,
    CodeTooLong { max: usize },
    CodeInvalidCharacters,
    EmptyTitle,
    EmptyDescription,
    CreditsOutOfRange { min: i16, max: i16 },
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "course code must not be empty"),
            Self::CodeTooLong { max } => {
                write!(f, "course code must be at most {max} characters")
            }
            Self::CodeInvalidCharacters => write!(
                f,
                "course code must start with a letter and contain only uppercase letters and digits",
            ),
            Self::EmptyTitle => write!(f, "course title must not be empty"),
            Self::EmptyDescription => write!(f, "course description must not be empty"),
            Self::CreditsOutOfRange { min, max } => {
                write!(f, "credits must be between {min} and {max}")
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Maximum allowed length for a course code.
pub const COURSE_CODE_MAX: usize = 16;
/// Inclusive credit bounds.
pub const CREDITS_MIN: i16 = 1;
pub const CREDITS_MAX: i16 = 6;

/// Unique human-readable course identifier, e.g. `CS101`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Validate and construct a [`CourseCode`] from owned input.
    pub fn new(code: impl Into<String>) -> Result<Self, CourseValidationError> {
        let code = code.into().trim().to_uppercase();
        if code.is_empty() {
            return Err(CourseValidationError::EmptyCode);
        }
        if code.chars().count() > COURSE_CODE_MAX {
            return Err(CourseValidationError::CodeTooLong {
                max: COURSE_CODE_MAX,
            });
        }
        let starts_with_letter = code.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_with_letter || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CourseValidationError::CodeInvalidCharacters);
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CourseCode> for String {
    fn from(value: CourseCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CourseCode {
    type Error = CourseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated input for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub code: CourseCode,
    pub title: String,
    pub description: String,
    pub instructor: Option<String>,
    pub credits: Option<i16>,
}

impl CourseDraft {
    /// Validate raw strings into a draft.
    pub fn try_from_parts(
        code: &str,
        title: &str,
        description: &str,
        instructor: Option<&str>,
        credits: Option<i16>,
    ) -> Result<Self, CourseValidationError> {
        let code = CourseCode::new(code)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(CourseValidationError::EmptyDescription);
        }
        if let Some(credits) = credits
            && !(CREDITS_MIN..=CREDITS_MAX).contains(&credits)
        {
            return Err(CourseValidationError::CreditsOutOfRange {
                min: CREDITS_MIN,
                max: CREDITS_MAX,
            });
        }
        let instructor = instructor
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);
        Ok(Self {
            code,
            title: title.to_owned(),
            description: description.to_owned(),
            instructor,
            credits,
        })
    }
}

/// Catalog entry.
///
/// ## Invariants
/// - `code` is unique across the catalog (store-enforced).
/// - Mutation and deletion are out of scope; a course is immutable once
///   created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: Uuid,
    code: CourseCode,
    title: String,
    description: String,
    instructor: Option<String>,
    credits: Option<i16>,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Materialise a course from a draft with a fresh identifier.
    pub fn from_draft(draft: CourseDraft, created_at: DateTime<Utc>) -> Self {
        let CourseDraft {
            code,
            title,
            description,
            instructor,
            credits,
        } = draft;
        Self {
            id: Uuid::new_v4(),
            code,
            title,
            description,
            instructor,
            credits,
            created_at,
        }
    }

    /// Rebuild a course from stored parts (persistence adapters only).
    pub fn from_parts(
        id: Uuid,
        code: CourseCode,
        title: String,
        description: String,
        instructor: Option<String>,
        credits: Option<i16>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            title,
            description,
            instructor,
            credits,
            created_at,
        }
    }

    /// Primary identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique human-readable code.
    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    /// Course title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Course description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional instructor name.
    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    /// Optional credit count.
    pub fn credits(&self) -> Option<i16> {
        self.credits
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CS101")]
    #[case("cs101")]
    #[case("WEB201")]
    fn code_accepts_valid_input(#[case] input: &str) {
        assert!(CourseCode::new(input).is_ok());
    }

    #[test]
    fn code_is_normalised_to_uppercase() {
        let code = CourseCode::new("cs101").expect("valid code");
        assert_eq!(code.as_ref(), "CS101");
    }

    #[rstest]
    #[case("", CourseValidationError::EmptyCode)]
    #[case("101CS", CourseValidationError::CodeInvalidCharacters)]
    #[case("CS-101", CourseValidationError::CodeInvalidCharacters)]
    fn code_rejects_invalid_input(#[case] input: &str, #[case] expected: CourseValidationError) {
        assert_eq!(CourseCode::new(input).expect_err("should fail"), expected);
    }

    #[test]
    fn draft_trims_and_drops_blank_instructor() {
        let draft = CourseDraft::try_from_parts("CS101", " Intro ", " Basics ", Some("  "), None)
            .expect("valid draft");
        assert_eq!(draft.title, "Intro");
        assert_eq!(draft.description, "Basics");
        assert!(draft.instructor.is_none());
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(7))]
    fn draft_rejects_out_of_range_credits(#[case] credits: Option<i16>) {
        let result = CourseDraft::try_from_parts("CS101", "Intro", "Basics", None, credits);
        assert!(matches!(
            result,
            Err(CourseValidationError::CreditsOutOfRange { .. })
        ));
    }

    #[test]
    fn from_draft_assigns_fresh_ids() {
        let draft = CourseDraft::try_from_parts("CS101", "Intro", "Basics", None, Some(3))
            .expect("valid draft");
        let a = Course::from_draft(draft.clone(), Utc::now());
        let b = Course::from_draft(draft, Utc::now());
        assert_ne!(a.id(), b.id());
    }
}
