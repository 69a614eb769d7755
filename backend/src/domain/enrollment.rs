//! Enrollment ledger model.
//!
//! The ledger keeps at most one enrollment row per (user, course) pair,
//! regardless of status; the backing store's unique compound index is the
//! source of truth for that invariant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::course::Course;
use super::user::UserId;

/// Lifecycle state of an enrollment.
///
/// Stored and reported, but never transitioned by any operation in scope:
/// unenrolling deletes the row outright instead of marking it `Dropped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown stored status values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown enrollment status: {value}")]
pub struct ParseEnrollmentStatusError {
    value: String,
}

impl FromStr for EnrollmentStatus {
    type Err = ParseEnrollmentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            other => Err(ParseEnrollmentStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A single (user, course) link in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    id: Uuid,
    user_id: UserId,
    course_id: Uuid,
    status: EnrollmentStatus,
    enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a fresh active enrollment timestamped now.
    pub fn new(user_id: UserId, course_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            status: EnrollmentStatus::Active,
            enrolled_at: Utc::now(),
        }
    }

    /// Rebuild an enrollment from stored parts (persistence adapters only).
    pub fn from_parts(
        id: Uuid,
        user_id: UserId,
        course_id: Uuid,
        status: EnrollmentStatus,
        enrolled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            course_id,
            status,
            enrolled_at,
        }
    }

    /// Ledger row identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Referenced course.
    pub fn course_id(&self) -> Uuid {
        self.course_id
    }

    /// Lifecycle state.
    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    /// Enrollment timestamp.
    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }
}

/// An enrollment joined with its course, as returned by `list_by_user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}
