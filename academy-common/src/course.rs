//! Course and enrolment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a course.
///
/// Some statuses are "negative" (retired, hidden, unfinished) and keep a
/// course out of public listings. Which ones is a deployment decision, so
/// the negative set is passed in rather than baked into the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Active,
    Published,
    Draft,
    Disabled,
    Test,
    /// Course moved elsewhere; never listed.
    Redirect,
    #[default]
    #[serde(other)]
    Unknown,
}

impl CourseStatus {
    /// All known variants, in declaration order.
    pub const ALL: [CourseStatus; 7] = [
        CourseStatus::Active,
        CourseStatus::Published,
        CourseStatus::Draft,
        CourseStatus::Disabled,
        CourseStatus::Test,
        CourseStatus::Redirect,
        CourseStatus::Unknown,
    ];

    /// Whether a course with this status belongs in public listings.
    ///
    /// `Redirect` is excluded regardless of `negative`.
    pub fn is_listed(&self, negative: &[CourseStatus]) -> bool {
        *self != CourseStatus::Redirect && !negative.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Active => "active",
            CourseStatus::Published => "published",
            CourseStatus::Draft => "draft",
            CourseStatus::Disabled => "disabled",
            CourseStatus::Test => "test",
            CourseStatus::Redirect => "redirect",
            CourseStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: CourseStatus,
    /// Whether the requesting user is enrolled. Always false for anonymous visitors.
    #[serde(default)]
    pub enrolled: bool,
}

/// A course seen through one user's enrolment.
///
/// Request-scoped: rebuilt from the graph on every page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithProgress {
    #[serde(flatten)]
    pub course: Course,
    /// Epoch milliseconds on the wire.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_seen_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_percentage: u8,
}

/// A user's enrolments grouped by progress.
///
/// A group the user has nothing in is absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserEnrolments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrolled: Option<Vec<CourseWithProgress>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<Vec<CourseWithProgress>>,
}

/// Envelope returned by the enrolment service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrolmentsResponse {
    pub enrolments: UserEnrolments,
}

impl EnrolmentsResponse {
    /// In-progress courses, or an empty list when the group is absent.
    pub fn into_enrolled(self) -> Vec<CourseWithProgress> {
        self.enrolments.enrolled.unwrap_or_default()
    }
}
