//! Academy Common Types
//!
//! Shared types used by the backend and by the browser-side widgets.

pub mod category;
pub mod course;
pub mod feedback;
pub mod widgets;

pub use category::{find_by_slug, Category};
pub use course::{Course, CourseStatus, CourseWithProgress, EnrolmentsResponse, UserEnrolments};
pub use feedback::{FeedbackReason, FeedbackRequest};
