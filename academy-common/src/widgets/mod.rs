//! Browser widget models.
//!
//! These hold the state and arithmetic behind the page widgets without
//! touching the DOM. A front end binds each model once per widget root and
//! mirrors the resulting classes, styles and views onto its elements.

pub mod feedback;
pub mod filter;
pub mod progress;

pub use feedback::{feedback_endpoint, FeedbackCard, FeedbackOptions, FeedbackView};
pub use filter::{ClassList, FilterToggle};
pub use progress::{parse_percent, ProgressRing, RingStyle};
