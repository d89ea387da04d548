//! Page feedback payload.

use serde::{Deserialize, Serialize};

/// Longest free-text comment accepted with negative feedback.
pub const MAX_ADDITIONAL_LEN: usize = 2000;

/// Why a reader found a page unhelpful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackReason {
    /// It has missing information
    Missing,
    /// It's hard to follow or confusing
    HardToFollow,
    /// It's inaccurate, out of date, or doesn't work
    Inaccurate,
    /// Something else
    Other,
}

impl FeedbackReason {
    pub const ALL: [FeedbackReason; 4] = [
        FeedbackReason::Missing,
        FeedbackReason::HardToFollow,
        FeedbackReason::Inaccurate,
        FeedbackReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackReason::Missing => "missing",
            FeedbackReason::HardToFollow => "hard-to-follow",
            FeedbackReason::Inaccurate => "inaccurate",
            FeedbackReason::Other => "other",
        }
    }
}

impl Default for FeedbackReason {
    /// The option preselected in the reason form.
    fn default() -> Self {
        FeedbackReason::Missing
    }
}

/// Body of `POST <page-path>/feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub helpful: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FeedbackReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
}

impl FeedbackRequest {
    pub fn helpful() -> Self {
        Self {
            helpful: true,
            reason: None,
            additional: None,
        }
    }

    pub fn unhelpful(reason: FeedbackReason, additional: impl Into<String>) -> Self {
        Self {
            helpful: false,
            reason: Some(reason),
            additional: Some(additional.into()),
        }
    }

    /// Check the payload is consistent.
    ///
    /// Reasons only make sense for negative feedback, and comments are capped
    /// at [`MAX_ADDITIONAL_LEN`] characters.
    pub fn validate(&self) -> Result<(), String> {
        if self.helpful && (self.reason.is_some() || self.additional.is_some()) {
            return Err("reason and additional are only accepted when helpful is false".to_string());
        }
        if let Some(ref additional) = self.additional {
            if additional.chars().count() > MAX_ADDITIONAL_LEN {
                return Err(format!(
                    "additional must be at most {} characters",
                    MAX_ADDITIONAL_LEN
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpful_serialization_omits_reason() {
        let json = serde_json::to_string(&FeedbackRequest::helpful()).unwrap();
        assert_eq!(json, r#"{"helpful":true}"#);
    }

    #[test]
    fn test_unhelpful_serialization() {
        let request = FeedbackRequest::unhelpful(FeedbackReason::HardToFollow, "too long");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""helpful":false"#));
        assert!(json.contains(r#""reason":"hard-to-follow""#));
        assert!(json.contains(r#""additional":"too long""#));
    }

    #[test]
    fn test_reason_as_str_matches_serde() {
        for reason in FeedbackReason::ALL {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.as_str()));
        }
    }

    #[test]
    fn test_validate() {
        assert!(FeedbackRequest::helpful().validate().is_ok());
        assert!(FeedbackRequest::unhelpful(FeedbackReason::Other, "").validate().is_ok());

        let inconsistent = FeedbackRequest {
            helpful: true,
            reason: Some(FeedbackReason::Missing),
            additional: None,
        };
        assert!(inconsistent.validate().is_err());

        let too_long = FeedbackRequest::unhelpful(
            FeedbackReason::Other,
            "x".repeat(MAX_ADDITIONAL_LEN + 1),
        );
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_unknown_reason_rejected() {
        let result: Result<FeedbackRequest, _> =
            serde_json::from_str(r#"{"helpful": false, "reason": "boring"}"#);
        assert!(result.is_err());
    }
}
