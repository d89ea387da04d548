//! "Was this page helpful?" card.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackReason, FeedbackRequest};
use crate::widgets::filter::ClassList;

const POSITIVE: &str = "feedback--positive";
const NEGATIVE: &str = "feedback--negative";

/// Feedback URL for the page at `pathname`.
///
/// `pathname` is used as-is, so directory-style pages (`/courses/x/`) yield
/// `/courses/x/feedback`.
pub fn feedback_endpoint(protocol: &str, host: &str, pathname: &str) -> String {
    format!("{}//{}{}feedback", protocol, host, pathname)
}

/// Card behaviour options, as served to the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOptions {
    /// Remove the card this long after the thank-you message appears.
    /// `None` keeps the message on screen. Milliseconds on the wire.
    #[serde(rename = "autoHideMs", default, with = "millis_option")]
    pub auto_hide: Option<Duration>,
}

mod millis_option {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// What the card currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackView {
    /// Yes / no buttons.
    Prompt,
    /// Reason radios and free-text box after a "no".
    ReasonForm {
        reason: FeedbackReason,
        additional: String,
    },
    ThankYou,
}

/// View model for one `.feedback` root.
///
/// Submissions are optimistic: every method that produces a
/// [`FeedbackRequest`] has already moved to the thank-you view, whatever
/// becomes of the request.
#[derive(Debug, Clone)]
pub struct FeedbackCard {
    endpoint: String,
    options: FeedbackOptions,
    classes: ClassList,
    view: FeedbackView,
}

impl FeedbackCard {
    pub fn new(endpoint: impl Into<String>, options: FeedbackOptions) -> Self {
        Self {
            endpoint: endpoint.into(),
            options,
            classes: ClassList::parse("feedback"),
            view: FeedbackView::Prompt,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn view(&self) -> &FeedbackView {
        &self.view
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// "Yes" clicked.
    pub fn helpful(&mut self) -> Option<FeedbackRequest> {
        if self.view != FeedbackView::Prompt {
            return None;
        }
        self.thank_you();
        Some(FeedbackRequest::helpful())
    }

    /// "No" clicked: ask why.
    pub fn unhelpful(&mut self) {
        if self.view != FeedbackView::Prompt {
            return;
        }
        self.classes.add(NEGATIVE);
        self.view = FeedbackView::ReasonForm {
            reason: FeedbackReason::default(),
            additional: String::new(),
        };
    }

    pub fn select_reason(&mut self, selected: FeedbackReason) {
        if let FeedbackView::ReasonForm { ref mut reason, .. } = self.view {
            *reason = selected;
        }
    }

    pub fn set_additional(&mut self, text: &str) {
        if let FeedbackView::ReasonForm {
            ref mut additional, ..
        } = self.view
        {
            *additional = text.to_string();
        }
    }

    /// Reason form submitted.
    pub fn submit(&mut self) -> Option<FeedbackRequest> {
        let FeedbackView::ReasonForm { reason, additional } = &self.view else {
            return None;
        };
        let request = FeedbackRequest::unhelpful(*reason, additional.clone());
        self.thank_you();
        Some(request)
    }

    /// Reason form dismissed: back to the yes / no prompt.
    pub fn cancel(&mut self) {
        if matches!(self.view, FeedbackView::ReasonForm { .. }) {
            self.classes.remove(NEGATIVE);
            self.view = FeedbackView::Prompt;
        }
    }

    /// Delay after which the front end should remove the card, if any.
    pub fn hide_after(&self) -> Option<Duration> {
        match self.view {
            FeedbackView::ThankYou => self.options.auto_hide,
            _ => None,
        }
    }

    fn thank_you(&mut self) {
        self.classes.remove(NEGATIVE);
        self.classes.add(POSITIVE);
        self.view = FeedbackView::ThankYou;
    }
}
