// File: tramite-site/src/form/submission.rs
// Purpose: Submit lifecycle state and the button presentation derived from it

use crate::dom::Dom;

pub const LOADING_LABEL: &str = r#"<span class="btn-spinner"></span> Invio in corso..."#;
pub const SUCCESS_LABEL: &str = "✓ Richiesta inviata!";
pub const ERROR_LABEL: &str = "✗ Errore - Riprova";

const STATE_CLASSES: [&str; 3] = ["loading", "success", "error"];

/// Where the quote form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Button label for this state; Idle shows the page's own label
    pub fn label<'a>(&self, original: &'a str) -> &'a str {
        match self {
            SubmissionState::Idle => original,
            SubmissionState::Submitting => LOADING_LABEL,
            SubmissionState::Succeeded => SUCCESS_LABEL,
            SubmissionState::Failed => ERROR_LABEL,
        }
    }

    /// The control stays disabled while in flight and while the success label shows
    pub fn is_disabled(&self) -> bool {
        matches!(self, SubmissionState::Submitting | SubmissionState::Succeeded)
    }

    pub fn class(&self) -> Option<&'static str> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Submitting => Some("loading"),
            SubmissionState::Succeeded => Some("success"),
            SubmissionState::Failed => Some("error"),
        }
    }

    /// A result label is showing and a revert is pending
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }

    /// Paint the submit button for this state
    pub fn render(&self, dom: &dyn Dom, button_id: &str, original_label: &str) {
        dom.set_inner_html(button_id, self.label(original_label));
        dom.set_disabled(button_id, self.is_disabled());
        for class in STATE_CLASSES {
            dom.toggle_class(button_id, class, self.class() == Some(class));
        }
    }
}
