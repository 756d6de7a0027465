//! Form chrome: the collapsible message form and submit-button loading state.

use std::time::Duration;

use tokio::time::Instant;

/// Label shown on a submit button while its form is being sent.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Icon shown next to [`PROCESSING_LABEL`].
pub const PROCESSING_ICON: &str = "fas fa-spinner fa-spin";

/// How long a submit button stays disabled if the page never reloads.
pub const SUBMIT_REENABLE_AFTER: Duration = Duration::from_secs(5);

/// The team message form, hidden until asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageForm {
    visible: bool,
}

impl MessageForm {
    /// Hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show when hidden, hide when shown. Returns `true` when the form was
    /// opened, in which case the host scrolls it into view.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Whether the form is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// CSS `display` value of the form.
    pub fn display(&self) -> &'static str {
        if self.visible { "block" } else { "none" }
    }
}

/// A form's submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    label: String,
    pending_until: Option<Instant>,
}

impl SubmitButton {
    /// Enabled button showing `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pending_until: None,
        }
    }

    /// The form was submitted at `now`: disable the button and show the
    /// processing label until [`SUBMIT_REENABLE_AFTER`] has passed.
    pub fn submit(&mut self, now: Instant) {
        self.pending_until = Some(now + SUBMIT_REENABLE_AFTER);
    }

    /// Re-enable the button if its fallback delay has passed at `now`.
    ///
    /// Returns `true` when the button came back.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_until {
            Some(until) if now >= until => {
                self.pending_until = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the button can be pressed.
    pub fn is_enabled(&self) -> bool {
        self.pending_until.is_none()
    }

    /// Text currently on the button.
    pub fn label(&self) -> &str {
        if self.is_enabled() {
            &self.label
        } else {
            PROCESSING_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_form_toggle() {
        let mut form = MessageForm::new();
        assert_eq!(form.display(), "none");

        assert!(form.toggle());
        assert_eq!(form.display(), "block");

        assert!(!form.toggle());
        assert!(!form.is_visible());
    }

    #[test]
    fn test_submit_disables_until_fallback() {
        let start = Instant::now();
        let mut button = SubmitButton::new("Post Message");
        assert_eq!(button.label(), "Post Message");

        button.submit(start);
        assert!(!button.is_enabled());
        assert_eq!(button.label(), PROCESSING_LABEL);

        assert!(!button.poll(start + Duration::from_millis(4_999)));
        assert!(!button.is_enabled());

        assert!(button.poll(start + SUBMIT_REENABLE_AFTER));
        assert!(button.is_enabled());
        assert_eq!(button.label(), "Post Message");
        assert!(!button.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_resubmit_restarts_delay() {
        let start = Instant::now();
        let mut button = SubmitButton::new("Upload");
        button.submit(start);
        button.submit(start + Duration::from_secs(3));

        assert!(!button.poll(start + SUBMIT_REENABLE_AFTER));
        assert!(button.poll(start + Duration::from_secs(8)));
    }
}
